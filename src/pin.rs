//! Single-input views of a [`ShiftRegisterBank`].

use core::fmt;
use embedded_hal::digital::v2::{InputPin as HalInputPin, OutputPin};

use crate::{
    bank::{BankError, ShiftRegisterBank},
    bus::{BusMutex, SpiTransport},
    delay::{LatchDelay, NoDelay},
    error::{Error, Operation},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    Up,
    Down,
}

/// One input of a 74HC165 chain.
///
/// Pins mirror the shape of a bidirectional GPIO so that code written against
/// generic pins can use them, but the chip has no output drivers or pull
/// resistors: every operation other than reading fails with
/// [`Error::Unsupported`] and has no effect on the hardware.
///
/// Reading any pin samples the whole chain.
pub struct InputPin<'a, M, L, D = NoDelay, const N: usize = 1> {
    bank: &'a ShiftRegisterBank<M, L, D, N>,
    index: usize,
    byte_index: usize,
    bit_offset: u8,
}

impl<'a, M, L, D, const N: usize> InputPin<'a, M, L, D, N> {
    /// `index` must already be checked against the bank's pin count.
    pub(crate) fn new(bank: &'a ShiftRegisterBank<M, L, D, N>, index: usize) -> Self {
        Self {
            bank,
            index,
            byte_index: index / 8,
            bit_offset: (index % 8) as u8,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Position of this pin's chip in the chain.
    pub fn byte_index(&self) -> usize {
        self.byte_index
    }

    /// Bit within the chip's byte, 0 being the least significant.
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    pub fn direction(&self) -> Direction {
        Direction::Input
    }

    pub fn pull(&self) -> Option<Pull> {
        None
    }
}

impl<'a, M, L, D, const N: usize> InputPin<'a, M, L, D, N>
where
    M: BusMutex,
    M::Bus: SpiTransport,
    L: OutputPin,
    D: LatchDelay,
{
    /// Sample the chain and return this pin's level, `true` being high.
    pub fn read(&self) -> Result<bool, BankError<M, L>> {
        let bytes = self.bank.refresh_and_read()?;
        Ok((bytes[self.byte_index] >> self.bit_offset) & 1 == 1)
    }

    pub fn write(&mut self, _value: bool) -> Result<(), BankError<M, L>> {
        Err(Error::Unsupported(Operation::Write))
    }

    /// Only [`Direction::Input`] is accepted.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), BankError<M, L>> {
        match direction {
            Direction::Input => Ok(()),
            Direction::Output => Err(Error::Unsupported(Operation::SetOutputDirection)),
        }
    }

    /// Only `None` is accepted.
    pub fn set_pull(&mut self, pull: Option<Pull>) -> Result<(), BankError<M, L>> {
        match pull {
            None => Ok(()),
            Some(_) => Err(Error::Unsupported(Operation::SetPull)),
        }
    }

    pub fn switch_to_input(&mut self, pull: Option<Pull>) -> Result<(), BankError<M, L>> {
        self.set_pull(pull)
    }

    pub fn switch_to_output(&mut self, _value: bool) -> Result<(), BankError<M, L>> {
        Err(Error::Unsupported(Operation::SetOutputDirection))
    }
}

impl<'a, M, L, D, const N: usize> HalInputPin for InputPin<'a, M, L, D, N>
where
    M: BusMutex,
    M::Bus: SpiTransport,
    L: OutputPin,
    D: LatchDelay,
{
    type Error = BankError<M, L>;

    fn is_high(&self) -> Result<bool, Self::Error> {
        self.read()
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.read().map(|high| !high)
    }
}

/// Always fails, so drivers expecting an output pin find out immediately.
impl<'a, M, L, D, const N: usize> OutputPin for InputPin<'a, M, L, D, N>
where
    M: BusMutex,
    M::Bus: SpiTransport,
    L: OutputPin,
    D: LatchDelay,
{
    type Error = BankError<M, L>;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }
}

impl<'a, M, L, D, const N: usize> Clone for InputPin<'a, M, L, D, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M, L, D, const N: usize> Copy for InputPin<'a, M, L, D, N> {}

impl<'a, M, L, D, const N: usize> fmt::Debug for InputPin<'a, M, L, D, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputPin")
            .field("index", &self.index)
            .finish()
    }
}
