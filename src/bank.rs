use core::cell::RefCell;
use embedded_hal::{blocking::spi::Transfer, digital::v2::OutputPin};

use crate::{
    bus::{BusMutex, SpiTransport},
    config::Config,
    delay::{Delay, LatchDelay, NoDelay},
    error::Error,
    pin::InputPin,
};

/// Error type of a bank with bus mutex `M` and latch `L`.
pub type BankError<M, L> =
    Error<<<M as BusMutex>::Bus as Transfer<u8>>::Error, <L as OutputPin>::Error>;

/// A chain of `N` 74HC165 chips sharing one latch line.
///
/// Chip 0 is the chip whose serial output is wired to MISO; its inputs are
/// pins 0 to 7, the next chip's are 8 to 15, and so on.
///
/// The latch and the sample cache live in `RefCell`s so that pins can share
/// the bank. This makes the bank `!Sync`: reading it from several threads
/// needs external synchronisation.
pub struct ShiftRegisterBank<M, L, D = NoDelay, const N: usize = 1> {
    bus: M,
    latch: RefCell<L>,
    delay: D,
    config: Config,
    cached: RefCell<[u8; N]>,
}

impl<M, L, const N: usize> ShiftRegisterBank<M, L, NoDelay, N>
where
    M: BusMutex,
    M::Bus: SpiTransport,
    L: OutputPin,
{
    /// Create a bank that does not wait between latch transitions.
    pub fn new(bus: M, latch: L, config: Config) -> Result<Self, BankError<M, L>> {
        Self::with_delay(bus, latch, NoDelay, config)
    }
}

impl<M, L, D, const N: usize> ShiftRegisterBank<M, L, D, N> {
    /// Number of chained chips.
    pub const fn chip_count(&self) -> usize {
        N
    }

    /// Number of addressable input pins.
    pub const fn pin_count(&self) -> usize {
        N * 8
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Destroy the bank, returning the bus, latch and delay.
    pub fn release(self) -> (M, L, D) {
        (self.bus, self.latch.into_inner(), self.delay)
    }
}

impl<M, L, D, const N: usize> ShiftRegisterBank<M, L, D, N>
where
    M: BusMutex,
    M::Bus: SpiTransport,
    L: OutputPin,
    D: LatchDelay,
{
    /// Create a bank, calling `delay` at each latch transition.
    ///
    /// The latch is driven low, its idle level.
    pub fn with_delay(
        bus: M,
        mut latch: L,
        delay: D,
        config: Config,
    ) -> Result<Self, BankError<M, L>> {
        if N == 0 {
            warn!("74HC165 chain must contain at least one chip");
            return Err(Error::Configuration);
        }
        latch.set_low().map_err(Error::Latch)?;
        debug!("74HC165 chain of {} chips at {} Hz", N, config.clock_rate.0);

        Ok(Self {
            bus,
            latch: RefCell::new(latch),
            delay,
            config,
            cached: RefCell::new([0; N]),
        })
    }

    /// Sample every input of the chain.
    ///
    /// The latch is driven high, `N` bytes are read with the bus locked, then
    /// the latch is driven low again. The first byte belongs to chip 0.
    ///
    /// If driving the latch high fails no transfer happens and the latch may
    /// be left high. If the transfer fails the latch is still driven low, and
    /// the sample is undefined until the next successful call.
    pub fn refresh_and_read(&self) -> Result<[u8; N], BankError<M, L>> {
        let mut latch = self.latch.borrow_mut();
        latch.set_high().map_err(|e| {
            warn!("failed to drive latch high, transfer skipped");
            Error::Latch(e)
        })?;
        self.delay.delay(Delay::LatchHigh);

        let mut cached = self.cached.borrow_mut();
        let clock_rate = self.config.clock_rate;
        let transferred = self.bus.lock(|spi| {
            spi.set_clock_rate(clock_rate)
                .and_then(|()| spi.read_into(&mut cached[..]))
        });

        let rearmed = latch.set_low();
        self.delay.delay(Delay::LatchLow);

        if let Err(e) = transferred {
            warn!("74HC165 transfer failed");
            return Err(Error::Spi(e));
        }
        rearmed.map_err(Error::Latch)?;

        trace!("74HC165 sample {=[u8]}", &cached[..]);
        Ok(*cached)
    }

    /// A view of input `index`.
    pub fn get_pin(&self, index: usize) -> Result<InputPin<'_, M, L, D, N>, BankError<M, L>> {
        if index >= self.pin_count() {
            return Err(Error::OutOfRange {
                index,
                pin_count: self.pin_count(),
            });
        }
        Ok(InputPin::new(self, index))
    }

    /// Every pin of the chain, in index order.
    pub fn pins(&self) -> impl Iterator<Item = InputPin<'_, M, L, D, N>> + '_ {
        (0..self.pin_count()).map(move |index| InputPin::new(self, index))
    }
}
