//! Recording mocks of the latch pin and SPI transport.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use embedded_hal::{blocking::spi::Transfer, digital::v2::OutputPin};

use crate::{
    bank::ShiftRegisterBank,
    bus::SpiTransport,
    config::{Config, Hertz},
    delay::NoDelay,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    LatchHigh,
    LatchLow,
    Transfer(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockError;

/// Event log shared between the mocks of one test.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn take(&self) -> Vec<Event> {
        self.0.borrow_mut().drain(..).collect()
    }
}

pub struct Latch {
    log: Log,
    pub fail_high: bool,
    /// Shared so a test can break the line after the bank owns the pin.
    pub fail_low: Rc<Cell<bool>>,
}

impl Latch {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            fail_high: false,
            fail_low: Rc::new(Cell::new(false)),
        }
    }
}

impl OutputPin for Latch {
    type Error = MockError;

    fn set_high(&mut self) -> Result<(), MockError> {
        if self.fail_high {
            return Err(MockError);
        }
        self.log.push(Event::LatchHigh);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), MockError> {
        if self.fail_low.get() {
            return Err(MockError);
        }
        self.log.push(Event::LatchLow);
        Ok(())
    }
}

/// Returns the bytes currently in `inputs` on every transfer.
pub struct Spi {
    log: Log,
    pub inputs: Rc<RefCell<Vec<u8>>>,
    pub clock_rates: Vec<Hertz>,
    /// Shared so a test can heal the bus after the bank owns it.
    pub fail: Rc<Cell<bool>>,
}

impl Spi {
    pub fn new(log: &Log, inputs: &[u8]) -> Self {
        Self {
            log: log.clone(),
            inputs: Rc::new(RefCell::new(inputs.to_vec())),
            clock_rates: Vec::new(),
            fail: Rc::new(Cell::new(false)),
        }
    }
}

impl Transfer<u8> for Spi {
    type Error = MockError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], MockError> {
        self.log.push(Event::Transfer(words.len()));
        if self.fail.get() {
            return Err(MockError);
        }
        words.copy_from_slice(&self.inputs.borrow());
        Ok(words)
    }
}

impl SpiTransport for Spi {
    fn set_clock_rate(&mut self, rate: Hertz) -> Result<(), MockError> {
        self.clock_rates.push(rate);
        Ok(())
    }
}

pub type Bank<const N: usize> = ShiftRegisterBank<RefCell<Spi>, Latch, NoDelay, N>;

/// A bank reading `inputs`, with the construction events already drained.
pub fn bank<const N: usize>(inputs: &[u8]) -> (Bank<N>, Log) {
    let log = Log::default();
    let bank = ShiftRegisterBank::new(
        RefCell::new(Spi::new(&log, inputs)),
        Latch::new(&log),
        Config::default(),
    )
    .unwrap();
    log.take();
    (bank, log)
}
