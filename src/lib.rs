//! Driver for chains of 74HC165 parallel-in, serial-out shift registers.
//!
//! The chain's serial output is read over SPI (MISO and SCK), with the
//! chips' SH/LD input wired to a separate latch pin. Each input of the chain
//! can then be used as an `embedded-hal` input pin.
//!
//! ```ignore
//! use core::cell::RefCell;
//! use hc165::{Config, FixedClock, ShiftRegisterBank};
//!
//! let spi = RefCell::new(FixedClock(spi));
//! let bank: ShiftRegisterBank<_, _, _, 2> = ShiftRegisterBank::new(spi, latch, Config::default())?;
//!
//! let door = bank.get_pin(3)?;
//! if door.read()? {
//!     // ...
//! }
//! ```
//!
//! The bus is only touched inside [`BusMutex::lock`]. To share it with other
//! devices, hand the bank a reference to the mutex (`&RefCell<_>` in a single
//! execution context) and keep using the mutex elsewhere. With the `std`
//! feature, `std::sync::Mutex` and `Arc<Mutex<_>>` work too.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod fmt;

mod bank;
mod bus;
mod config;
mod delay;
mod error;
mod pin;

#[cfg(test)]
mod mock;

pub use bank::{BankError, ShiftRegisterBank};
pub use bus::{BusMutex, FixedClock, SpiTransport};
pub use config::{Config, Hertz};
pub use delay::{Delay, LatchDelay, NoDelay};
pub use error::{Error, Operation};
pub use pin::{Direction, InputPin, Pull};
