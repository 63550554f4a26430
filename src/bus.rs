//! Bus-side collaborators: the SPI transport and the mutex that arbitrates it.

use core::cell::RefCell;
use embedded_hal::blocking::spi::Transfer;

use crate::config::Hertz;

/// A read-capable SPI transport.
///
/// Implement this for a HAL SPI type that can change its clock at runtime.
/// For HALs that fix the clock when the peripheral is created, wrap the
/// peripheral in [`FixedClock`].
pub trait SpiTransport: Transfer<u8> {
    /// Set the bus clock used by subsequent transfers.
    fn set_clock_rate(&mut self, rate: Hertz) -> Result<(), <Self as Transfer<u8>>::Error>;

    /// Fill `buf` from the bus. Exactly `buf.len()` bytes are clocked; zeros
    /// are sent on MOSI.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), <Self as Transfer<u8>>::Error> {
        buf.fill(0);
        self.transfer(buf)?;
        Ok(())
    }
}

/// Adapts a [`Transfer`] whose clock rate is configured by the HAL.
pub struct FixedClock<S>(pub S);

impl<S> FixedClock<S> {
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S: Transfer<u8>> Transfer<u8> for FixedClock<S> {
    type Error = S::Error;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        self.0.transfer(words)
    }
}

impl<S: Transfer<u8>> SpiTransport for FixedClock<S> {
    fn set_clock_rate(&mut self, _rate: Hertz) -> Result<(), S::Error> {
        Ok(())
    }
}

/// Scoped exclusive access to a shared bus.
///
/// The bus is only reachable inside the closure passed to [`BusMutex::lock`],
/// so it is released on every exit path.
pub trait BusMutex {
    type Bus;

    fn lock<R, F: FnOnce(&mut Self::Bus) -> R>(&self, f: F) -> R;
}

/// Lets several devices borrow one bus mutex.
impl<M: BusMutex + ?Sized> BusMutex for &M {
    type Bus = M::Bus;

    fn lock<R, F: FnOnce(&mut M::Bus) -> R>(&self, f: F) -> R {
        (**self).lock(f)
    }
}

/// Single execution context. Panics on re-entrant locking.
impl<T> BusMutex for RefCell<T> {
    type Bus = T;

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        f(&mut self.borrow_mut())
    }
}

#[cfg(feature = "std")]
impl<T> BusMutex for std::sync::Mutex<T> {
    type Bus = T;

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        // Poisoning is ignored, the bus itself is still usable.
        let mut bus =
            std::sync::Mutex::lock(self).unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut bus)
    }
}

#[cfg(feature = "std")]
impl<M: BusMutex + ?Sized> BusMutex for std::sync::Arc<M> {
    type Bus = M::Bus;

    fn lock<R, F: FnOnce(&mut M::Bus) -> R>(&self, f: F) -> R {
        (**self).lock(f)
    }
}
