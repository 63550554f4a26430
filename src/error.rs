use core::fmt;

/// An operation the 74HC165 cannot perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Driving a level onto an input.
    Write,
    /// Switching a pin to output.
    SetOutputDirection,
    /// Enabling a pull-up or pull-down.
    SetPull,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Write => "setting a pin value",
            Operation::SetOutputDirection => "digital output",
            Operation::SetPull => "pull-up and pull-down",
        })
    }
}

/// Driver errors.
///
/// `SpiE` is the transport error and `PinE` the latch pin error.
/// [`Error::Unsupported`] is a permanent capability error: it means the call
/// site is wrong, retrying will never help.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, PinE> {
    /// The chain must contain at least one chip.
    Configuration,
    /// Pin index outside `0..pin_count`.
    OutOfRange { index: usize, pin_count: usize },
    Unsupported(Operation),
    /// The bus transfer failed. The cached sample is undefined afterwards.
    Spi(SpiE),
    /// Driving the latch line failed.
    Latch(PinE),
}

impl<SpiE, PinE> Error<SpiE, PinE> {
    /// `true` for errors that come from the hardware rather than from misuse.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Spi(_) | Error::Latch(_))
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for Error<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration => f.write_str("at least one shift register is required"),
            Error::OutOfRange { index, pin_count } => {
                write!(f, "pin {} out of range, chain has {} pins", index, pin_count)
            }
            Error::Unsupported(op) => write!(f, "{} is not supported", op),
            Error::Spi(e) => write!(f, "bus transfer failed: {:?}", e),
            Error::Latch(e) => write!(f, "latch pin failed: {:?}", e),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl<SpiE: fmt::Debug, PinE: fmt::Debug> std::error::Error for Error<SpiE, PinE> {}

#[cfg(test)]
mod tests {
    use super::*;

    type E = Error<(), ()>;

    #[test]
    fn display() {
        assert_eq!(
            E::OutOfRange {
                index: 16,
                pin_count: 16
            }
            .to_string(),
            "pin 16 out of range, chain has 16 pins"
        );
        assert_eq!(
            E::Unsupported(Operation::SetOutputDirection).to_string(),
            "digital output is not supported"
        );
    }

    #[test]
    fn io_classification() {
        assert!(E::Spi(()).is_io());
        assert!(E::Latch(()).is_io());
        assert!(!E::Configuration.is_io());
        assert!(!E::Unsupported(Operation::Write).is_io());
    }
}
