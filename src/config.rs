/// A frequency in hertz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hertz(pub u32);

impl Hertz {
    /// # Panics
    ///
    /// If the result does not fit in `u32` hertz (above 4_294_967 kHz).
    pub const fn khz(khz: u32) -> Self {
        match khz.checked_mul(1_000) {
            Some(hz) => Self(hz),
            None => panic!("frequency does not fit in u32 hertz"),
        }
    }

    /// # Panics
    ///
    /// If the result does not fit in `u32` hertz (above 4_294 MHz).
    pub const fn mhz(mhz: u32) -> Self {
        match mhz.checked_mul(1_000_000) {
            Some(hz) => Self(hz),
            None => panic!("frequency does not fit in u32 hertz"),
        }
    }
}

/// Bank configuration.
///
/// Start from [`Config::default`] and change the fields you need:
///
/// ```ignore
/// let mut config = hc165::Config::default();
/// config.clock_rate = hc165::Hertz::khz(500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub struct Config {
    /// Bus clock applied to the transport at the start of every transaction.
    pub clock_rate: Hertz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_rate: Hertz::mhz(1),
        }
    }
}
