/// Points in a transaction where the chip may need time to settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delay {
    /// After the latch is driven high, before the first clock edge.
    LatchHigh,
    /// After the latch is driven low, before the next transaction may start.
    LatchLow,
}

/// Waits for the latch line timing requirements of the chain.
///
/// The 74HC165 needs its parallel load pulse to be held for a minimum width
/// that depends on supply voltage; most MCUs are slow enough that no delay is
/// needed, in which case use [`NoDelay`].
pub trait LatchDelay {
    fn delay(&self, delay: Delay);
}

/// Never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl LatchDelay for NoDelay {
    fn delay(&self, _delay: Delay) {}
}

impl<F> LatchDelay for F
where
    F: Fn(Delay),
{
    fn delay(&self, d: Delay) {
        self(d)
    }
}
