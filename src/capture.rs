/// Capability interface of the edge-capture hardware.
///
/// The hardware behind this trait owns a free-running tick counter and
/// an edge detector on the echo line. It notifies software of each
/// qualifying edge by raising the interrupt that the application binds
/// `EchoCapture` to; edges are not queued, so a handler that has not
/// returned by the next edge loses it.

/// Transition on the echo line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high.
    Rising,
    /// High to low.
    Falling,
}

/// Static capture configuration, applied once at startup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Divisor between the capture input clock and the tick counter.
    pub prescale: u16,
    /// Edge the detector starts armed for.
    pub edge: Edge,
}

/// A timer/counter peripheral with edge capture on the echo line.
pub trait CaptureTimer {
    /// Applies `config` and starts the counter from zero.
    fn configure(&mut self, config: Config);

    /// Selects which transition raises the next capture event.
    ///
    /// Takes effect before the next edge on the line.
    fn set_edge(&mut self, edge: Edge);

    /// Zeroes the free-running counter.
    fn clear(&mut self);

    /// Ticks accumulated since the counter was last zeroed.
    ///
    /// Wraps at the width of the hardware counter.
    fn count(&self) -> u16;
}
