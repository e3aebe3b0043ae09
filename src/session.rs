use core::sync::atomic::{AtomicU16, AtomicU8, Ordering};

/// State of the measurement in flight, shared between the thread
/// context polling `Sr04::read_distance` and the capture interrupt
/// driving `EchoCapture::on_edge`.
///
/// The interrupt is the only writer of the edge count until the poller
/// consumes a completed measurement, so plain load/store atomics are
/// sufficient; no compare-and-swap is required of the target.
pub struct Session {
    /// Echo edges seen since the session was last consumed.
    edges: AtomicU8,
    /// Width of the echo pulse, in capture ticks.
    ///
    /// Valid only once `edges` reads 2. Written before the final edge
    /// count is published, so an acquire load of the count also orders
    /// the width.
    width: AtomicU16,
}

impl Session {
    /// Creates an idle session.
    ///
    /// `const`, so the session can live in a `static` reachable from
    /// both the capture interrupt and the polling thread.
    pub const fn new() -> Self {
        Self {
            edges: AtomicU8::new(0),
            width: AtomicU16::new(0),
        }
    }

    /// Number of echo edges seen in the current session.
    ///
    /// 0 is idle, 1 is mid-pulse, 2 is complete and awaiting
    /// consumption.
    pub fn edges(&self) -> u8 {
        self.edges.load(Ordering::Acquire)
    }

    /// Records the rising edge opening the echo pulse.
    pub(crate) fn start(&self) {
        self.edges.store(1, Ordering::Release);
    }

    /// Records the falling edge together with the measured pulse width.
    pub(crate) fn finish(&self, width: u16) {
        self.width.store(width, Ordering::Relaxed);
        self.edges.store(2, Ordering::Release);
    }

    /// Takes the completed measurement, returning the session to idle.
    ///
    /// Must only be called after `edges()` has returned 2.
    pub(crate) fn consume(&self) -> u16 {
        let width = self.width.load(Ordering::Relaxed);
        self.edges.store(0, Ordering::Release);
        width
    }

    /// Drops whatever measurement is in flight.
    pub(crate) fn clear(&self) {
        self.edges.store(0, Ordering::Release);
    }
}
