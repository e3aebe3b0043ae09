use crate::capture::{CaptureTimer, Config, Edge};
use crate::session::Session;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use embedded_time::duration::Microseconds;
/// Driver for the HC-SR04 ultrasonic sensor.

/// Time after triggering beyond which the measurement is considered to
/// have timed out.
///
/// The HC-SR04 datasheet suggests a timeout of 60 milliseconds.
pub const TIMEOUT: Microseconds = Microseconds(60_000);

/// Width of the trigger pulse.
///
/// The sensor requires at least 10 us; the extra margin covers jitter
/// in the delay implementation.
pub const TRIGGER_WIDTH: Microseconds = Microseconds(12);

/// Interval between polls of the capture state while waiting for the
/// echo to be timed.
pub const POLL_INTERVAL: Microseconds = Microseconds(10);

/// Capture ticks per centimeter of target distance.
///
/// The echo pulse lasts for the round trip of the sound burst. At a
/// tick rate of 1 MHz and a speed of sound of ~343 m/s, sound covers
/// one centimeter of target distance (two centimeters of travel) in
/// 58 ticks.
pub const TICKS_PER_CM: u16 = 58;

/// Prescale divisor applied to the capture backend's input clock.
///
/// Chosen so that the counter ticks at 1 MHz from the usual 8 MHz
/// input clock, matching `TICKS_PER_CM`.
pub const PRESCALE: u16 = 8;

/// Errors that can be returned from the sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A measurement is already in progress.
    InProgress,
    /// Measurement timed out.
    Timeout,
}

/// Converts an echo pulse width in capture ticks to centimeters.
///
/// Integer division truncates: echoes shorter than one centimeter of
/// target distance read as zero.
pub fn distance_cm(ticks: u16) -> u16 {
    ticks / TICKS_PER_CM
}

/// Thread-context half of the driver.
///
/// Owns the trigger pin and performs the blocking measurement. The
/// matching [`EchoCapture`] half advances the shared [`Session`] from
/// the capture interrupt.
pub struct Sr04<'a, TRIG, DELAY> {
    /// Trigger pin.
    trig: TRIG,
    /// Delay used for the trigger pulse and for pacing the echo wait.
    delay: DELAY,
    /// Measurement shared with the capture interrupt.
    session: &'a Session,
}

/// Interrupt-context half of the driver.
///
/// Owns the capture timer. `on_edge` must be called from the capture
/// interrupt, once per detected edge.
pub struct EchoCapture<'a, CAP> {
    /// Capture timer peripheral.
    capture: CAP,
    /// Measurement shared with the polling thread.
    session: &'a Session,
}

impl<'a, TRIG, DELAY> Sr04<'a, TRIG, DELAY>
where
    TRIG: OutputPin,
    DELAY: DelayUs<u32>,
{
    /// Creates a driver pair sharing `session`.
    ///
    /// Parks the trigger pin low, applies the fixed capture
    /// configuration with the detector armed for the rising edge of
    /// the first echo, and clears any leftover session state.
    ///
    /// Binding the returned [`EchoCapture`] to the capture interrupt
    /// completes initialization; until then no echo can be timed.
    pub fn new<CAP>(
        session: &'a Session,
        mut trig: TRIG,
        delay: DELAY,
        mut capture: CAP,
    ) -> (Self, EchoCapture<'a, CAP>)
    where
        CAP: CaptureTimer,
    {
        trig.set_low().ok();
        capture.configure(Config {
            prescale: PRESCALE,
            edge: Edge::Rising,
        });
        session.clear();

        (
            Self {
                trig,
                delay,
                session,
            },
            EchoCapture { capture, session },
        )
    }

    /// Sends the trigger pulse to the sensor.
    ///
    /// Blocks for `TRIGGER_WIDTH`. Must not be called from interrupt
    /// context, as the underlying delay is not reentrant-safe there.
    pub fn trigger(&mut self) {
        self.trig.set_high().ok();
        self.delay.delay_us(TRIGGER_WIDTH.0);
        self.trig.set_low().ok();
    }

    /// Performs a complete distance measurement.
    ///
    /// Triggers the sensor and blocks until the capture interrupt has
    /// timed the echo pulse, then returns the target distance in
    /// centimeters, truncated toward zero.
    ///
    /// Returns `Error::InProgress` if the previous session has not
    /// been consumed, without touching the hardware. Returns
    /// `Error::Timeout` if no complete echo arrives within `TIMEOUT`;
    /// the partial session is left in place and must be dropped with
    /// [`EchoCapture::reset`] before the next measurement.
    pub fn read_distance(&mut self) -> Result<u16, Error> {
        if self.session.edges() != 0 {
            return Err(Error::InProgress);
        }

        self.trigger();

        let mut remaining = TIMEOUT.0 / POLL_INTERVAL.0;
        while self.session.edges() < 2 {
            if remaining == 0 {
                return Err(Error::Timeout);
            }
            self.delay.delay_us(POLL_INTERVAL.0);
            remaining -= 1;
        }

        Ok(distance_cm(self.session.consume()))
    }
}

impl<'a, CAP> EchoCapture<'a, CAP>
where
    CAP: CaptureTimer,
{
    /// Advances the measurement on an echo edge.
    ///
    /// The first edge of a session opens the pulse timing and re-arms
    /// the detector for the falling edge; the second records the pulse
    /// width and re-arms for the next session's rising edge. Does not
    /// block and performs no allocation.
    pub fn on_edge(&mut self) {
        match self.session.edges() {
            0 => {
                // Time origin for the pulse width is the rising edge.
                self.capture.clear();
                self.capture.set_edge(Edge::Falling);
                self.session.start();
            }
            1 => {
                let width = self.capture.count();
                self.capture.clear();
                self.capture.set_edge(Edge::Rising);
                self.session.finish(width);
            }
            // A completed session is consumed before the next trigger,
            // so an edge seen here belongs to no measurement.
            _ => {}
        }
    }

    /// Abandons the measurement in flight and re-arms for a new one.
    ///
    /// Recovery path after `Error::Timeout`. Call with the capture
    /// interrupt masked and the echo line idle; an edge delivered
    /// concurrently with the reset would corrupt the fresh session.
    pub fn reset(&mut self) {
        self.capture.clear();
        self.capture.set_edge(Edge::Rising);
        self.session.clear();
    }
}
