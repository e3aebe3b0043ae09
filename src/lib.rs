//! Driver core for the HC-SR04 ultrasonic ranging module.
//!
//! Distance is measured by timing the width of the sensor's echo pulse
//! with a hardware edge-capture timer rather than by polling the echo
//! pin. The driver is split into two halves sharing one [`Session`]:
//!
//! - [`Sr04`] runs in thread context. It emits the trigger pulse and
//!   blocks (with a timeout) until the echo has been timed.
//! - [`EchoCapture`] runs in interrupt context. It is invoked once per
//!   captured edge and walks the rising → falling sequence, re-arming
//!   the capture hardware as it goes.
//!
//! Pin and delay access goes through `embedded-hal` traits; the capture
//! hardware is abstracted by the [`CaptureTimer`] trait, implemented
//! outside this crate for the target's timer peripheral.
//!
//! ```ignore
//! static SESSION: Session = Session::new();
//!
//! let (mut sensor, capture) = Sr04::new(&SESSION, trig_pin, delay, timer);
//! // Bind `capture` to the capture interrupt, then:
//! match sensor.read_distance() {
//!     Ok(cm) => defmt::info!("distance: {} cm", cm),
//!     Err(e) => defmt::warn!("ranging failed: {}", e),
//! }
//! ```

#![no_std]

pub mod capture;
pub mod session;
pub mod sr04;

pub use capture::{CaptureTimer, Config, Edge};
pub use session::Session;
pub use sr04::{distance_cm, EchoCapture, Error, Sr04};
