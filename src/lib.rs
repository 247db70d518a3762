//! Simulated data-acquisition instrument for coursework exercises.
//!
//! A [`DaqSession`](daq::DaqSession) is seeded from a student identity,
//! connected to one of four instruments, triggered, and then polled for
//! 10-bit readings on a fixed sample clock.
pub mod config;
pub mod daq;
pub use config::DaqConfig;
pub use daq::{DaqError, DaqSession, Identity, Instrument, Reading};
