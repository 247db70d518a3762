// Simulated acquisition device: signal model, noise, quantization and pacing.
pub mod clock;
pub mod error;
pub mod plot;
pub mod quantizer;
pub mod random;
pub mod session;
pub mod spline;
pub mod waveform;
pub use clock::{ManualClock, SampleClock, WallClock};
pub use error::DaqError;
pub use plot::{render_profile_png, render_readings_png, PlotStyle};
pub use quantizer::{Quantizer, SensorRange};
pub use random::{Identity, RandomSource};
pub use session::{DaqSession, Reading, SessionState};
pub use spline::{SplineCurve, SplineCurveBuilder};
pub use waveform::{Instrument, WaveformProfile};
