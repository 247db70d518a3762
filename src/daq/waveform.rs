use std::fmt;
use std::str::FromStr;
use ndarray::Array1;
use crate::daq::spline::{SplineCurve, SplineCurveBuilder};
use crate::daq::{DaqError, RandomSource};
/// Start/end magnitude of the ramp instruments (V).
pub const RAMP_SPAN_VOLTS: f64 = 4.5;
/// Length of one ramp / one coursework cycle (s).
pub const CYCLE_SECONDS: f64 = 60.0;
/// Ramp slope: the full 9 V swing over one cycle.
pub const RAMP_SLOPE: f64 = 2.0 * RAMP_SPAN_VOLTS / CYCLE_SECONDS;
const COURSEWORK_VOLTS: [f64; 7] = [-3.0, -2.0, 4.0, 4.5, 4.0, -2.0, -4.0];
const COURSEWORK_X2_RANGE: (f64, f64) = (12.0, 27.0);
const COURSEWORK_X4_RANGE: (f64, f64) = (32.0, 47.0);
const COURSEWORK_DEGREE: usize = 5;
/// The instruments that can be connected to the DAQ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instrument {
    Constant,
    RampUp,
    RampDown,
    Coursework,
}
impl Instrument {
    pub const ALL: [Instrument; 4] = [
        Instrument::Constant,
        Instrument::RampUp,
        Instrument::RampDown,
        Instrument::Coursework,
    ];
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Constant => "constant",
            Instrument::RampUp => "ramp up",
            Instrument::RampDown => "ramp down",
            Instrument::Coursework => "coursework",
        }
    }
}
impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Instrument {
    type Err = DaqError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|inst| inst.name() == s)
            .ok_or_else(|| DaqError::UnknownInstrument(s.to_string()))
    }
}
/// Ideal (noise-free, unclamped) signal produced by a connected instrument.
#[derive(Clone, Debug)]
pub enum WaveformProfile {
    Constant { level: f64 },
    RampUp,
    RampDown,
    Coursework { curve: SplineCurve },
}
impl WaveformProfile {
    pub fn constant(level: f64) -> Self {
        WaveformProfile::Constant { level }
    }
    pub fn ramp_up() -> Self {
        WaveformProfile::RampUp
    }
    pub fn ramp_down() -> Self {
        WaveformProfile::RampDown
    }
    /// Draws the two free abscissas (x2, then x4) from `rng` and fits a
    /// periodic quintic through the fixed voltage envelope.
    pub fn coursework(rng: &mut RandomSource) -> Result<Self, DaqError> {
        let x2 = rng.uniform(COURSEWORK_X2_RANGE.0, COURSEWORK_X2_RANGE.1);
        let x4 = rng.uniform(COURSEWORK_X4_RANGE.0, COURSEWORK_X4_RANGE.1);
        let times = [0.0, 10.0, x2, 30.0, x4, 50.0, CYCLE_SECONDS];
        let curve = SplineCurveBuilder::with_degree(COURSEWORK_DEGREE)
            .periodic(true)
            .fit(&times, &COURSEWORK_VOLTS)?;
        Ok(WaveformProfile::Coursework { curve })
    }
    /// `level` is only used by [`Instrument::Constant`].
    pub fn build(
        instrument: Instrument,
        level: f64,
        rng: &mut RandomSource,
    ) -> Result<Self, DaqError> {
        match instrument {
            Instrument::Constant => Ok(Self::constant(level)),
            Instrument::RampUp => Ok(Self::ramp_up()),
            Instrument::RampDown => Ok(Self::ramp_down()),
            Instrument::Coursework => Self::coursework(rng),
        }
    }
    pub fn instrument(&self) -> Instrument {
        match self {
            WaveformProfile::Constant { .. } => Instrument::Constant,
            WaveformProfile::RampUp => Instrument::RampUp,
            WaveformProfile::RampDown => Instrument::RampDown,
            WaveformProfile::Coursework { .. } => Instrument::Coursework,
        }
    }
    pub fn voltage(&self, t: f64) -> f64 {
        match self {
            WaveformProfile::Constant { level } => *level,
            WaveformProfile::RampUp => -RAMP_SPAN_VOLTS + t * RAMP_SLOPE,
            WaveformProfile::RampDown => RAMP_SPAN_VOLTS - t * RAMP_SLOPE,
            WaveformProfile::Coursework { curve } => curve.evaluate(t),
        }
    }
    pub fn voltages(&self, times: &Array1<f64>) -> Array1<f64> {
        times.mapv(|t| self.voltage(t))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
    #[test]
    fn instrument_names_round_trip() {
        for inst in Instrument::ALL {
            assert_eq!(inst.name().parse::<Instrument>().unwrap(), inst);
        }
        assert!(matches!(
            "sawtooth".parse::<Instrument>(),
            Err(DaqError::UnknownInstrument(name)) if name == "sawtooth"
        ));
        assert!("Ramp Up".parse::<Instrument>().is_err());
    }
    #[test]
    fn constant_is_flat() {
        let profile = WaveformProfile::constant(1.25);
        for t in [0.0, 0.5, 17.0, 60.0, 1e4] {
            assert_eq!(profile.voltage(t), 1.25);
        }
    }
    #[test]
    fn ramps_hit_endpoints() {
        let up = WaveformProfile::ramp_up();
        let down = WaveformProfile::ramp_down();
        assert!(close(up.voltage(0.0), -4.5));
        assert!(close(up.voltage(60.0), 4.5));
        assert!(close(up.voltage(30.0), 0.0));
        assert!(close(down.voltage(0.0), 4.5));
        assert!(close(down.voltage(60.0), -4.5));
    }
    #[test]
    fn coursework_interpolates_fixed_ordinates() {
        let mut rng = RandomSource::from_seed(42);
        let profile = WaveformProfile::coursework(&mut rng).unwrap();
        assert!(close(profile.voltage(0.0), -3.0));
        assert!(close(profile.voltage(10.0), -2.0));
        assert!(close(profile.voltage(30.0), 4.5));
        assert!(close(profile.voltage(50.0), -2.0));
        assert!(close(profile.voltage(60.0), -4.0));
    }
    #[test]
    fn coursework_hits_randomized_peaks() {
        let mut draw = RandomSource::from_seed(9);
        let x2 = draw.uniform(12.0, 27.0);
        let x4 = draw.uniform(32.0, 47.0);
        let mut rng = RandomSource::from_seed(9);
        let profile = WaveformProfile::coursework(&mut rng).unwrap();
        assert!(close(profile.voltage(x2), 4.0));
        assert!(close(profile.voltage(x4), 4.0));
    }
    #[test]
    fn coursework_is_periodic() {
        let mut rng = RandomSource::from_seed(2024);
        let profile = WaveformProfile::coursework(&mut rng).unwrap();
        for t in [0.25, 5.0, 19.5, 44.4, 59.75, 61.0, 130.5] {
            assert!(close(profile.voltage(t), profile.voltage(t + 60.0)), "t={t}");
        }
    }
    #[test]
    fn build_dispatches_on_instrument() {
        let mut rng = RandomSource::from_seed(1);
        for inst in Instrument::ALL {
            let profile = WaveformProfile::build(inst, 2.0, &mut rng).unwrap();
            assert_eq!(profile.instrument(), inst);
        }
        let flat = WaveformProfile::build(Instrument::Constant, -1.0, &mut rng).unwrap();
        assert_eq!(flat.voltage(12.0), -1.0);
    }
    #[test]
    fn voltages_maps_a_time_vector() {
        let profile = WaveformProfile::ramp_up();
        let out = profile.voltages(&Array1::from(vec![0.0, 30.0, 60.0]));
        assert!(close(out[0], -4.5) && close(out[1], 0.0) && close(out[2], 4.5));
    }
}
