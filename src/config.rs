use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::daq::quantizer::{
    BATCH_NOISE_LSB, BITS, MAX_BITS, READING_NOISE_LSB, REF_HIGH, REF_LOW,
};
use crate::daq::{DaqError, Quantizer, SensorRange};
/// Default sample period of the simulated converter (s).
pub const DELTA_T: f64 = 0.5;
/// Instrument settings. Every field is optional in JSON and falls back to
/// the stock coursework DAQ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaqConfig {
    pub ref_low: f64,
    pub ref_high: f64,
    pub bits: u32,
    pub sample_period_secs: f64,
    pub reading_noise_lsb: f64,
    pub batch_noise_lsb: f64,
}
impl Default for DaqConfig {
    fn default() -> Self {
        Self {
            ref_low: REF_LOW,
            ref_high: REF_HIGH,
            bits: BITS,
            sample_period_secs: DELTA_T,
            reading_noise_lsb: READING_NOISE_LSB,
            batch_noise_lsb: BATCH_NOISE_LSB,
        }
    }
}
impl DaqConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DaqError> {
        let config: DaqConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DaqError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
    pub fn to_json_pretty(&self) -> Result<String, DaqError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    pub fn validate(&self) -> Result<(), DaqError> {
        if !self.ref_low.is_finite() || !self.ref_high.is_finite() || self.ref_low >= self.ref_high
        {
            return Err(DaqError::InvalidConfig(format!(
                "reference range must satisfy low < high, got [{}, {}]",
                self.ref_low, self.ref_high
            )));
        }
        if !(1..=MAX_BITS).contains(&self.bits) {
            return Err(DaqError::InvalidConfig(format!(
                "bits must be in 1..={MAX_BITS}, got {}",
                self.bits
            )));
        }
        self.sample_period()?;
        for (name, value) in [
            ("reading_noise_lsb", self.reading_noise_lsb),
            ("batch_noise_lsb", self.batch_noise_lsb),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DaqError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
    pub fn range(&self) -> SensorRange {
        SensorRange::new(self.ref_low, self.ref_high, self.bits)
    }
    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(self.range(), self.reading_noise_lsb, self.batch_noise_lsb)
    }
    /// Fails for periods that are not positive, overflow `Duration`, or
    /// round down to zero.
    pub fn sample_period(&self) -> Result<Duration, DaqError> {
        let secs = self.sample_period_secs;
        match Duration::try_from_secs_f64(secs) {
            Ok(period) if period > Duration::ZERO => Ok(period),
            _ => Err(DaqError::InvalidConfig(format!(
                "sample period must be a representable duration > 0, got {secs}"
            ))),
        }
    }
}
