use ndarray::Array1;
use crate::daq::RandomSource;
/// Lower reference voltage of the simulated sensor.
pub const REF_LOW: f64 = -5.0;
/// Upper reference voltage of the simulated sensor.
pub const REF_HIGH: f64 = 5.0;
/// Converter resolution.
pub const BITS: u32 = 10;
/// Widest resolution whose codes still fit in a `u16`.
pub const MAX_BITS: u32 = 16;
/// Noise applied to live, single-sample readings (in LSB).
pub const READING_NOISE_LSB: f64 = 8.0;
/// Noise applied when digitizing a whole vector of voltages (in LSB).
pub const BATCH_NOISE_LSB: f64 = 16.0;
/// Dynamic range and resolution of the converter. `q` is derived once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorRange {
    ref_low: f64,
    ref_high: f64,
    bits: u32,
    q: f64,
}
impl Default for SensorRange {
    fn default() -> Self {
        Self::new(REF_LOW, REF_HIGH, BITS)
    }
}
impl SensorRange {
    /// `bits` is clamped to `1..=MAX_BITS`. Callers are expected to pass
    /// `ref_low < ref_high`; `DaqConfig::validate` enforces both.
    pub fn new(ref_low: f64, ref_high: f64, bits: u32) -> Self {
        let bits = bits.clamp(1, MAX_BITS);
        let q = (ref_high - ref_low) / f64::from(1u32 << bits);
        Self {
            ref_low,
            ref_high,
            bits,
            q,
        }
    }
    pub fn ref_low(&self) -> f64 {
        self.ref_low
    }
    pub fn ref_high(&self) -> f64 {
        self.ref_high
    }
    pub fn bits(&self) -> u32 {
        self.bits
    }
    /// Volts per code step.
    pub fn q(&self) -> f64 {
        self.q
    }
    pub fn max_code(&self) -> u16 {
        ((1u32 << self.bits) - 1) as u16
    }
    pub fn clamp(&self, volts: f64) -> f64 {
        volts.clamp(self.ref_low, self.ref_high)
    }
    /// Code for an already clamped voltage. `ref_high` itself lands on the top code.
    pub fn code_for(&self, volts: f64) -> u16 {
        let steps = ((self.clamp(volts) - self.ref_low) / self.q).floor();
        (steps as u32).min(u32::from(self.max_code())) as u16
    }
    /// Lower edge of the bin represented by `code`.
    pub fn code_to_volts(&self, code: u16) -> f64 {
        self.ref_low + f64::from(code.min(self.max_code())) * self.q
    }
}
/// Adds measurement noise and maps voltages onto converter codes.
#[derive(Clone, Copy, Debug)]
pub struct Quantizer {
    range: SensorRange,
    reading_noise_lsb: f64,
    batch_noise_lsb: f64,
}
impl Default for Quantizer {
    fn default() -> Self {
        Self::new(SensorRange::default(), READING_NOISE_LSB, BATCH_NOISE_LSB)
    }
}
impl Quantizer {
    pub fn new(range: SensorRange, reading_noise_lsb: f64, batch_noise_lsb: f64) -> Self {
        Self {
            range,
            reading_noise_lsb,
            batch_noise_lsb,
        }
    }
    pub fn range(&self) -> &SensorRange {
        &self.range
    }
    pub fn reading_noise_lsb(&self) -> f64 {
        self.reading_noise_lsb
    }
    pub fn batch_noise_lsb(&self) -> f64 {
        self.batch_noise_lsb
    }
    /// Noisy, clamped, quantized code for one voltage. Draws exactly one
    /// Gaussian sample from `rng`.
    pub fn quantize(&self, volts: f64, noise_lsb: f64, rng: &mut RandomSource) -> u16 {
        let noisy = volts + rng.gaussian(0.0, noise_lsb * self.range.q);
        self.range.code_for(noisy)
    }
    /// Live sample path.
    pub fn quantize_reading(&self, volts: f64, rng: &mut RandomSource) -> u16 {
        self.quantize(volts, self.reading_noise_lsb, rng)
    }
    /// Noisy and clamped voltages, one Gaussian draw per element in order.
    pub fn measured(&self, volts: &Array1<f64>, rng: &mut RandomSource) -> Array1<f64> {
        let sigma = self.batch_noise_lsb * self.range.q;
        volts.mapv(|v| self.range.clamp(v + rng.gaussian(0.0, sigma)))
    }
    pub fn quantize_batch(&self, volts: &Array1<f64>, rng: &mut RandomSource) -> Array1<u16> {
        self.measured(volts, rng).mapv(|v| self.range.code_for(v))
    }
}
