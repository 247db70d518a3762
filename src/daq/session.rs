use std::time::{Duration, SystemTime};
use log::{debug, info, warn};
use ndarray::Array1;
use crate::config::DaqConfig;
use crate::daq::clock::{SampleClock, WallClock};
use crate::daq::waveform::{Instrument, WaveformProfile};
use crate::daq::{DaqError, Identity, Quantizer, RandomSource, SensorRange};
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Connected,
    Triggered,
}
/// One timed sample: wall-clock stamp and converter code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    pub timestamp: SystemTime,
    pub code: u16,
}
/// A single simulated acquisition device.
///
/// The session owns the random source and the experiment clock. A reading
/// can only be taken after an instrument is connected and the session has
/// been triggered; every reading waits one sample period on the injected
/// [`SampleClock`].
pub struct DaqSession<C: SampleClock = WallClock> {
    identity: Identity,
    rng: RandomSource,
    quantizer: Quantizer,
    sample_period: Duration,
    clock: C,
    initialised_at: SystemTime,
    profile: Option<WaveformProfile>,
    triggered_at: Option<SystemTime>,
    elapsed_secs: f64,
}
impl DaqSession<WallClock> {
    /// Stock instrument paced by real time.
    pub fn with_wall_clock(identity: Identity) -> Result<Self, DaqError> {
        Self::new(identity, DaqConfig::default(), WallClock)
    }
}
impl<C: SampleClock> DaqSession<C> {
    pub fn new(identity: Identity, config: DaqConfig, clock: C) -> Result<Self, DaqError> {
        config.validate()?;
        let sample_period = config.sample_period()?;
        let rng = RandomSource::from_identity(&identity);
        let quantizer = config.quantizer();
        let initialised_at = clock.now();
        info!(
            "DAQ {} initialised {:?} Q={}",
            identity,
            initialised_at,
            quantizer.range().q()
        );
        if let Some(licensee) = identity.licensee() {
            info!("licensed to {licensee}.");
        }
        Ok(Self {
            identity,
            rng,
            quantizer,
            sample_period,
            clock,
            initialised_at,
            profile: None,
            triggered_at: None,
            elapsed_secs: 0.0,
        })
    }
    pub fn state(&self) -> SessionState {
        match (&self.profile, self.triggered_at) {
            (None, _) => SessionState::Uninitialized,
            (Some(_), None) => SessionState::Connected,
            (Some(_), Some(_)) => SessionState::Triggered,
        }
    }
    /// Select an instrument by name (`"constant"`, `"ramp up"`, `"ramp down"`
    /// or `"coursework"`). `level` is only used by the constant source.
    pub fn connect(&mut self, instrument: &str, level: f64) -> Result<(), DaqError> {
        let instrument: Instrument = instrument.parse()?;
        self.connect_instrument(instrument, level)
    }
    /// Replaces any previously connected instrument. The experiment clock
    /// keeps running; only [`trigger`](Self::trigger) resets it.
    pub fn connect_instrument(
        &mut self,
        instrument: Instrument,
        level: f64,
    ) -> Result<(), DaqError> {
        let profile = WaveformProfile::build(instrument, level, &mut self.rng)?;
        self.profile = Some(profile);
        info!("{instrument} connected.");
        Ok(())
    }
    /// Reset the experiment clock to zero. May be called again to re-trigger.
    pub fn trigger(&mut self) -> Result<(), DaqError> {
        if self.profile.is_none() {
            return Err(DaqError::NotConnected);
        }
        let now = self.clock.now();
        self.elapsed_secs = 0.0;
        self.triggered_at = Some(now);
        info!("triggered at {now:?}");
        Ok(())
    }
    /// Waits one sample period, advances the experiment clock and returns the
    /// quantized, noisy value of the connected instrument.
    pub fn next_reading(&mut self) -> Result<Reading, DaqError> {
        if self.triggered_at.is_none() {
            return Err(DaqError::NotTriggered);
        }
        let Some(profile) = self.profile.as_ref() else {
            return Err(DaqError::NotTriggered);
        };
        self.clock.wait(self.sample_period);
        self.elapsed_secs += self.sample_period.as_secs_f64();
        let volts = profile.voltage(self.elapsed_secs);
        let code = self.quantizer.quantize_reading(volts, &mut self.rng);
        let reading = Reading {
            timestamp: self.clock.now(),
            code,
        };
        debug!(
            "t={:.1}s ideal={volts:.4}V code={code}",
            self.elapsed_secs
        );
        if code == 0 || code == self.quantizer.range().max_code() {
            warn!("reading saturated at code {code} (t={:.1}s)", self.elapsed_secs);
        }
        Ok(reading)
    }
    /// `count` consecutive readings.
    pub fn acquire(&mut self, count: usize) -> Result<Vec<Reading>, DaqError> {
        (0..count).map(|_| self.next_reading()).collect()
    }
    /// Ideal voltages of the connected instrument at `times`.
    pub fn voltage(&self, times: &Array1<f64>) -> Result<Array1<f64>, DaqError> {
        Ok(self.profile()?.voltages(times))
    }
    /// Voltages at `times` with batch-level noise, clamped to the sensor range.
    pub fn measured(&mut self, times: &Array1<f64>) -> Result<Array1<f64>, DaqError> {
        let ideal = self.voltage(times)?;
        Ok(self.quantizer.measured(&ideal, &mut self.rng))
    }
    /// Codes for `times` using the batch noise level.
    pub fn quantize(&mut self, times: &Array1<f64>) -> Result<Array1<u16>, DaqError> {
        let ideal = self.voltage(times)?;
        Ok(self.quantizer.quantize_batch(&ideal, &mut self.rng))
    }
    pub fn profile(&self) -> Result<&WaveformProfile, DaqError> {
        self.profile.as_ref().ok_or(DaqError::NotConnected)
    }
    pub fn instrument(&self) -> Option<Instrument> {
        self.profile.as_ref().map(WaveformProfile::instrument)
    }
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
    pub fn range(&self) -> &SensorRange {
        self.quantizer.range()
    }
    pub fn sample_period(&self) -> Duration {
        self.sample_period
    }
    /// Seconds since the last trigger, in whole sample periods.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }
    pub fn initialised_at(&self) -> SystemTime {
        self.initialised_at
    }
    pub fn triggered_at(&self) -> Option<SystemTime> {
        self.triggered_at
    }
}
