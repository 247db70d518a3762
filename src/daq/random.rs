//! Instrument identity and the seeded random source shared by every
//! randomized part of the simulation.
//!
//! The identity bytes are folded into a 32-byte `ChaCha8Rng` seed, so two
//! sessions built from the same identity draw exactly the same sequence of
//! spline control points and noise samples.
use std::fmt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use crate::daq::DaqError;
const IDENTITY_PREFIX: char = 's';
const IDENTITY_DIGITS: usize = 7;
const SEED_LEN: usize = 32;
/// Validated instrument identity (a matriculation number such as `s1234567`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    id: String,
    licensee: Option<String>,
}
impl Identity {
    /// Accepts any string that *starts with* `s` followed by seven digits.
    /// Trailing characters are kept as part of the identity.
    pub fn parse(raw: &str) -> Result<Self, DaqError> {
        let mut chars = raw.chars();
        let prefix_ok = chars.next() == Some(IDENTITY_PREFIX);
        let digits = chars.take(IDENTITY_DIGITS).filter(char::is_ascii_digit).count();
        if !prefix_ok || digits != IDENTITY_DIGITS {
            return Err(DaqError::InvalidIdentity(raw.to_string()));
        }
        Ok(Self {
            id: raw.to_string(),
            licensee: None,
        })
    }
    /// Attach the name of the licence holder reported alongside the identity.
    pub fn with_licensee(mut self, licensee: impl Into<String>) -> Self {
        self.licensee = Some(licensee.into());
        self
    }
    pub fn as_str(&self) -> &str {
        &self.id
    }
    pub fn licensee(&self) -> Option<&str> {
        self.licensee.as_deref()
    }
    /// 32-byte generator seed: the UTF-8 bytes of the identity, folded in
    /// place once they pass the seed length. Independent of the toolchain.
    pub fn seed(&self) -> [u8; SEED_LEN] {
        let mut seed = [0u8; SEED_LEN];
        for (i, byte) in self.id.bytes().enumerate() {
            let slot = &mut seed[i % SEED_LEN];
            *slot = slot.rotate_left(3) ^ byte;
        }
        seed
    }
}
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
/// Deterministic uniform/Gaussian generator, seeded once per session.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}
impl RandomSource {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            rng: ChaCha8Rng::from_seed(identity.seed()),
        }
    }
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
    /// Uniform deviate in `[low, high)`. Returns `low` for an empty range.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
    /// Normal deviate `mean + stddev * z`, `z ~ N(0, 1)`.
    pub fn gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + stddev * z
    }
}
