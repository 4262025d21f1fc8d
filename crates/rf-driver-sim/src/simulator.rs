//! The simulated RF driver.
//!
//! Implements the full driver contract against an in-memory record: atomic
//! validate-then-apply for configuration, a bounded random-walk temperature
//! that advances on every status read, and identity specs drawn from a
//! [`DeviceProfile`]. With a fixed seed the simulation is fully
//! deterministic, which is what the tests lean on.

use crate::profile::DeviceProfile;
use crate::rng::SimRng;
use async_trait::async_trait;
use chrono::Utc;
use rf_core::driver::RfDriver;
use rf_core::error::RfResult;
use rf_core::record::{ConfigUpdate, DeviceRecord, DeviceSpecs, StatusSnapshot, NO_CHANGES_MESSAGE};

// =============================================================================
// Temperature Model
// =============================================================================

/// Bounded random walk anchored near a baseline.
///
/// Each step pulls the current value a fraction of the way back toward the
/// baseline, then adds uniform jitter, then clamps to a maximum excursion.
/// The pull-back keeps long traces from wandering to implausible extremes
/// while short traces still look alive.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureModel {
    /// Resting temperature in Celsius.
    pub baseline: f64,
    /// Half-width of the per-step jitter in Celsius.
    pub jitter: f64,
    /// Fraction of the offset from baseline removed per step, in `[0, 1]`.
    pub pull: f64,
    /// Hard cap on the distance from baseline in Celsius.
    pub max_excursion: f64,
}

impl Default for TemperatureModel {
    fn default() -> Self {
        Self {
            baseline: 25.0,
            jitter: 0.5,
            pull: 0.05,
            max_excursion: 10.0,
        }
    }
}

impl TemperatureModel {
    /// Advance the walk one step.
    pub fn step(&self, current: f64, rng: &SimRng) -> f64 {
        let pulled = current - self.pull * (current - self.baseline);
        self.clamp(pulled + rng.jitter(self.jitter))
    }

    /// Apply one jitter without the pull-back, for event-driven nudges
    /// (retuning warms the front end slightly).
    pub fn nudge(&self, current: f64, rng: &SimRng) -> f64 {
        self.clamp(current + rng.jitter(self.jitter))
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(
            self.baseline - self.max_excursion,
            self.baseline + self.max_excursion,
        )
    }
}

// =============================================================================
// Simulated Driver
// =============================================================================

/// RF driver backed by simulation instead of hardware.
///
/// One instance backs one device record. A simulated device is reachable
/// from the moment it is created; there is no link to lose, so the driver
/// never reports unreachability.
#[derive(Debug)]
pub struct SimulatedDriver {
    temperature: TemperatureModel,
    rng: SimRng,
}

impl SimulatedDriver {
    /// Create a driver seeded from the OS.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a deterministic driver.
    pub fn with_seed(seed: u64) -> Self {
        Self::builder().seed(seed).build()
    }

    pub fn builder() -> SimulatedDriverBuilder {
        SimulatedDriverBuilder::default()
    }

    /// Materialize the record this driver backs.
    ///
    /// Draws the serial number from the driver's RNG and marks the record
    /// connected immediately.
    pub fn create_record(&self, device_id: &str, profile: &DeviceProfile) -> DeviceRecord {
        let specs = profile.specs(&self.rng);
        let mut record = DeviceRecord::new(device_id, specs, profile.initial_state());
        record.connected = true;
        record
    }
}

impl Default for SimulatedDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RfDriver for SimulatedDriver {
    fn driver_type(&self) -> &'static str {
        "simulated"
    }

    async fn apply_config(
        &self,
        record: &mut DeviceRecord,
        update: &ConfigUpdate,
    ) -> RfResult<String> {
        record.validate(update)?;

        if update.is_empty() {
            return Ok(NO_CHANGES_MESSAGE.to_string());
        }

        let changes = record.apply(update, Utc::now());
        if update.frequency.is_some() {
            // Retuning shifts the front-end thermals a little.
            record.temperature = self.temperature.nudge(record.temperature, &self.rng);
        }

        let summary = changes.join("; ");
        tracing::debug!(device_id = %record.device_id, %summary, "applied configuration");
        Ok(summary)
    }

    async fn read_status(&self, record: &mut DeviceRecord) -> RfResult<StatusSnapshot> {
        record.temperature = self.temperature.step(record.temperature, &self.rng);
        Ok(record.snapshot())
    }

    async fn read_info(&self, record: &DeviceRecord) -> RfResult<DeviceSpecs> {
        Ok(record.specs.clone())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`SimulatedDriver`].
#[derive(Debug, Default)]
pub struct SimulatedDriverBuilder {
    seed: Option<u64>,
    temperature: Option<TemperatureModel>,
}

impl SimulatedDriverBuilder {
    /// Seed the RNG for deterministic behavior.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the temperature model.
    pub fn temperature(mut self, model: TemperatureModel) -> Self {
        self.temperature = Some(model);
        self
    }

    pub fn build(self) -> SimulatedDriver {
        SimulatedDriver {
            temperature: self.temperature.unwrap_or_default(),
            rng: SimRng::new(self.seed),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
