//! Device profiles: the identity, bounds, and initial state a simulated
//! device is created with.
//!
//! The default profile models a USRP B200-series SDR. Profiles are plain
//! data and deserializable, so a deployment can describe a different
//! simulated device in its configuration file without code changes.

use crate::rng::SimRng;
use rf_core::record::{DeviceSpecs, InitialState};
use serde::{Deserialize, Serialize};

/// Template for the devices a simulated driver backs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub manufacturer: String,
    pub model: String,
    pub firmware_version: String,
    /// Lowest tunable frequency in Hz.
    pub min_frequency: f64,
    /// Highest tunable frequency in Hz.
    pub max_frequency: f64,
    /// Lowest settable gain in dB.
    pub min_gain: f64,
    /// Highest settable gain in dB.
    pub max_gain: f64,
    pub antennas: Vec<String>,
    pub initial_frequency: f64,
    pub initial_gain: f64,
    pub initial_bandwidth: f64,
    pub initial_antenna: String,
    pub baseline_temperature: f64,
}

impl DeviceProfile {
    /// USRP B200-series profile: 70 MHz-6 GHz, -20 dB-+76 dB, TX/RX + RX2.
    pub fn b200() -> Self {
        Self {
            manufacturer: "Ettus Research".to_string(),
            model: "USRP B200".to_string(),
            firmware_version: "4.1.0".to_string(),
            min_frequency: 70e6,
            max_frequency: 6e9,
            min_gain: -20.0,
            max_gain: 76.0,
            antennas: vec!["TX/RX".to_string(), "RX2".to_string()],
            initial_frequency: 2.4e9,
            initial_gain: 0.0,
            initial_bandwidth: 20e6,
            initial_antenna: "RX2".to_string(),
            baseline_temperature: 25.0,
        }
    }

    /// Materialize specs for one device, drawing a fresh serial number.
    pub fn specs(&self, rng: &SimRng) -> DeviceSpecs {
        DeviceSpecs {
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
            serial_number: format!("SN{}", rng.gen_range(100_000..=999_999)),
            firmware_version: self.firmware_version.clone(),
            min_frequency: self.min_frequency,
            max_frequency: self.max_frequency,
            min_gain: self.min_gain,
            max_gain: self.max_gain,
            antennas: self.antennas.clone(),
        }
    }

    /// Initial tuning state for a freshly created record.
    pub fn initial_state(&self) -> InitialState {
        InitialState {
            frequency: self.initial_frequency,
            gain: self.initial_gain,
            bandwidth: self.initial_bandwidth,
            antenna: self.initial_antenna.clone(),
            temperature: self.baseline_temperature,
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::b200()
    }
}
