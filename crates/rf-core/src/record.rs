//! The device record: durable per-device state and its validation logic.
//!
//! A [`DeviceRecord`] is data plus the rules that keep it consistent. The
//! record owns the apply-or-reject discipline: every field of a
//! [`ConfigUpdate`] is validated against the device's capability bounds
//! before anything is written, so a rejected request can never leave a
//! half-applied state behind. Drivers delegate to [`DeviceRecord::validate`]
//! and [`DeviceRecord::apply`] rather than re-implementing the rules.

use crate::error::{ConfigField, RfError, RfResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Narration for a device whose last operation succeeded.
pub const STATUS_OPERATIONAL: &str = "Device operational";
/// Narration for a device whose last configuration attempt was rejected.
pub const STATUS_CONFIG_ERROR: &str = "Configuration error";
/// Narration for a device whose driver reports no link.
pub const STATUS_DISCONNECTED: &str = "Device disconnected";
/// Summary returned for an update that set no fields.
pub const NO_CHANGES_MESSAGE: &str = "No changes requested";

/// Immutable capability and identity data, fixed at device creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpecs {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_version: String,
    /// Lowest tunable frequency in Hz.
    pub min_frequency: f64,
    /// Highest tunable frequency in Hz.
    pub max_frequency: f64,
    /// Lowest settable gain in dB.
    pub min_gain: f64,
    /// Highest settable gain in dB.
    pub max_gain: f64,
    /// Antenna ports the device exposes.
    pub antennas: Vec<String>,
}

impl DeviceSpecs {
    /// Width of the tunable band in Hz; also the widest acceptable bandwidth.
    pub fn frequency_span(&self) -> f64 {
        self.max_frequency - self.min_frequency
    }
}

/// A configuration change request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    /// Center frequency in Hz.
    pub frequency: Option<f64>,
    /// Gain in dB.
    pub gain: Option<f64>,
    /// Bandwidth in Hz.
    pub bandwidth: Option<f64>,
    /// Antenna port name.
    pub antenna: Option<String>,
}

impl ConfigUpdate {
    /// True when no field is set; such an update is a status refresh, not
    /// an error.
    pub fn is_empty(&self) -> bool {
        self.frequency.is_none()
            && self.gain.is_none()
            && self.bandwidth.is_none()
            && self.antenna.is_none()
    }
}

/// Point-in-time view of a device's mutable state.
///
/// This is what the read paths return and what the wire-level
/// `DeviceStatus` message is built from. It deliberately excludes the
/// immutable specs, which travel through the info path instead.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub device_id: String,
    pub connected: bool,
    pub frequency: f64,
    pub gain: f64,
    pub bandwidth: f64,
    pub antenna: String,
    pub temperature: f64,
    pub status_message: String,
}

/// Initial mutable state for a freshly created record.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialState {
    pub frequency: f64,
    pub gain: f64,
    pub bandwidth: f64,
    pub antenna: String,
    pub temperature: f64,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            frequency: 2.4e9,
            gain: 0.0,
            bandwidth: 20e6,
            antenna: "RX2".to_string(),
            temperature: 25.0,
        }
    }
}

/// The durable state of one device.
///
/// Invariant: after any successful mutation, `frequency` and `gain` lie
/// within the record's capability bounds. A rejected update leaves every
/// field untouched except `status_message`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub device_id: String,
    pub connected: bool,
    pub frequency: f64,
    pub gain: f64,
    pub bandwidth: f64,
    pub antenna: String,
    pub temperature: f64,
    pub status_message: String,
    pub specs: DeviceSpecs,
    /// Timestamp of the last successful configuration change.
    pub last_update: Option<DateTime<Utc>>,
}

impl DeviceRecord {
    /// Create a record for `device_id` with the given specs and initial
    /// tuning state.
    pub fn new(device_id: impl Into<String>, specs: DeviceSpecs, initial: InitialState) -> Self {
        Self {
            device_id: device_id.into(),
            connected: false,
            frequency: initial.frequency,
            gain: initial.gain,
            bandwidth: initial.bandwidth,
            antenna: initial.antenna,
            temperature: initial.temperature,
            status_message: STATUS_OPERATIONAL.to_string(),
            specs,
            last_update: None,
        }
    }

    /// Check every provided field against the capability bounds.
    ///
    /// Returns the first violation found; nothing is written. Callers must
    /// gate [`DeviceRecord::apply`] on this so updates stay atomic.
    pub fn validate(&self, update: &ConfigUpdate) -> RfResult<()> {
        if let Some(freq) = update.frequency {
            if freq < self.specs.min_frequency || freq > self.specs.max_frequency {
                return Err(RfError::out_of_range(
                    ConfigField::Frequency,
                    freq,
                    self.specs.min_frequency,
                    self.specs.max_frequency,
                ));
            }
        }
        if let Some(gain) = update.gain {
            if gain < self.specs.min_gain || gain > self.specs.max_gain {
                return Err(RfError::out_of_range(
                    ConfigField::Gain,
                    gain,
                    self.specs.min_gain,
                    self.specs.max_gain,
                ));
            }
        }
        if let Some(bw) = update.bandwidth {
            if bw <= 0.0 || bw > self.specs.frequency_span() {
                return Err(RfError::out_of_range(
                    ConfigField::Bandwidth,
                    bw,
                    0.0,
                    self.specs.frequency_span(),
                ));
            }
        }
        if let Some(antenna) = &update.antenna {
            if !self.specs.antennas.iter().any(|a| a == antenna) {
                return Err(RfError::invalid_antenna(antenna, &self.specs.antennas));
            }
        }
        Ok(())
    }

    /// Apply a validated update and return one summary line per changed
    /// field, in frequency/gain/bandwidth/antenna order.
    ///
    /// Must only be called after [`DeviceRecord::validate`] has passed.
    pub fn apply(&mut self, update: &ConfigUpdate, now: DateTime<Utc>) -> Vec<String> {
        let mut changes = Vec::new();

        if let Some(freq) = update.frequency {
            self.frequency = freq;
            changes.push(format!(
                "Frequency set to {}",
                ConfigField::Frequency.format_value(freq)
            ));
        }
        if let Some(gain) = update.gain {
            self.gain = gain;
            changes.push(format!(
                "Gain set to {}",
                ConfigField::Gain.format_value(gain)
            ));
        }
        if let Some(bw) = update.bandwidth {
            self.bandwidth = bw;
            changes.push(format!(
                "Bandwidth set to {}",
                ConfigField::Bandwidth.format_value(bw)
            ));
        }
        if let Some(antenna) = &update.antenna {
            self.antenna = antenna.clone();
            changes.push(format!("Antenna set to {}", antenna));
        }

        if !changes.is_empty() {
            self.last_update = Some(now);
            self.status_message = STATUS_OPERATIONAL.to_string();
        }

        changes
    }

    /// Clone the mutable state into a snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            device_id: self.device_id.clone(),
            connected: self.connected,
            frequency: self.frequency,
            gain: self.gain,
            bandwidth: self.bandwidth,
            antenna: self.antenna.clone(),
            temperature: self.temperature,
            status_message: self.status_message.clone(),
        }
    }
}
