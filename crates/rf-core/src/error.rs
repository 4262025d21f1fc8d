//! Error types for the rf-control service.
//!
//! `RfError` is the single domain error type. The taxonomy matters more than
//! the variant count: validation failures are client-caused and are reported
//! back inside a well-formed response, unreachability is environment-caused
//! and may be retried, and internal errors fail the one request that hit
//! them without taking anything else down. The gRPC layer decides per
//! operation whether an error travels as response data or as a transport
//! status; `is_validation` and `is_unreachable` exist so it can do that
//! without matching every variant.

use thiserror::Error;

/// Convenience alias for results using the domain error type.
pub type RfResult<T> = std::result::Result<T, RfError>;

/// The numeric RF parameters a configuration request can carry.
///
/// Used to name the offending field in range errors and to render values in
/// their natural units for user-visible messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Frequency,
    Gain,
    Bandwidth,
}

impl ConfigField {
    /// Render a raw value in the unit this field is displayed in.
    ///
    /// Frequencies render in GHz, bandwidths in MHz, gains in dB, matching
    /// the narration the service returns for successful changes.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            ConfigField::Frequency => format!("{:.3} GHz", value / 1e9),
            ConfigField::Gain => format!("{:.1} dB", value),
            ConfigField::Bandwidth => format!("{:.1} MHz", value / 1e6),
        }
    }
}

impl std::fmt::Display for ConfigField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConfigField::Frequency => "Frequency",
            ConfigField::Gain => "Gain",
            ConfigField::Bandwidth => "Bandwidth",
        };
        write!(f, "{}", label)
    }
}

/// Primary error type for RF device control.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RfError {
    /// A requested parameter falls outside the device's capability bounds.
    ///
    /// Client-caused. The request is rejected as a whole and the device
    /// record is left untouched. The rendered message names the field and
    /// the accepted range in natural units.
    #[error("{field} {requested} out of range: device accepts {min} to {max}")]
    OutOfRange {
        field: ConfigField,
        requested: String,
        min: String,
        max: String,
    },

    /// A requested antenna port is not one the device exposes.
    ///
    /// Client-caused, rejected atomically like any other validation failure.
    #[error("Antenna '{requested}' is not valid: expected one of {valid}")]
    InvalidAntenna { requested: String, valid: String },

    /// The request did not name a device.
    #[error("device_id is required")]
    MissingDeviceId,

    /// The driver could not reach its hardware.
    ///
    /// Only produced by external drivers — a simulated device is always
    /// reachable once created. Covers both probe failures and round-trips
    /// that exceeded the hardware timeout.
    #[error("Device '{device_id}' unreachable: {reason}")]
    DeviceUnreachable { device_id: String, reason: String },

    /// An invariant was violated or an unclassifiable failure occurred.
    ///
    /// Fails the single request that hit it; never corrupts other registry
    /// entries. Surfaced to clients as an internal transport status.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RfError {
    /// Build an out-of-range error with values rendered in display units.
    pub fn out_of_range(field: ConfigField, requested: f64, min: f64, max: f64) -> Self {
        RfError::OutOfRange {
            field,
            requested: field.format_value(requested),
            min: field.format_value(min),
            max: field.format_value(max),
        }
    }

    /// Build an invalid-antenna error from the device's accepted port list.
    pub fn invalid_antenna(requested: impl Into<String>, valid: &[String]) -> Self {
        RfError::InvalidAntenna {
            requested: requested.into(),
            valid: valid.join(", "),
        }
    }

    /// True for client-caused failures that should be reported as response
    /// data (`success = false`) rather than a transport fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RfError::OutOfRange { .. } | RfError::InvalidAntenna { .. } | RfError::MissingDeviceId
        )
    }

    /// True when the underlying hardware could not be reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RfError::DeviceUnreachable { .. })
    }
}
