//! Semantic mapping from RfError to gRPC Status codes.
//!
//! Only the read-only calls use this: `SetRFSettings` reports validation
//! and reachability failures as response data, per the service contract.
//! Where an error does travel as a transport status, the mapping follows
//! gRPC semantics:
//!
//! - **InvalidArgument**: client sent bad input (out-of-range parameter,
//!   unknown antenna, missing device id)
//! - **Unavailable**: the hardware link is down or timed out; retryable
//! - **Internal**: server-side invariant violations

use rf_core::error::RfError;
use tonic::Status;

/// Map a domain error to an appropriate gRPC Status.
pub fn map_rf_error_to_status(err: RfError) -> Status {
    match &err {
        RfError::OutOfRange { .. } | RfError::InvalidAntenna { .. } | RfError::MissingDeviceId => {
            Status::invalid_argument(err.to_string())
        }
        RfError::DeviceUnreachable { .. } => Status::unavailable(err.to_string()),
        RfError::Internal(_) => Status::internal(err.to_string()),
    }
}

/// Extension trait for converting `Result<T, RfError>` to `Result<T, Status>`
pub trait RfResultExt<T> {
    /// Convert a domain error result to a tonic Status result
    fn map_rf_err(self) -> Result<T, Status>;
}

impl<T> RfResultExt<T> for Result<T, RfError> {
    fn map_rf_err(self) -> Result<T, Status> {
        self.map_err(map_rf_error_to_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::error::ConfigField;
    use tonic::Code;

    #[test]
    fn validation_errors_map_to_invalid_argument() {
        let status =
            map_rf_error_to_status(RfError::out_of_range(ConfigField::Frequency, -1.0, 70e6, 6e9));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("out of range"));

        let status = map_rf_error_to_status(RfError::MissingDeviceId);
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[test]
    fn unreachable_maps_to_unavailable() {
        let status = map_rf_error_to_status(RfError::DeviceUnreachable {
            device_id: "usrp0".into(),
            reason: "probe timed out".into(),
        });
        assert_eq!(status.code(), Code::Unavailable);
    }

    #[test]
    fn internal_maps_to_internal() {
        let status = map_rf_error_to_status(RfError::Internal("invariant broken".into()));
        assert_eq!(status.code(), Code::Internal);
    }
}
