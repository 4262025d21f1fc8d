//! RFControlService implementation.
//!
//! The façade over the registry: each handler resolves (creating if absent)
//! the device, delegates to its driver through the per-device handle, and
//! translates the result onto the wire. Failure policy per operation:
//!
//! - `SetRFSettings` always returns a well-formed `RFResponse`; validation
//!   and reachability failures ride inside it as `success = false` with the
//!   device's unchanged state attached. Only internal invariant violations
//!   become transport errors.
//! - `GetDeviceStatus` / `GetDeviceInfo` have no success channel, so their
//!   failures map to transport statuses via `error_mapping`.

use crate::grpc::error_mapping::{map_rf_error_to_status, RfResultExt};
use rf_core::error::RfError;
use rf_hardware::DeviceRegistry;
use rf_proto::convert::{device_info, ToDomain};
use rf_proto::rf_control_service_server::RfControlService;
use rf_proto::{DeviceInfo, DeviceRequest, DeviceStatus, RfConfig, RfResponse};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tonic::{Request, Response, Status};

/// gRPC service for RF device control.
pub struct RfControlServiceImpl {
    registry: Arc<DeviceRegistry>,
}

impl RfControlServiceImpl {
    pub fn new(registry: Arc<DeviceRegistry>) -> Self {
        Self { registry }
    }
}

/// Server wall-clock time in Unix seconds.
///
/// Stamped on every response regardless of outcome. Falls back to 0 only if
/// the clock reads before the epoch.
fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[tonic::async_trait]
impl RfControlService for RfControlServiceImpl {
    async fn set_rf_settings(
        &self,
        request: Request<RfConfig>,
    ) -> Result<Response<RfResponse>, Status> {
        let config = request.into_inner();
        let timestamp = unix_timestamp();
        tracing::info!(device_id = %config.device_id, "SetRFSettings");

        if config.device_id.is_empty() {
            tracing::warn!("configuration request without a device id");
            return Ok(Response::new(RfResponse {
                success: false,
                message: RfError::MissingDeviceId.to_string(),
                status: None,
                timestamp,
            }));
        }

        let device_id = config.device_id.clone();
        let handle = self.registry.get_or_create(&device_id).await;
        let update = config.to_domain();

        match handle.apply_config(&update).await {
            Ok((message, status)) => Ok(Response::new(RfResponse {
                success: true,
                message,
                status: Some(status.into()),
                timestamp,
            })),
            Err(err) if err.is_validation() || err.is_unreachable() => {
                tracing::warn!(device_id = %device_id, error = %err, "configuration rejected");
                // Attach the device's unchanged state so the client sees
                // what it is still running with.
                let status = handle.status().await.ok().map(Into::into);
                Ok(Response::new(RfResponse {
                    success: false,
                    message: err.to_string(),
                    status,
                    timestamp,
                }))
            }
            Err(err) => {
                tracing::error!(device_id = %device_id, error = %err, "configuration failed");
                Err(map_rf_error_to_status(err))
            }
        }
    }

    async fn get_device_status(
        &self,
        request: Request<DeviceRequest>,
    ) -> Result<Response<DeviceStatus>, Status> {
        let req = request.into_inner();
        tracing::debug!(device_id = %req.device_id, "GetDeviceStatus");

        if req.device_id.is_empty() {
            return Err(map_rf_error_to_status(RfError::MissingDeviceId));
        }

        let handle = self.registry.get_or_create(&req.device_id).await;
        let snapshot = handle.status().await.map_rf_err()?;
        Ok(Response::new(snapshot.into()))
    }

    async fn get_device_info(
        &self,
        request: Request<DeviceRequest>,
    ) -> Result<Response<DeviceInfo>, Status> {
        let req = request.into_inner();
        tracing::debug!(device_id = %req.device_id, "GetDeviceInfo");

        if req.device_id.is_empty() {
            return Err(map_rf_error_to_status(RfError::MissingDeviceId));
        }

        let handle = self.registry.get_or_create(&req.device_id).await;
        let specs = handle.info().await.map_rf_err()?;
        Ok(Response::new(device_info(req.device_id, specs)))
    }
}
