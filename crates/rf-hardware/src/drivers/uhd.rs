//! UHD hardware driver seam.
//!
//! A placeholder that satisfies the driver contract where a real UHD
//! binding will attach: every operation probes the hardware link first,
//! bounded by the shared hardware timeout, and surfaces
//! `DeviceUnreachable` instead of hanging or returning stale data. Until a
//! binding is linked the probe always fails, so a device attached with this
//! driver reports unreachable rather than pretending to be configured.

use async_trait::async_trait;
use chrono::Utc;
use rf_core::driver::RfDriver;
use rf_core::error::{RfError, RfResult};
use rf_core::limits::HARDWARE_TIMEOUT;
use rf_core::record::{
    ConfigUpdate, DeviceRecord, DeviceSpecs, StatusSnapshot, NO_CHANGES_MESSAGE,
    STATUS_DISCONNECTED,
};
use std::time::Duration;

/// Driver for a UHD-managed software radio peripheral.
pub struct UhdDriver {
    /// UHD device address arguments, e.g. "type=b200" or "addr=192.168.10.2".
    device_args: String,
    timeout: Duration,
}

impl UhdDriver {
    pub fn new(device_args: impl Into<String>) -> Self {
        Self {
            device_args: device_args.into(),
            timeout: HARDWARE_TIMEOUT,
        }
    }

    /// Override the hardware round-trip timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Confirm the hardware link before touching the record.
    ///
    /// A real binding opens (or reuses) a UHD session for `device_args`
    /// here. Without one, the probe reports the link as down.
    async fn probe(&self, device_id: &str) -> RfResult<()> {
        let probe = async {
            Err::<(), _>(RfError::DeviceUnreachable {
                device_id: device_id.to_string(),
                reason: format!(
                    "no UHD session for '{}': hardware binding not linked",
                    self.device_args
                ),
            })
        };

        match tokio::time::timeout(self.timeout, probe).await {
            Ok(result) => result,
            Err(_) => Err(RfError::DeviceUnreachable {
                device_id: device_id.to_string(),
                reason: format!(
                    "hardware round-trip exceeded {} ms",
                    self.timeout.as_millis()
                ),
            }),
        }
    }
}

#[async_trait]
impl RfDriver for UhdDriver {
    fn driver_type(&self) -> &'static str {
        "uhd"
    }

    async fn apply_config(
        &self,
        record: &mut DeviceRecord,
        update: &ConfigUpdate,
    ) -> RfResult<String> {
        let device_id = record.device_id.clone();
        if let Err(err) = self.probe(&device_id).await {
            record.connected = false;
            record.status_message = STATUS_DISCONNECTED.to_string();
            return Err(err);
        }
        record.connected = true;

        record.validate(update)?;
        if update.is_empty() {
            return Ok(NO_CHANGES_MESSAGE.to_string());
        }

        // A real binding pushes each field to the device here before
        // recording it; the record mirrors confirmed hardware state.
        let changes = record.apply(update, Utc::now());
        Ok(changes.join("; "))
    }

    async fn read_status(&self, record: &mut DeviceRecord) -> RfResult<StatusSnapshot> {
        let device_id = record.device_id.clone();
        if let Err(err) = self.probe(&device_id).await {
            record.connected = false;
            record.status_message = STATUS_DISCONNECTED.to_string();
            return Err(err);
        }
        record.connected = true;
        Ok(record.snapshot())
    }

    async fn read_info(&self, record: &DeviceRecord) -> RfResult<DeviceSpecs> {
        self.probe(&record.device_id).await?;
        Ok(record.specs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::record::InitialState;

    fn record() -> DeviceRecord {
        let specs = DeviceSpecs {
            manufacturer: "Ettus Research".into(),
            model: "USRP B200".into(),
            serial_number: "SN000001".into(),
            firmware_version: "4.1.0".into(),
            min_frequency: 70e6,
            max_frequency: 6e9,
            min_gain: -20.0,
            max_gain: 76.0,
            antennas: vec!["TX/RX".into(), "RX2".into()],
        };
        DeviceRecord::new("usrp0", specs, InitialState::default())
    }

    #[tokio::test]
    async fn unlinked_driver_reports_unreachable() {
        let driver = UhdDriver::new("type=b200");
        let mut rec = record();

        let err = driver.read_status(&mut rec).await.unwrap_err();
        assert!(err.is_unreachable());
        assert!(!rec.connected);
        assert_eq!(rec.status_message, STATUS_DISCONNECTED);

        let update = ConfigUpdate {
            frequency: Some(1e9),
            ..Default::default()
        };
        let err = driver.apply_config(&mut rec, &update).await.unwrap_err();
        assert!(err.is_unreachable());
        // Nothing applied through a dead link.
        assert_eq!(rec.frequency, 2.4e9);
    }
}
