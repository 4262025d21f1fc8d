//! Conversions between wire types and `rf-core` domain types.

use crate::rfcontrol;
use rf_core::record::{ConfigUpdate, DeviceSpecs, StatusSnapshot};

/// Trait for converting proto types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> T;
}

// Proto -> Domain

impl ToDomain<ConfigUpdate> for rfcontrol::RfConfig {
    fn to_domain(self) -> ConfigUpdate {
        ConfigUpdate {
            frequency: self.frequency,
            gain: self.gain,
            bandwidth: self.bandwidth,
            antenna: self.antenna,
        }
    }
}

// Domain -> Proto

impl From<StatusSnapshot> for rfcontrol::DeviceStatus {
    fn from(snap: StatusSnapshot) -> Self {
        rfcontrol::DeviceStatus {
            device_id: snap.device_id,
            connected: snap.connected,
            current_frequency: snap.frequency,
            current_gain: snap.gain,
            current_bandwidth: snap.bandwidth,
            current_antenna: snap.antenna,
            temperature: snap.temperature,
            status_message: snap.status_message,
        }
    }
}

/// Build the wire-level info message for a device from its specs.
///
/// The antenna port list is a domain-side detail; the info message carries
/// only the identity and range fields the schema defines.
pub fn device_info(device_id: impl Into<String>, specs: DeviceSpecs) -> rfcontrol::DeviceInfo {
    rfcontrol::DeviceInfo {
        device_id: device_id.into(),
        manufacturer: specs.manufacturer,
        model: specs.model,
        serial_number: specs.serial_number,
        firmware_version: specs.firmware_version,
        min_frequency: specs.min_frequency,
        max_frequency: specs.max_frequency,
        min_gain: specs.min_gain,
        max_gain: specs.max_gain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rf_config_presence_maps_to_options() {
        let config = rfcontrol::RfConfig {
            device_id: "usrp0".into(),
            frequency: Some(2.4e9),
            gain: None,
            bandwidth: Some(20e6),
            antenna: None,
        };
        let update = config.to_domain();
        assert_eq!(update.frequency, Some(2.4e9));
        assert_eq!(update.gain, None);
        assert_eq!(update.bandwidth, Some(20e6));
        assert_eq!(update.antenna, None);
    }

    #[test]
    fn snapshot_maps_to_current_fields() {
        let snap = StatusSnapshot {
            device_id: "usrp0".into(),
            connected: true,
            frequency: 2.4e9,
            gain: 20.0,
            bandwidth: 20e6,
            antenna: "TX/RX".into(),
            temperature: 25.3,
            status_message: "Device operational".into(),
        };
        let status = rfcontrol::DeviceStatus::from(snap);
        assert!(status.connected);
        assert_eq!(status.current_frequency, 2.4e9);
        assert_eq!(status.current_antenna, "TX/RX");
        assert_eq!(status.status_message, "Device operational");
    }

    #[test]
    fn device_info_carries_identity_and_ranges() {
        let specs = DeviceSpecs {
            manufacturer: "Ettus Research".into(),
            model: "USRP B200".into(),
            serial_number: "SN654321".into(),
            firmware_version: "4.1.0".into(),
            min_frequency: 70e6,
            max_frequency: 6e9,
            min_gain: -20.0,
            max_gain: 76.0,
            antennas: vec!["TX/RX".into(), "RX2".into()],
        };
        let info = device_info("usrp0", specs);
        assert_eq!(info.device_id, "usrp0");
        assert_eq!(info.model, "USRP B200");
        assert_eq!(info.min_frequency, 70e6);
        assert_eq!(info.max_gain, 76.0);
    }
}
