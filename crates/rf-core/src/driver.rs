//! The driver capability trait.
//!
//! A driver performs (or simulates) physical configuration changes on behalf
//! of one device record. The registry and the service depend only on this
//! trait, never on a concrete driver, so a real hardware binding can be
//! swapped in without touching either.
//!
//! # Contract
//!
//! - `apply_config` validates every provided field against the record's
//!   capability bounds before writing anything; one bad field rejects the
//!   whole call and leaves the record unchanged. An empty update is a
//!   status refresh, not an error.
//! - `read_status` is non-mutating from the caller's point of view, but a
//!   driver may refresh passively evolving state (temperature) while
//!   serving it.
//! - `read_info` never fails for a reachable device; the specs are fixed at
//!   creation.
//! - External drivers bound every hardware round-trip by
//!   [`crate::limits::HARDWARE_TIMEOUT`] and surface
//!   [`crate::error::RfError::DeviceUnreachable`] on probe failure or
//!   timeout rather than returning stale data.
//!
//! # Thread safety
//!
//! All methods take `&self`; drivers keep any private state behind interior
//! mutability. The registry serializes calls per device, so a driver never
//! sees two concurrent operations on the same record.

use crate::error::RfResult;
use crate::record::{ConfigUpdate, DeviceRecord, DeviceSpecs, StatusSnapshot};
use async_trait::async_trait;

/// Capability: perform physical RF configuration for one device.
#[async_trait]
pub trait RfDriver: Send + Sync {
    /// Short machine-readable driver name, e.g. "simulated" or "uhd".
    fn driver_type(&self) -> &'static str;

    /// Validate and apply a configuration update atomically.
    ///
    /// On success, returns a human-readable summary of the fields actually
    /// changed ("Frequency set to 2.400 GHz; Gain set to 20.0 dB"), or a
    /// no-changes message for an empty update.
    async fn apply_config(
        &self,
        record: &mut DeviceRecord,
        update: &ConfigUpdate,
    ) -> RfResult<String>;

    /// Read the device's current status, refreshing any passively evolving
    /// state first.
    async fn read_status(&self, record: &mut DeviceRecord) -> RfResult<StatusSnapshot>;

    /// Read the immutable capability and identity data.
    async fn read_info(&self, record: &DeviceRecord) -> RfResult<DeviceSpecs>;
}
