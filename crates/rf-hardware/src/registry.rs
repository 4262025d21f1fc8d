//! Device registry for runtime RF device management.
//!
//! The registry owns the mapping from device id to its record and driver.
//! Lookups are lazy: the first reference to an unknown id creates a record
//! with the configured simulator profile and a simulated driver, so
//! `get_or_create` never fails with "not found". Records live for the
//! process lifetime; there is no deregistration path.
//!
//! # Locking discipline
//!
//! Two layers, held briefly and never together across an await on driver
//! work:
//!
//! - The registry map sits behind an `RwLock` taken only to look up or
//!   insert a handle (read first, write with a double-check on the miss
//!   path so concurrent creators converge on one handle).
//! - Each [`DeviceHandle`] guards its record + driver pair with its own
//!   `Mutex`. Operations on one device are strictly serialized; operations
//!   on distinct devices never contend.

use rf_core::driver::RfDriver;
use rf_core::error::RfResult;
use rf_core::record::{
    ConfigUpdate, DeviceRecord, DeviceSpecs, StatusSnapshot, STATUS_CONFIG_ERROR,
};
use rf_driver_sim::{DeviceProfile, SimulatedDriver};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

// =============================================================================
// Simulator Settings
// =============================================================================

/// How the registry builds drivers for lazily created devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Base seed for deterministic simulation. Each device derives its own
    /// seed from this and its id, so distinct devices still behave
    /// independently under one seed.
    pub seed: Option<u64>,
    /// Profile applied to every lazily created device.
    pub profile: DeviceProfile,
}

/// Mix a device id into the base seed.
///
/// `DefaultHasher::new()` uses fixed keys, so the derivation is stable for
/// the life of the process — which is all determinism-under-seed needs.
fn derive_seed(base: u64, device_id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    device_id.hash(&mut hasher);
    base ^ hasher.finish()
}

// =============================================================================
// Device Handle
// =============================================================================

struct DeviceCell {
    record: DeviceRecord,
    driver: Box<dyn RfDriver>,
}

/// One device's record + driver pair behind its own lock.
///
/// All mutation and all reads of the record go through these methods, each
/// of which holds the per-device lock for the whole operation. That gives
/// apply-or-reject atomicity for free: a reader can observe the state
/// before or after an update, never between two of its fields.
pub struct DeviceHandle {
    cell: Mutex<DeviceCell>,
}

impl DeviceHandle {
    fn new(record: DeviceRecord, driver: Box<dyn RfDriver>) -> Self {
        Self {
            cell: Mutex::new(DeviceCell { record, driver }),
        }
    }

    /// Apply a configuration update and return the change summary together
    /// with a fresh status snapshot.
    ///
    /// On a validation failure the record keeps its tuning state but its
    /// narration flips to a configuration-error message, matching what a
    /// later status read should say about the device.
    pub async fn apply_config(&self, update: &ConfigUpdate) -> RfResult<(String, StatusSnapshot)> {
        let mut cell = self.cell.lock().await;
        let DeviceCell { record, driver } = &mut *cell;

        match driver.apply_config(record, update).await {
            Ok(message) => {
                let status = driver.read_status(record).await?;
                Ok((message, status))
            }
            Err(err) => {
                if err.is_validation() {
                    record.status_message = STATUS_CONFIG_ERROR.to_string();
                }
                Err(err)
            }
        }
    }

    /// Read the device's current status.
    pub async fn status(&self) -> RfResult<StatusSnapshot> {
        let mut cell = self.cell.lock().await;
        let DeviceCell { record, driver } = &mut *cell;
        driver.read_status(record).await
    }

    /// Read the device's immutable capability and identity data.
    pub async fn info(&self) -> RfResult<DeviceSpecs> {
        let cell = self.cell.lock().await;
        cell.driver.read_info(&cell.record).await
    }

    /// Name of the driver backing this device.
    pub async fn driver_type(&self) -> &'static str {
        self.cell.lock().await.driver.driver_type()
    }
}

// =============================================================================
// Device Registry
// =============================================================================

/// Central, owned registry of RF devices.
///
/// Constructed once at startup and shared behind an `Arc`; tests build
/// isolated registries of their own instead of reaching for global state.
pub struct DeviceRegistry {
    devices: RwLock<HashMap<String, Arc<DeviceHandle>>>,
    sim: SimulatorSettings,
}

impl DeviceRegistry {
    /// Create a registry that backs unknown devices with the given
    /// simulator settings.
    pub fn new(sim: SimulatorSettings) -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            sim,
        }
    }

    /// Deterministic registry for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimulatorSettings {
            seed: Some(seed),
            profile: DeviceProfile::default(),
        })
    }

    /// Look up a device, creating it on first reference.
    ///
    /// Never fails: an unknown id gets a simulated driver and a record built
    /// from the configured profile.
    pub async fn get_or_create(&self, device_id: &str) -> Arc<DeviceHandle> {
        if let Some(handle) = self.devices.read().await.get(device_id) {
            return handle.clone();
        }

        let mut devices = self.devices.write().await;
        // Another task may have created it between the read and the write.
        if let Some(handle) = devices.get(device_id) {
            return handle.clone();
        }

        let driver = match self.sim.seed {
            Some(base) => SimulatedDriver::with_seed(derive_seed(base, device_id)),
            None => SimulatedDriver::new(),
        };
        let record = driver.create_record(device_id, &self.sim.profile);
        tracing::info!(
            device_id,
            driver = driver.driver_type(),
            serial = %record.specs.serial_number,
            "creating device record"
        );

        let handle = Arc::new(DeviceHandle::new(record, Box::new(driver)));
        devices.insert(device_id.to_string(), handle.clone());
        handle
    }

    /// Attach a specific driver and record for a known device id.
    ///
    /// This is the seam a hardware deployment uses to wire a real driver to
    /// a named device before serving; ids not attached here still
    /// lazy-create as simulated. Replaces any existing entry for the id.
    pub async fn attach(
        &self,
        device_id: &str,
        record: DeviceRecord,
        driver: Box<dyn RfDriver>,
    ) -> Arc<DeviceHandle> {
        let handle = Arc::new(DeviceHandle::new(record, driver));
        self.devices
            .write()
            .await
            .insert(device_id.to_string(), handle.clone());
        handle
    }

    /// Check if a device id has been referenced yet.
    pub async fn contains(&self, device_id: &str) -> bool {
        self.devices.read().await.contains_key(device_id)
    }

    /// Count of devices created so far.
    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    /// True before the first device reference.
    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    /// Ids of all devices created so far, in no particular order.
    pub async fn device_ids(&self) -> Vec<String> {
        self.devices.read().await.keys().cloned().collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
