//! Registry lifecycle and concurrency integration tests.
//!
//! The serialization discipline is the registry's main contract: one writer
//! at a time per device, no cross-device contention. These tests exercise
//! it with real tasks racing on real handles.

use async_trait::async_trait;
use rf_core::driver::RfDriver;
use rf_core::error::RfResult;
use rf_core::record::{ConfigUpdate, DeviceRecord, DeviceSpecs, StatusSnapshot};
use rf_driver_sim::{DeviceProfile, SimulatedDriver};
use rf_hardware::DeviceRegistry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Test driver that holds the per-device lock for a configurable delay.
struct SlowDriver {
    delay: Duration,
}

#[async_trait]
impl RfDriver for SlowDriver {
    fn driver_type(&self) -> &'static str {
        "slow-test"
    }

    async fn apply_config(
        &self,
        record: &mut DeviceRecord,
        update: &ConfigUpdate,
    ) -> RfResult<String> {
        tokio::time::sleep(self.delay).await;
        record.validate(update)?;
        let changes = record.apply(update, chrono::Utc::now());
        Ok(changes.join("; "))
    }

    async fn read_status(&self, record: &mut DeviceRecord) -> RfResult<StatusSnapshot> {
        tokio::time::sleep(self.delay).await;
        Ok(record.snapshot())
    }

    async fn read_info(&self, record: &DeviceRecord) -> RfResult<DeviceSpecs> {
        Ok(record.specs.clone())
    }
}

fn sim_record(device_id: &str) -> DeviceRecord {
    SimulatedDriver::with_seed(0).create_record(device_id, &DeviceProfile::default())
}

#[tokio::test]
async fn concurrent_same_device_sets_have_one_winner() {
    let registry = Arc::new(DeviceRegistry::with_seed(7));

    let submitted: Vec<(f64, f64)> = (0..8)
        .map(|i| (1e9 + i as f64 * 1e8, i as f64))
        .collect();

    let mut tasks = Vec::new();
    for &(freq, gain) in &submitted {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            let handle = registry.get_or_create("usrp0").await;
            let update = ConfigUpdate {
                frequency: Some(freq),
                gain: Some(gain),
                ..Default::default()
            };
            handle.apply_config(&update).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let status = registry.get_or_create("usrp0").await.status().await.unwrap();
    // Exactly one submission wins, and its fields arrive together: a
    // frequency from one call paired with a gain from another would mean a
    // torn write.
    assert!(
        submitted
            .iter()
            .any(|&(f, g)| status.frequency == f && status.gain == g),
        "final state ({}, {}) is not one of the submitted pairs",
        status.frequency,
        status.gain
    );
}

#[tokio::test]
async fn concurrent_creates_converge_on_one_handle() {
    let registry = Arc::new(DeviceRegistry::with_seed(7));

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(
            async move { registry.get_or_create("usrp0").await },
        ));
    }

    let mut handles = Vec::new();
    for task in tasks {
        handles.push(task.await.unwrap());
    }
    assert_eq!(registry.len().await, 1);
    for handle in &handles[1..] {
        assert!(Arc::ptr_eq(&handles[0], handle));
    }
}

#[tokio::test]
async fn distinct_devices_do_not_block_each_other() {
    let registry = Arc::new(DeviceRegistry::with_seed(7));

    registry
        .attach(
            "slow0",
            sim_record("slow0"),
            Box::new(SlowDriver {
                delay: Duration::from_millis(250),
            }),
        )
        .await;
    let slow = registry.get_or_create("slow0").await;
    let fast = registry.get_or_create("fast0").await;

    // Occupy slow0's lock for the duration of its read.
    let slow_task = tokio::spawn(async move { slow.status().await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let started = Instant::now();
    fast.status().await.unwrap();
    let elapsed = started.elapsed();

    assert!(
        elapsed < Duration::from_millis(100),
        "operation on fast0 waited {:?} behind slow0",
        elapsed
    );
    slow_task.await.unwrap().unwrap();
}

#[tokio::test]
async fn same_device_operations_are_serialized() {
    let registry = Arc::new(DeviceRegistry::with_seed(7));
    registry
        .attach(
            "slow0",
            sim_record("slow0"),
            Box::new(SlowDriver {
                delay: Duration::from_millis(100),
            }),
        )
        .await;

    let handle = registry.get_or_create("slow0").await;
    let started = Instant::now();
    let first = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.status().await })
    };
    let second = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.status().await })
    };
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    // Two 100 ms reads on one device cannot overlap.
    assert!(
        started.elapsed() >= Duration::from_millis(200),
        "same-device operations overlapped: {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn attached_driver_serves_named_device_only() {
    let registry = Arc::new(DeviceRegistry::with_seed(7));
    registry
        .attach(
            "hw0",
            sim_record("hw0"),
            Box::new(SlowDriver {
                delay: Duration::from_millis(1),
            }),
        )
        .await;

    assert_eq!(registry.get_or_create("hw0").await.driver_type().await, "slow-test");
    assert_eq!(
        registry.get_or_create("other").await.driver_type().await,
        "simulated"
    );
}
