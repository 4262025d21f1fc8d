//! Hardware driver wiring.
//!
//! The registry backs unknown devices with the simulated driver from
//! `rf-driver-sim`. Real hardware drivers live here behind feature flags
//! and are attached to named devices via `DeviceRegistry::attach`.

#[cfg(feature = "uhd")]
pub mod uhd;
