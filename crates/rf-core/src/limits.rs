//! Centralized timeout constants.
//!
//! Keeping durations in one module ensures the service and the drivers agree
//! on how long anything is allowed to block, and makes tuning a one-line
//! change.

use std::time::Duration;

/// Upper bound on a single RPC handler (15 seconds).
///
/// Generous because a real hardware round-trip can be slow; the per-request
/// task is cancelled past this point rather than hanging its caller.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(15);

/// Upper bound on one hardware round-trip for an external driver (5 seconds).
///
/// Simulated drivers never block on I/O and ignore this. An external driver
/// that exceeds it fails the request with a `DeviceUnreachable` error
/// instead of stalling the per-device lock.
pub const HARDWARE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for graceful shutdown of the listener (2 seconds).
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
