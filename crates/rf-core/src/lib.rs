//! Core types and traits for rf-control.
//!
//! This crate holds everything the rest of the workspace shares and nothing
//! it shouldn't: the device record and its validation logic, the error
//! taxonomy, the driver capability trait, and centralized limits. There is
//! deliberately no I/O and no transport coupling here — the gRPC layer and
//! the concrete drivers live in their own crates and depend on this one.

pub mod driver;
pub mod error;
pub mod limits;
pub mod record;

pub use driver::RfDriver;
pub use error::{ConfigField, RfError, RfResult};
pub use record::{ConfigUpdate, DeviceRecord, DeviceSpecs, StatusSnapshot};
