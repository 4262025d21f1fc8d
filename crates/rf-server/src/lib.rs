//! gRPC server for rf-control.
//!
//! Wires the device registry to the wire-level `RFControlService` and runs
//! the tonic serving loop. The service façade itself is thin: resolve the
//! device, delegate to its driver, translate the outcome.

pub mod grpc;

pub use grpc::server::{RfControlServer, ServerSettings};
pub use grpc::RfControlServiceImpl;
