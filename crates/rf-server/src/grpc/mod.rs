//! gRPC layer: service implementation, error mapping, and the server loop.

pub mod error_mapping;
pub mod rf_control_service;
pub mod server;

pub use error_mapping::{map_rf_error_to_status, RfResultExt};
pub use rf_control_service::RfControlServiceImpl;
pub use server::{GrpcSettings, RfControlServer, ServerSettings};
