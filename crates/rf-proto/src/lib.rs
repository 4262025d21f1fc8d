//! Protocol buffer definitions and conversions for rf-control.
//!
//! This crate contains:
//! - Generated protobuf types from `proto/rfcontrol.proto`
//! - Conversion impls between proto types and domain types in `rf-core`
//!
//! The proto types are kept separate from domain types so the registry and
//! drivers never see transport-layer shapes, and conversions live in one
//! place.

#![allow(missing_docs)] // Generated code doesn't have docs

pub mod convert;

/// Generated RF control protocol buffer types.
pub mod rfcontrol {
    tonic::include_proto!("rfcontrol");
}

// Re-export commonly used types at crate root
pub use rfcontrol::*;
