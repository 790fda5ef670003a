//! Inbound adapters translating transport requests into driving port calls.

#[cfg(feature = "grpc")]
pub mod grpc;
pub mod http;
