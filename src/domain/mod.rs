//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: domain types handed to callers
//! - `wire.rs`: raw serde structs matching the service payloads
//! - `convert.rs`: conversions between the two
//! - `state.rs`: session state with update methods
//! - `client.rs`: sub-client with the network-facing operations

pub mod inscription;
