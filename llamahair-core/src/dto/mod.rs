//! Data Transfer Objects exchanged with the LlamaHair service
//!
//! Field names follow the service's JSON wire format.

pub mod job;
pub mod webhook;
