//! LlamaHair Core
//!
//! Wire and domain types for the LlamaHair asynchronous prompt API.
//!
//! This crate contains:
//! - Domain types: job handles, job statuses and the caller-visible job result
//! - DTOs: request/response bodies exchanged with the service
//!
//! Note: no I/O lives here. Signing, submission and polling live in `llamahair-client`.

pub mod domain;
pub mod dto;
