//! Core domain types
//!
//! These types describe a job from the client's point of view: the handle
//! returned on submission, the status reported while polling, and the result
//! handed back once the job completes.

pub mod job;
pub mod result;
