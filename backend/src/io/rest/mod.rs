//! # REST API Interface Layer
//!
//! Translates form-encoded HTTP requests into domain operations and domain
//! results into JSON. Validation errors become 400, storage failures 500.

pub mod lifecycle_apis;
pub mod mappers;
pub mod record_apis;

pub use lifecycle_apis::*;
pub use record_apis::*;
