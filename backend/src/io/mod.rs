//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain.
//!
//! ## Supported Operations
//!
//! - **GET /api/vocabulary**: category and payment method lists
//! - **POST /api/expenses**, **POST /api/funding**: append a record
//! - **GET|POST /api/expenses/search**, **GET|POST /api/funding/search**: filter and total
//! - **POST /api/shutdown**: stop the server
//! - **GET /api/health**

pub mod rest;

pub use rest::*;
