//! Registrar REST API access
//!
//! `client` owns authentication and response normalization; the other
//! modules add typed helpers per endpoint family.

pub mod client;
pub mod domains;
pub mod livedns;

pub use client::{ApiClient, ApiResponse, ResponseData, API_PREFIX};
