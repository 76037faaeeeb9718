//! Domain availability checking module

pub mod checker;
pub mod validator;

// Re-export main functionality
pub use checker::DomainChecker;
pub use validator::DomainValidator;

use crate::error::Result;
use crate::types::ProductList;
use async_trait::async_trait;

/// Anything that can answer an availability query for a set of FQDNs
#[async_trait]
pub trait AvailabilityCheck: Send + Sync {
    /// Check every domain in one request
    async fn check_availability(&self, domains: &[String]) -> Result<ProductList>;
}
