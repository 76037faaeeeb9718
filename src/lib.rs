//! gandi-domains - registrar API toolkit
//!
//! Availability and pricing checks, DNS record management and name
//! suggestions built on the Gandi v5 REST API.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod suggest;
pub mod types;

// Re-export commonly used types
pub use api::{ApiClient, ApiResponse, ResponseData};
pub use config::{CheckerConfig, ConfigPaths, Credentials};
pub use error::{GandiError, Result};
pub use types::{
    DnsRecord, DomainDetail, DomainProduct, DomainSummary, ListDomainsOptions, NewDnsRecord,
    Organization, ProductList, ProductStatus, SuggestionRecord, SuggestionResult,
    VariationPattern,
};

// Re-export main functionality
pub use domain::{AvailabilityCheck, DomainChecker, DomainValidator};
pub use suggest::{generate_variations, SuggestOptions, SuggestProgress, SuggestionPipeline};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
