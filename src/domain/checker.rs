//! Domain availability checker

use crate::api::{ApiClient, API_PREFIX};
use crate::domain::AvailabilityCheck;
use crate::error::Result;
use crate::types::ProductList;
use async_trait::async_trait;
use std::time::Instant;

/// Availability and pricing lookups through the registrar API
#[derive(Debug, Clone)]
pub struct DomainChecker {
    client: ApiClient,
}

impl DomainChecker {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Check one or many FQDNs in a single request.
    ///
    /// Names are sent as repeated `name` parameters without local syntax
    /// checks; the API reports bad names as products with `status = error`.
    pub async fn check<I, S>(&self, domains: I) -> Result<ProductList>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let query: Vec<(&str, String)> = domains.into_iter().map(|d| ("name", d.into())).collect();
        let endpoint = format!("{}/domain/check", API_PREFIX);
        let start = Instant::now();

        let products: ProductList = self.client.get(&endpoint, &query).await?.json()?;

        tracing::debug!(
            domains_requested = query.len(),
            products_returned = products.products.len(),
            duration_ms = %start.elapsed().as_millis(),
            "Availability check completed"
        );

        Ok(products)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl AvailabilityCheck for DomainChecker {
    async fn check_availability(&self, domains: &[String]) -> Result<ProductList> {
        self.check(domains.iter().cloned()).await
    }
}
