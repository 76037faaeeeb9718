//! Domain and organization endpoints

use super::client::{ApiClient, API_PREFIX};
use crate::error::Result;
use crate::types::{DomainDetail, DomainSummary, ListDomainsOptions, Organization};

impl ApiClient {
    /// Auth smoke test: the organizations visible to the token
    pub async fn test_auth(&self) -> Result<Vec<Organization>> {
        let endpoint = format!("{}/organization/organizations", API_PREFIX);
        self.get(&endpoint, &[]).await?.json()
    }

    /// Domains owned by the account, one page at a time
    pub async fn list_domains(&self, options: &ListDomainsOptions) -> Result<Vec<DomainSummary>> {
        let endpoint = format!("{}/domain/domains", API_PREFIX);
        self.get(&endpoint, &options.query_pairs()).await?.json()
    }

    /// Details of one registered domain
    pub async fn get_domain(&self, fqdn: &str) -> Result<DomainDetail> {
        let fqdn = self.validator.validate_fqdn(fqdn)?;
        let endpoint = format!("{}/domain/domains/{}", API_PREFIX, fqdn);
        self.get(&endpoint, &[]).await?.json()
    }
}
