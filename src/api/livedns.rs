//! LiveDNS record endpoints
//!
//! Names and types are validated before they are placed in a path, so a
//! malformed name fails without a request being sent.

use super::client::{ApiClient, API_PREFIX};
use crate::error::Result;
use crate::types::{DnsRecord, NewDnsRecord};
use reqwest::Method;
use serde_json::json;
use tracing::info;

impl ApiClient {
    fn records_endpoint(&self, fqdn: &str) -> Result<String> {
        let fqdn = self.validator.validate_fqdn(fqdn)?;
        Ok(format!("{}/livedns/domains/{}/records", API_PREFIX, fqdn))
    }

    fn record_endpoint(&self, fqdn: &str, name: &str, record_type: &str) -> Result<String> {
        let base = self.records_endpoint(fqdn)?;
        let name = self.validator.sanitize_record_name(name)?;
        let record_type = self.validator.sanitize_record_type(record_type)?;
        Ok(format!("{}/{}/{}", base, name, record_type))
    }

    /// All record sets of a domain
    pub async fn list_dns_records(&self, fqdn: &str) -> Result<Vec<DnsRecord>> {
        let endpoint = self.records_endpoint(fqdn)?;
        self.get(&endpoint, &[]).await?.json()
    }

    /// One record set by name and type
    pub async fn get_dns_record(&self, fqdn: &str, name: &str, record_type: &str) -> Result<DnsRecord> {
        let endpoint = self.record_endpoint(fqdn, name, record_type)?;
        self.get(&endpoint, &[]).await?.json()
    }

    pub async fn create_dns_record(&self, fqdn: &str, record: &NewDnsRecord) -> Result<()> {
        let endpoint = self.records_endpoint(fqdn)?;
        let record = NewDnsRecord {
            rrset_name: self.validator.sanitize_record_name(&record.rrset_name)?,
            rrset_type: self.validator.sanitize_record_type(&record.rrset_type)?,
            rrset_values: record.rrset_values.clone(),
            rrset_ttl: record.rrset_ttl.map(|ttl| self.validator.validate_ttl(ttl)).transpose()?,
        };

        let body = serde_json::to_value(&record)?;
        self.request(Method::POST, &endpoint, Some(&body), &[]).await?;
        info!(fqdn = %fqdn, name = %record.rrset_name, record_type = %record.rrset_type, "DNS record created");
        Ok(())
    }

    /// Replace the values (and optionally the TTL) of a record set
    pub async fn update_dns_record(
        &self,
        fqdn: &str,
        name: &str,
        record_type: &str,
        values: &[String],
        ttl: Option<u32>,
    ) -> Result<()> {
        let endpoint = self.record_endpoint(fqdn, name, record_type)?;
        let mut body = json!({ "rrset_values": values });
        if let Some(ttl) = ttl {
            body["rrset_ttl"] = json!(self.validator.validate_ttl(ttl)?);
        }

        self.request(Method::PUT, &endpoint, Some(&body), &[]).await?;
        info!(fqdn = %fqdn, name = %name, record_type = %record_type, "DNS record updated");
        Ok(())
    }

    pub async fn delete_dns_record(&self, fqdn: &str, name: &str, record_type: &str) -> Result<()> {
        let endpoint = self.record_endpoint(fqdn, name, record_type)?;
        self.request(Method::DELETE, &endpoint, None, &[]).await?;
        info!(fqdn = %fqdn, name = %name, record_type = %record_type, "DNS record deleted");
        Ok(())
    }
}
