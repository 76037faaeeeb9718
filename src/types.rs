//! Core types and structures for gandi-domains

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Availability status reported by the registrar for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductStatus {
    Available,
    Unavailable,
    Pending,
    Error,
    /// Any status string the registrar adds later
    Other(String),
}

impl From<String> for ProductStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "available" => ProductStatus::Available,
            "unavailable" => ProductStatus::Unavailable,
            "pending" => ProductStatus::Pending,
            "error" => ProductStatus::Error,
            _ => ProductStatus::Other(value),
        }
    }
}

impl From<ProductStatus> for String {
    fn from(status: ProductStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Available => write!(f, "available"),
            ProductStatus::Unavailable => write!(f, "unavailable"),
            ProductStatus::Pending => write!(f, "pending"),
            ProductStatus::Error => write!(f, "error"),
            ProductStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// One price entry of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub duration_unit: Option<String>,
    #[serde(default)]
    pub min_duration: Option<u32>,
    #[serde(default)]
    pub max_duration: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_after_taxes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_before_taxes: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub taxes: Option<f64>,
}

/// Availability result for one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProduct {
    pub name: String,
    pub status: ProductStatus,
    #[serde(default)]
    pub prices: Vec<Price>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub process: Vec<String>,
    #[serde(default)]
    pub tld: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub taxes_included: Option<bool>,
}

impl DomainProduct {
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }

    /// First price entry rendered as `"<amount> <currency>"`.
    ///
    /// Entries without a currency use `fallback_currency` (the list-level currency).
    pub fn price_label(&self, fallback_currency: Option<&str>) -> Option<String> {
        let price = self.prices.first()?;
        let amount = price.price_after_taxes?;
        let currency = price.currency.as_deref().or(fallback_currency)?;
        Some(format!("{} {}", amount, currency))
    }
}

/// Response of the availability endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<DomainProduct>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Name-variation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationPattern {
    Hyphenated,
    Abbreviated,
    Prefix,
    Suffix,
    Numbers,
}

impl VariationPattern {
    pub const ALL: [VariationPattern; 5] = [
        VariationPattern::Hyphenated,
        VariationPattern::Abbreviated,
        VariationPattern::Prefix,
        VariationPattern::Suffix,
        VariationPattern::Numbers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariationPattern::Hyphenated => "hyphenated",
            VariationPattern::Abbreviated => "abbreviated",
            VariationPattern::Prefix => "prefix",
            VariationPattern::Suffix => "suffix",
            VariationPattern::Numbers => "numbers",
        }
    }

    /// Capitalized name for headings
    pub fn label(&self) -> &'static str {
        match self {
            VariationPattern::Hyphenated => "Hyphenated",
            VariationPattern::Abbreviated => "Abbreviated",
            VariationPattern::Prefix => "Prefix",
            VariationPattern::Suffix => "Suffix",
            VariationPattern::Numbers => "Numbers",
        }
    }
}

impl std::fmt::Display for VariationPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariationPattern {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        VariationPattern::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown variation pattern: {}", s))
    }
}

/// Candidate base names per pattern. Every pattern has an entry.
pub type VariationSet = BTreeMap<VariationPattern, Vec<String>>;

/// A product projected for suggestion output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub domain: String,
    pub available: bool,
    pub status: ProductStatus,
    pub price: Option<String>,
    pub tld: Option<String>,
}

impl SuggestionRecord {
    pub fn from_product(product: &DomainProduct, fallback_currency: Option<&str>) -> Self {
        Self {
            domain: product.name.clone(),
            available: product.is_available(),
            status: product.status.clone(),
            price: product.price_label(fallback_currency),
            tld: product.tld.clone(),
        }
    }
}

/// Aggregated output of a suggestion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub exact: Vec<SuggestionRecord>,
    pub variations: BTreeMap<VariationPattern, Vec<SuggestionRecord>>,
}

impl SuggestionResult {
    /// Available exact matches plus every retained variation (those are all available)
    pub fn available_count(&self) -> usize {
        let exact = self.exact.iter().filter(|r| r.available).count();
        let variations: usize = self.variations.values().map(Vec::len).sum();
        exact + variations
    }
}

/// Organization returned by the auth smoke test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Lifecycle timestamps of a registered domain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainDates {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub registry_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub registry_ends_at: Option<DateTime<Utc>>,
}

/// Entry of the domain list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub fqdn: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tld: Option<String>,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub dates: DomainDates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoRenew {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub duration: Option<u32>,
}

/// Full domain record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDetail {
    pub fqdn: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tld: Option<String>,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub dates: DomainDates,
    #[serde(default)]
    pub nameservers: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub autorenew: Option<AutoRenew>,
}

/// LiveDNS record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub rrset_name: String,
    pub rrset_type: String,
    #[serde(default)]
    pub rrset_ttl: Option<u32>,
    #[serde(default)]
    pub rrset_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrset_href: Option<String>,
}

/// Record set to create
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDnsRecord {
    pub rrset_name: String,
    pub rrset_type: String,
    pub rrset_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrset_ttl: Option<u32>,
}

/// Paging and sorting for the domain list
#[derive(Debug, Clone, Default)]
pub struct ListDomainsOptions {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_by: Option<String>,
    pub sharing_id: Option<String>,
}

impl ListDomainsOptions {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by", sort_by.clone()));
        }
        if let Some(sharing_id) = &self.sharing_id {
            pairs.push(("sharing_id", sharing_id.clone()));
        }
        pairs
    }
}

/// Accepts a number or a numeric string; anything else becomes `None`
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts either a single string or a list of strings
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
