//! Validation of user input that ends up inside API paths

use crate::error::{GandiError, Result};
use regex::Regex;

/// Record types accepted by LiveDNS
pub const RECORD_TYPES: &[&str] = &[
    "A", "AAAA", "ALIAS", "CAA", "CDS", "CNAME", "DNAME", "DS", "KEY", "LOC", "MX", "NAPTR",
    "NS", "OPENPGPKEY", "PTR", "RP", "SPF", "SRV", "SSHFP", "TLSA", "TXT", "WKS",
];

pub const MIN_TTL: u32 = 300;
pub const MAX_TTL: u32 = 2_592_000;

const TLD_PATTERN: &str = r"^[a-z]{2,63}$";
const FQDN_CHARS_PATTERN: &str = r"^[a-z0-9.-]+$";
const RECORD_LABEL_PATTERN: &str = r"^_?[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$";

/// Validator for FQDNs, record names and record types
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainValidator;

impl DomainValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Normalize and validate a fully-qualified domain name
    pub fn validate_fqdn(&self, domain: &str) -> Result<String> {
        let domain = self.normalize(domain);

        if domain.is_empty() {
            return Err(GandiError::validation("Domain name cannot be empty"));
        }

        if domain.len() > 253 {
            return Err(GandiError::validation("Domain name too long (max 253 characters)"));
        }

        if domain.len() < 3 {
            return Err(GandiError::validation("Domain name too short (min 3 characters)"));
        }

        if !compile(FQDN_CHARS_PATTERN)?.is_match(&domain) {
            return Err(GandiError::validation(format!(
                "Domain '{}' contains invalid characters",
                domain
            )));
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return Err(GandiError::validation("Domain must have at least one dot"));
        }

        for label in &labels {
            if label.is_empty() {
                return Err(GandiError::validation("Domain label cannot be empty"));
            }
            if label.len() > 63 {
                return Err(GandiError::validation("Domain label too long (max 63 characters)"));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(GandiError::validation(
                    "Domain label cannot start or end with hyphen",
                ));
            }
        }

        let tld = labels[labels.len() - 1];
        if !compile(TLD_PATTERN)?.is_match(tld) {
            return Err(GandiError::validation(format!("Invalid TLD '{}'", tld)));
        }

        Ok(domain)
    }

    /// Validate a record name (`@`, `*`, `www`, `_dmarc`, `resend._domainkey`, ...)
    ///
    /// Underscores are only allowed as the first character of a label.
    pub fn sanitize_record_name(&self, name: &str) -> Result<String> {
        let name = name.trim();

        if name.is_empty() {
            return Err(GandiError::validation("Record name cannot be empty"));
        }

        if name == "@" || name == "*" {
            return Ok(name.to_string());
        }

        if name.len() > 253 {
            return Err(GandiError::validation("Record name too long (max 253 characters)"));
        }

        if name.contains('/') || name.contains('\\') {
            return Err(crate::validation_error!(
                "Invalid record name '{}': path separators are not allowed",
                name
            ));
        }

        if name.contains("..") {
            return Err(crate::validation_error!(
                "Invalid record name '{}': consecutive dots",
                name
            ));
        }

        let record_label = compile(RECORD_LABEL_PATTERN)?;
        for (i, label) in name.split('.').enumerate() {
            if i == 0 && label == "*" {
                continue;
            }
            if label.len() > 63 {
                return Err(GandiError::validation(format!(
                    "Invalid record name '{}': label too long (max 63 characters)",
                    name
                )));
            }
            if !record_label.is_match(label) {
                return Err(GandiError::validation(format!(
                    "Invalid record name '{}': label '{}' must be letters, digits or hyphens, optionally starting with '_'",
                    name, label
                )));
            }
        }

        Ok(name.to_string())
    }

    /// Validate and uppercase a record type
    pub fn sanitize_record_type(&self, record_type: &str) -> Result<String> {
        let upper = record_type.trim().to_uppercase();
        if RECORD_TYPES.contains(&upper.as_str()) {
            Ok(upper)
        } else {
            Err(GandiError::validation(format!(
                "Unsupported record type '{}'. Supported: {}",
                record_type.trim(),
                RECORD_TYPES.join(", ")
            )))
        }
    }

    /// Check a TTL against the LiveDNS bounds
    pub fn validate_ttl(&self, ttl: u32) -> Result<u32> {
        if (MIN_TTL..=MAX_TTL).contains(&ttl) {
            Ok(ttl)
        } else {
            Err(GandiError::validation(format!(
                "TTL {} out of range ({}..={})",
                ttl, MIN_TTL, MAX_TTL
            )))
        }
    }

    /// Normalize domain name
    pub fn normalize(&self, domain: &str) -> String {
        domain.trim().trim_end_matches('.').to_lowercase()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| GandiError::internal(e.to_string()))
}

/// Base name of user input: everything before the first dot
pub fn base_name(input: &str) -> &str {
    let input = input.trim();
    match input.find('.') {
        Some(idx) => &input[..idx],
        None => input,
    }
}

/// Append `.com` to input without a TLD
pub fn with_default_tld(input: &str) -> String {
    let input = input.trim();
    if input.contains('.') {
        input.to_string()
    } else {
        format!("{}.com", input)
    }
}

/// Split a comma-separated TLD list, dropping blanks and leading dots
pub fn parse_tld_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
