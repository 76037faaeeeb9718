//! Configuration loading: credentials and domain-checker defaults

use crate::error::{GandiError, Result};
use crate::types::VariationPattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Registrar API origin used when no `api_url` file is configured
pub const DEFAULT_API_URL: &str = "https://api.gandi.net";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "GANDI_CONFIG_DIR";

const TOKEN_FILE: &str = "api_token";
const URL_FILE: &str = "api_url";
const CHECKER_FILE: &str = "domain-checker-defaults.json";

/// Locations of the configuration files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$GANDI_CONFIG_DIR`, else `~/.config/gandi`
    pub fn from_env() -> Self {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Self::new(dir);
        }
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(home.join(".config").join("gandi"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn token_file(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    pub fn url_file(&self) -> PathBuf {
        self.dir.join(URL_FILE)
    }

    pub fn checker_file(&self) -> PathBuf {
        self.dir.join(CHECKER_FILE)
    }
}

/// Bearer token and API origin, fixed for the process lifetime
#[derive(Clone)]
pub struct Credentials {
    token: String,
    api_url: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: api_url.into(),
        }
    }

    /// Read the token (required) and the API URL (optional) from `paths`
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        let token = read_token(&paths.token_file())?;
        let api_url = read_api_url(&paths.url_file());
        debug!(api_url = %api_url, "Loaded credentials");
        Ok(Self { token, api_url })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn read_token(path: &Path) -> Result<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(GandiError::config(format!(
                "Token file not found at {path}\nCreate it with: echo \"YOUR_PAT\" > {path} && chmod 600 {path}",
                path = path.display()
            )));
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(crate::config_error!(
                "Cannot read token file. Check permissions: chmod 600 {}",
                path.display()
            ));
        }
        Err(e) => {
            return Err(crate::config_error!(
                "Cannot read token file {}: {}",
                path.display(),
                e
            ));
        }
    };

    let token = content.trim();
    if token.is_empty() {
        return Err(crate::config_error!("Token file is empty: {}", path.display()));
    }
    Ok(token.to_string())
}

fn read_api_url(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => DEFAULT_API_URL.to_string(),
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                debug!(path = %path.display(), error = %e, "Ignoring unreadable API URL file");
            }
            DEFAULT_API_URL.to_string()
        }
    }
}

/// How configured TLD lists combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TldMode {
    #[default]
    Extend,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TldConfig {
    pub mode: TldMode,
    pub defaults: Vec<String>,
    pub custom: Vec<String>,
}

impl Default for TldConfig {
    fn default() -> Self {
        Self {
            mode: TldMode::Extend,
            defaults: ["com", "net", "org", "io", "dev", "app", "ai", "co"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            custom: Vec::new(),
        }
    }
}

impl TldConfig {
    /// TLDs for the exact-match stream.
    ///
    /// `replace` only takes effect with a non-empty custom list.
    pub fn resolve(&self) -> Vec<String> {
        if self.mode == TldMode::Replace && !self.custom.is_empty() {
            return self.custom.clone();
        }
        self.defaults.iter().chain(self.custom.iter()).cloned().collect()
    }

    /// TLDs each variation candidate is checked against
    pub fn primary(&self) -> Vec<String> {
        self.defaults.iter().take(3).cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VariationConfig {
    pub enabled: bool,
    pub patterns: BTreeSet<String>,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub max_numbers: u32,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            patterns: VariationPattern::ALL
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            prefixes: vec!["get".to_string(), "my".to_string(), "try".to_string()],
            suffixes: vec!["app".to_string(), "hq".to_string(), "hub".to_string()],
            max_numbers: 3,
        }
    }
}

impl VariationConfig {
    pub fn is_enabled(&self, pattern: VariationPattern) -> bool {
        self.patterns.contains(pattern.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateLimitConfig {
    /// Domains per exact-match request
    pub max_concurrent: usize,
    /// Pause between requests, in milliseconds
    pub delay_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 10,
            delay_ms: 100,
        }
    }
}

impl RateLimitConfig {
    /// Batch size, with 0 meaning the default of 10
    pub fn batch_size(&self) -> usize {
        if self.max_concurrent == 0 {
            10
        } else {
            self.max_concurrent
        }
    }

    /// Pause between requests, with 0 meaning the default of 100 ms
    pub fn delay(&self) -> std::time::Duration {
        if self.delay_ms == 0 {
            std::time::Duration::from_millis(100)
        } else {
            std::time::Duration::from_millis(self.delay_ms)
        }
    }
}

/// Defaults for the suggestion pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    pub tlds: TldConfig,
    pub variations: VariationConfig,
    pub rate_limit: RateLimitConfig,
}

impl CheckerConfig {
    /// Load from `paths`, falling back to the built-in defaults when the
    /// file is missing or invalid.
    pub fn load(paths: &ConfigPaths) -> Self {
        Self::load_from(&paths.checker_file())
    }

    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Checker config not readable, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded checker config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid checker config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_missing_token_file() {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::new(dir.path());

        let err = Credentials::load(&paths).unwrap_err();
        assert!(matches!(err, GandiError::Config { .. }));
        assert!(err.to_string().contains("Token file not found"));
        assert!(err.to_string().contains("chmod 600"));
    }

    #[test]
    fn test_empty_token_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "api_token", "  \n");

        let err = Credentials::load(&ConfigPaths::new(dir.path())).unwrap_err();
        assert!(err.to_string().contains("Token file is empty"));
    }

    #[test]
    fn test_token_and_url_are_trimmed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "api_token", "secret-pat\n");
        write(&dir, "api_url", " https://api.sandbox.gandi.net \n");

        let creds = Credentials::load(&ConfigPaths::new(dir.path())).unwrap();
        assert_eq!(creds.token(), "secret-pat");
        assert_eq!(creds.api_url(), "https://api.sandbox.gandi.net");
        assert!(!format!("{:?}", creds).contains("secret-pat"));
    }

    #[test]
    fn test_api_url_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        write(&dir, "api_token", "pat");
        let creds = Credentials::load(&ConfigPaths::new(dir.path())).unwrap();
        assert_eq!(creds.api_url(), DEFAULT_API_URL);

        write(&dir, "api_url", "");
        let creds = Credentials::load(&ConfigPaths::new(dir.path())).unwrap();
        assert_eq!(creds.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_checker_config_fallbacks() {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::new(dir.path());
        assert_eq!(CheckerConfig::load(&paths), CheckerConfig::default());

        write(&dir, CHECKER_FILE, "{ not json");
        assert_eq!(CheckerConfig::load(&paths), CheckerConfig::default());
    }

    #[test]
    fn test_partial_checker_config() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            CHECKER_FILE,
            r#"{
                "tlds": { "mode": "replace", "custom": ["xyz", "dev"] },
                "variations": { "patterns": ["numbers"], "maxNumbers": 2 },
                "rateLimit": { "delayMs": 0 }
            }"#,
        );

        let config = CheckerConfig::load(&ConfigPaths::new(dir.path()));
        assert_eq!(config.tlds.mode, TldMode::Replace);
        assert_eq!(config.tlds.defaults, TldConfig::default().defaults);
        assert_eq!(config.tlds.resolve(), vec!["xyz", "dev"]);
        assert!(config.variations.enabled);
        assert!(config.variations.is_enabled(VariationPattern::Numbers));
        assert!(!config.variations.is_enabled(VariationPattern::Prefix));
        assert_eq!(config.variations.max_numbers, 2);
        assert_eq!(config.rate_limit.max_concurrent, 10);
        assert_eq!(config.rate_limit.delay_ms, 0);
        assert_eq!(config.rate_limit.delay(), std::time::Duration::from_millis(100));
    }

    #[test]
    fn test_tld_resolution() {
        let mut tlds = TldConfig {
            mode: TldMode::Extend,
            defaults: vec!["com".to_string(), "net".to_string()],
            custom: vec!["io".to_string()],
        };
        assert_eq!(tlds.resolve(), vec!["com", "net", "io"]);

        tlds.mode = TldMode::Replace;
        assert_eq!(tlds.resolve(), vec!["io"]);

        tlds.custom.clear();
        assert_eq!(tlds.resolve(), vec!["com", "net"]);
    }

    #[test]
    fn test_primary_tlds() {
        assert_eq!(TldConfig::default().primary(), vec!["com", "net", "org"]);
    }

    #[test]
    fn test_batch_size_zero_uses_default() {
        let limit = RateLimitConfig {
            max_concurrent: 0,
            delay_ms: 5,
        };
        assert_eq!(limit.batch_size(), 10);
        assert_eq!(limit.delay(), std::time::Duration::from_millis(5));
    }

    #[test]
    fn test_delay_zero_uses_default() {
        let limit = RateLimitConfig {
            max_concurrent: 3,
            delay_ms: 0,
        };
        assert_eq!(limit.delay(), std::time::Duration::from_millis(100));
    }
}
