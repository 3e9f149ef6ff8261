use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// What to do when creating a directory, downloading or writing an asset fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoFailurePolicy {
    /// End the whole run on the first failure
    #[default]
    Abort,
    /// Mark the row as failed and continue with the next one
    Skip,
}

/// Configuration for a mirroring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// URL of the audit report
    pub report_url: String,

    /// Site whose assets are mirrored; trailing slashes are ignored
    pub domain: String,

    /// Origin prepended to the relative links of optimized assets
    #[serde(default = "default_report_origin")]
    pub report_origin: String,

    /// Element name of the audit rows
    #[serde(default = "default_row_element")]
    pub row_element: String,

    /// Class marker identifying the rows of the optimized-images audit
    #[serde(default = "default_row_marker")]
    pub row_marker: String,

    /// Policy for directory, download and write failures
    #[serde(default)]
    pub on_io_error: IoFailurePolicy,

    /// Regex patterns for source URLs to skip even when they match the domain
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Timeout applied to each HTTP request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Load the report through this WebDriver endpoint instead of a plain GET
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webdriver_url: Option<String>,
}

/// Default value for report_origin
fn default_report_origin() -> String {
    "https://gtmetrix.com".to_string()
}

/// Default value for row_element
fn default_row_element() -> String {
    "tr".to_string()
}

/// Default value for row_marker
fn default_row_marker() -> String {
    "audit-uses-optimized-images".to_string()
}

impl MirrorConfig {
    /// Create a new configuration with default values
    pub fn new(report_url: &str, domain: &str) -> Self {
        Self {
            report_url: report_url.to_string(),
            domain: domain.to_string(),
            report_origin: default_report_origin(),
            row_element: default_row_element(),
            row_marker: default_row_marker(),
            on_io_error: IoFailurePolicy::default(),
            exclude_patterns: Vec::new(),
            timeout_secs: None,
            webdriver_url: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read_error = |source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(read_error)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(read_error)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every URL and pattern before the run performs any I/O
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("url", &self.report_url)?;
        check_url("domain", &self.domain)?;
        check_url("report_origin", &self.report_origin)?;
        if let Some(endpoint) = &self.webdriver_url {
            check_url("webdriver_url", endpoint)?;
        }
        for pattern in &self.exclude_patterns {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }

    /// The domain with trailing slashes stripped, used for literal prefix matching
    pub fn domain_prefix(&self) -> &str {
        self.domain.trim_end_matches('/')
    }

    /// The report origin without a trailing slash
    pub fn origin_prefix(&self) -> &str {
        self.report_origin.trim_end_matches('/')
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Basic URL syntax check: must parse and carry a host
fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if url.has_host() => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}
