//! Mirrors the optimized images listed in a page-speed audit report into a
//! local tree that reproduces the site's URL paths.

pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod parsers;
pub mod paths;
pub mod pipeline;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{IoFailurePolicy, MirrorConfig};
pub use error::{ConfigError, MirrorError, ReportError, RowError};
pub use results::{AssetTask, RowOutcome, RunSummary};

use fetchers::ReportSource;
use filter::DomainFilter;
use pipeline::MirrorContext;
use std::path::PathBuf;

/// Builder for a single mirroring run
pub struct Mirror {
    config: MirrorConfig,
    root: PathBuf,
}

impl Mirror {
    /// Create a run for `config` that writes under `root`
    pub fn new(config: MirrorConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// Override the I/O failure policy
    pub fn with_io_policy(mut self, policy: IoFailurePolicy) -> Self {
        self.config.on_io_error = policy;
        self
    }

    /// Override the origin replacement links are resolved against
    pub fn with_report_origin(mut self, origin: &str) -> Self {
        self.config.report_origin = origin.to_string();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_secs = Some(timeout_seconds);
        self
    }

    /// Load the report through a WebDriver server
    pub fn with_webdriver(mut self, endpoint: &str) -> Self {
        self.config.webdriver_url = Some(endpoint.to_string());
        self
    }

    /// Validate the configuration, then fetch the report and mirror every row
    pub async fn run(self) -> Result<RunSummary, MirrorError> {
        self.config.validate()?;

        let filter = DomainFilter::with_exclude_patterns(
            self.config.domain_prefix(),
            &self.config.exclude_patterns,
        )
        .map_err(ConfigError::from)?;
        let ctx = MirrorContext {
            filter,
            root: self.root,
            report_origin: self.config.origin_prefix().to_string(),
        };

        let client = utils::http_client(self.config.timeout())?;
        let source = ReportSource::from_endpoint(self.config.webdriver_url.as_deref());

        pipeline::run(
            &client,
            &source,
            &self.config.report_url,
            &self.config.row_element,
            &self.config.row_marker,
            self.config.on_io_error,
            &ctx,
        )
        .await
    }
}
