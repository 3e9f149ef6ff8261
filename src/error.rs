use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable run configuration. Always fatal, raised before any I/O.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter was not provided.
    #[error("missing required parameter `{0}`")]
    Missing(&'static str),

    /// A parameter is not an absolute URL with a host.
    #[error("`{field}` is not a valid URL: {value}")]
    InvalidUrl {
        /// Name of the offending parameter.
        field: &'static str,
        /// Value as provided.
        value: String,
    },

    /// The config file could not be read.
    #[error("failed to read config file {}", .path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// The config document is not valid JSON for this schema.
    #[error("invalid config document")]
    Json(#[from] serde_json::Error),

    /// An exclude pattern does not compile.
    #[error("invalid exclude pattern")]
    Pattern(#[from] regex::Error),
}

/// Failures that prevent the report from being loaded. Always fatal.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The HTTP request for the report did not complete successfully.
    #[error("failed to fetch report {url}")]
    Fetch {
        /// Report URL.
        url: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },

    /// No WebDriver session could be opened.
    #[error("failed to open a WebDriver session at {endpoint}")]
    WebDriverSession {
        /// WebDriver endpoint.
        endpoint: String,
        /// Underlying session error.
        source: fantoccini::error::NewSessionError,
    },

    /// The WebDriver session could not load the report.
    #[error("WebDriver failed to load report {url}")]
    WebDriverCommand {
        /// Report URL.
        url: String,
        /// Underlying command error.
        source: fantoccini::error::CmdError,
    },

    /// The response cannot be treated as a markup document.
    #[error("report {url} is not an HTML document: {reason}")]
    Parse {
        /// Report URL.
        url: String,
        /// Why the body was rejected.
        reason: String,
    },
}

/// Row-scoped failures. Whether the I/O variants end the run is decided by
/// [`crate::config::IoFailurePolicy`].
#[derive(Debug, Error)]
pub enum RowError {
    /// The row does not hold exactly three links.
    #[error("row #{index} has {found} links, expected 3")]
    Malformed {
        /// 1-based ordinal of the row.
        index: usize,
        /// Number of anchors found.
        found: usize,
    },

    /// The source URL would map outside of the root directory.
    #[error("{source_url} maps outside of the root directory")]
    PathOutsideRoot {
        /// Source URL of the asset.
        source_url: String,
    },

    /// The source URL has no file name after the domain prefix.
    #[error("{source_url} has no file name after the domain")]
    MissingFileName {
        /// Source URL of the asset.
        source_url: String,
    },

    /// A directory on the destination path could not be created.
    #[error("failed to create directory {}", .path.display())]
    DirectoryCreate {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// The optimized asset could not be downloaded.
    #[error("failed to download {url}")]
    Fetch {
        /// Download URL.
        url: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },

    /// The downloaded asset could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

/// Errors that end a mirroring run.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build the HTTP client")]
    Client(#[from] reqwest::Error),

    /// The report could not be loaded.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// A row failed under [`crate::config::IoFailurePolicy::Abort`].
    #[error("row #{index} aborted the run")]
    Row {
        /// 1-based ordinal of the row.
        index: usize,
        /// Underlying row failure.
        source: RowError,
    },
}
