use crate::error::RowError;
use std::path::PathBuf;

/// Resolved unit of work for a well-formed, in-domain row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTask {
    /// Ordinal of the row the task came from
    pub index: usize,

    /// Remote URL of the original asset
    pub source_url: String,

    /// Absolute URL of the optimized replacement
    pub download_url: String,

    /// Local path the replacement is written to
    pub destination: PathBuf,
}

/// What happened to a row
#[derive(Debug)]
pub enum RowOutcome {
    /// The row yields (or yielded) an asset to mirror
    Processed(AssetTask),
    /// The source URL is outside the mirrored domain
    Skipped {
        /// Ordinal of the row
        index: usize,
        /// Source URL that did not match
        source_url: String,
    },
    /// The row could not be processed
    Failed(RowError),
}

impl RowOutcome {
    /// Short label used in progress output
    pub fn label(&self) -> &'static str {
        match self {
            RowOutcome::Processed(_) => "OK",
            RowOutcome::Skipped { .. } => "SKIPPED",
            RowOutcome::Failed(_) => "FAILED",
        }
    }
}

/// Per-row outcomes of a finished run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Outcomes in row order
    pub outcomes: Vec<RowOutcome>,
}

impl RunSummary {
    /// Number of rows whose asset was written
    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Processed(_)))
    }

    /// Number of rows outside the domain
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped { .. }))
    }

    /// Number of rows that failed
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed(_)))
    }

    /// True when the report had no matching rows at all
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, predicate: impl Fn(&RowOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}
