pub mod html;


use crate::error::RowError;
use scraper::Html;

/// A parsed audit report
///
/// Wraps the lenient HTML tree. It is not `Send`, so rows are extracted into
/// owned [`Row`] values before any further await point.
pub struct Report {
    document: Html,
}

impl Report {
    /// Parse the raw report body
    pub fn parse(body: &str) -> Self {
        Self {
            document: html::parse_document(body),
        }
    }

    /// All `element` nodes flagged with `marker`, in document order
    ///
    /// An empty vector means there is nothing to optimize. The error carries
    /// the reason the element and marker could not be turned into a selector.
    pub fn rows(&self, element: &str, marker: &str) -> Result<Vec<Row>, String> {
        let selector = html::marker_selector(element, marker)?;
        html::select_rows(&self.document, &selector)
    }
}

/// One matched node of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position among the matched rows
    pub index: usize,
    /// `href` of every descendant anchor, in document order
    pub hrefs: Vec<String>,
}

/// The three links of a well-formed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTriple {
    /// Unused leading link
    pub placeholder: String,
    /// Remote URL of the current, unoptimized asset
    pub source: String,
    /// Path of the optimized asset, relative to the report origin
    pub replacement: String,
}

impl Row {
    /// Creates a row from its ordinal and link targets
    pub fn new(index: usize, hrefs: Vec<String>) -> Self {
        Self { index, hrefs }
    }

    /// Binds the row's links, failing unless there are exactly three
    pub fn link_triple(&self) -> Result<LinkTriple, RowError> {
        match self.hrefs.as_slice() {
            [placeholder, source, replacement] => Ok(LinkTriple {
                placeholder: placeholder.clone(),
                source: source.clone(),
                replacement: replacement.clone(),
            }),
            other => Err(RowError::Malformed {
                index: self.index,
                found: other.len(),
            }),
        }
    }
}

impl LinkTriple {
    /// Absolute download URL: the report origin followed by the relative link
    pub fn download_url(&self, origin: &str) -> String {
        format!("{}{}", origin, self.replacement)
    }
}
