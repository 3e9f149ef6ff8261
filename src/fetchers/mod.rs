pub mod asset;
pub mod report;

/// How the report page is retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// Plain HTTP GET
    Http,
    /// Rendered through a WebDriver server at the given endpoint
    WebDriver(String),
}

impl ReportSource {
    /// Picks the WebDriver source when an endpoint is configured
    pub fn from_endpoint(endpoint: Option<&str>) -> Self {
        match endpoint {
            Some(endpoint) => ReportSource::WebDriver(endpoint.to_string()),
            None => ReportSource::Http,
        }
    }
}
