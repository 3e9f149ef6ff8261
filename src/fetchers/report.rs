use crate::error::ReportError;
use crate::fetchers::ReportSource;
use crate::parsers::Report;
use crate::utils;
use fantoccini::ClientBuilder;
use reqwest::header::CONTENT_TYPE;

/// Fetches the report at `url` and parses it leniently
pub async fn load(
    client: &reqwest::Client,
    source: &ReportSource,
    url: &str,
) -> Result<Report, ReportError> {
    ::log::info!("Sending the request to {}", url);

    let body = match source {
        ReportSource::Http => fetch_http(client, url).await?,
        ReportSource::WebDriver(endpoint) => fetch_rendered(endpoint, url).await?,
    };

    ::log::debug!("Report body is {} bytes", body.len());
    Ok(Report::parse(&body))
}

/// Plain GET; non-2xx statuses and non-markup bodies are rejected
async fn fetch_http(client: &reqwest::Client, url: &str) -> Result<String, ReportError> {
    let fetch_error = |source| ReportError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(fetch_error)?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if !utils::is_markup(content_type.as_deref()) {
        return Err(ReportError::Parse {
            url: url.to_string(),
            reason: format!("unexpected content type {}", content_type.unwrap_or_default()),
        });
    }

    response.text().await.map_err(fetch_error)
}

/// Loads the page in a WebDriver session and returns the rendered source
async fn fetch_rendered(endpoint: &str, url: &str) -> Result<String, ReportError> {
    let client = ClientBuilder::native()
        .connect(endpoint)
        .await
        .map_err(|source| ReportError::WebDriverSession {
            endpoint: endpoint.to_string(),
            source,
        })?;
    ::log::debug!("Connected to WebDriver at {}", endpoint);

    let result = async {
        client.goto(url).await?;
        client.source().await
    }
    .await;

    // Close the session either way
    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }

    result.map_err(|source| ReportError::WebDriverCommand {
        url: url.to_string(),
        source,
    })
}
