use std::time::Duration;

/// Builds the HTTP client shared by the report and asset fetches
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("image-mirror/", env!("CARGO_PKG_VERSION")));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// True when a Content-Type can plausibly hold a markup document
///
/// A missing header is given the benefit of the doubt.
pub fn is_markup(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return true;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.contains("html") || mime.contains("xml")
}
