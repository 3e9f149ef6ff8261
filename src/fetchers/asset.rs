use crate::error::RowError;
use std::path::Path;

/// Downloads `download_url` and writes the whole body to `destination`
///
/// An existing file is truncated and overwritten. Returns the number of
/// bytes written.
pub async fn fetch(
    client: &reqwest::Client,
    download_url: &str,
    destination: &Path,
) -> Result<usize, RowError> {
    let fetch_error = |source| RowError::Fetch {
        url: download_url.to_string(),
        source,
    };

    let bytes = client
        .get(download_url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(fetch_error)?
        .bytes()
        .await
        .map_err(fetch_error)?;

    tokio::fs::write(destination, &bytes)
        .await
        .map_err(|source| RowError::Write {
            path: destination.to_path_buf(),
            source,
        })?;

    Ok(bytes.len())
}
