//! Dataset Download Module
//! One-shot HTTP GET of the sales CSV at startup.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to download dataset: {0}")]
    Http(#[from] reqwest::Error),
}

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Download the dataset CSV as raw bytes. One request, no retries; the
/// caller surfaces any failure on the status line.
pub fn download_csv(url: &str) -> Result<Vec<u8>, FetchError> {
    tracing::info!(url, "downloading dataset");

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;

    tracing::info!(bytes = bytes.len(), "dataset downloaded");
    Ok(bytes.to_vec())
}
