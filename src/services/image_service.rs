//! Client for the external image host. Uploads are best-effort: callers log
//! failures and proceed without a picture rather than failing the request.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image host not configured")]
    NotConfigured,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from image host: {0}")]
    BadResponse(String),
}

/// Upload raw image bytes and return the durable URL the host assigns.
/// The call carries its own timeout so a slow host cannot stall the
/// enclosing request indefinitely.
pub async fn upload_profile_pic(image: &[u8]) -> Result<String, UploadError> {
    let uploads = &config::config().uploads;
    let host_url = uploads
        .image_host_url
        .as_ref()
        .ok_or(UploadError::NotConfigured)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(uploads.upload_timeout_secs))
        .build()?;

    let mut request = client
        .post(host_url)
        .form(&[("image", STANDARD.encode(image))]);
    if let Some(key) = &uploads.image_host_key {
        request = request.query(&[("key", key)]);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(UploadError::BadResponse(format!(
            "status {}",
            response.status()
        )));
    }

    let body: Value = response.json().await?;
    body["data"]["url"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| UploadError::BadResponse("missing data.url in response".to_string()))
}
