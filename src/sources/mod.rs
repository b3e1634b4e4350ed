//! Where subject images come from.
//!
//! The server only sees the two traits; the concrete clients talk to a post listing API
//! (potatoes) and a random cat image service.

pub(crate) mod cataas;
pub(crate) mod reddit;

use async_trait::async_trait;
use image::DynamicImage;

use crate::foundation::error::{SpudcatError, SpudcatResult};

/// User-Agent sent on every outbound request.
pub const USER_AGENT: &str = "spudcat/1.0";

/// Finds a URL for a random potato image.
#[async_trait]
pub trait PotatoSearcher: Send + Sync {
    async fn search_random(&self, query: &str) -> SpudcatResult<String>;
}

/// Fetches a random, decoded cat image.
#[async_trait]
pub trait CatFetcher: Send + Sync {
    async fn fetch_random_cat(&self) -> SpudcatResult<DynamicImage>;
}

/// Shared HTTP client with the crate User-Agent and an overall request timeout.
pub fn http_client(timeout: std::time::Duration) -> SpudcatResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| SpudcatError::resource(format!("building http client: {e}")))
}

/// GET `url` and decode the body as an image.
#[tracing::instrument(level = "debug", skip(client))]
pub async fn download_image(client: &reqwest::Client, url: &str) -> SpudcatResult<DynamicImage> {
    let bytes = get_ok_bytes(client, url, "image download").await?;
    decode_image(&bytes, url)
}

pub(crate) async fn get_ok_bytes(
    client: &reqwest::Client,
    url: &str,
    what: &str,
) -> SpudcatResult<Vec<u8>> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| SpudcatError::fetch(format!("{what} request failed: {e}")))?;

    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        return Err(SpudcatError::fetch(format!(
            "{what} returned status {}",
            status.as_u16()
        )));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| SpudcatError::fetch(format!("{what} body read failed: {e}")))?;
    Ok(bytes.to_vec())
}

pub(crate) fn decode_image(bytes: &[u8], source: &str) -> SpudcatResult<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| SpudcatError::fetch(format!("decoding image from '{source}': {e}")))
}

/// Whether `url` ends in a common still-image extension, ignoring case.
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    [".jpg", ".jpeg", ".png", ".gif"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
#[path = "../../tests/unit/sources/mod.rs"]
mod tests;
