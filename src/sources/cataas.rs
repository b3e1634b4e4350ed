use async_trait::async_trait;
use image::DynamicImage;

use crate::foundation::error::SpudcatResult;
use crate::sources::{CatFetcher, decode_image, get_ok_bytes};

/// Random cat image service root.
pub const CATAAS_BASE_URL: &str = "https://cataas.com";

/// Client for the cat-as-a-service `/cat` endpoint.
#[derive(Clone, Debug)]
pub struct CataasClient {
    http: reqwest::Client,
    base_url: String,
}

impl CataasClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, CATAAS_BASE_URL)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CatFetcher for CataasClient {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch_random_cat(&self) -> SpudcatResult<DynamicImage> {
        let url = format!("{}/cat", self.base_url);
        let bytes = get_ok_bytes(&self.http, &url, "cataas").await?;
        decode_image(&bytes, &url)
    }
}
