use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::foundation::error::{SpudcatError, SpudcatResult};
use crate::sources::{PotatoSearcher, get_ok_bytes, is_image_url};

/// Public listing endpoint root.
pub const REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Subreddits searched for potato pictures.
pub static SUBREDDITS: &[&str] = &["potato", "PotatoesAreFunny", "potatoes"];

/// Used when the listing API is unreachable or has nothing usable.
pub static FALLBACK_URLS: &[&str] = &[
    "https://upload.wikimedia.org/wikipedia/commons/a/ab/Patates.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/6/60/Potato_and_cross_section.jpg",
];

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Post {
    url: String,
    post_hint: Option<String>,
    is_video: bool,
    over_18: bool,
}

impl Post {
    fn is_candidate(&self) -> bool {
        self.post_hint.as_deref() == Some("image")
            && !self.is_video
            && !self.over_18
            && is_image_url(&self.url)
    }
}

/// Picks random image posts from a few potato subreddits.
///
/// Never fails on upstream trouble: any listing error falls back to a fixed URL list.
#[derive(Clone, Debug)]
pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
    subreddits: Vec<String>,
    fallbacks: Vec<String>,
}

impl RedditClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, REDDIT_BASE_URL)
    }

    /// Point at a different listing host (tests use a local server).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            subreddits: SUBREDDITS.iter().map(|s| s.to_string()).collect(),
            fallbacks: FALLBACK_URLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_subreddits(mut self, subreddits: Vec<String>) -> Self {
        self.subreddits = subreddits;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: Vec<String>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    async fn fetch_listing(&self) -> SpudcatResult<String> {
        let sub = self
            .subreddits
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| SpudcatError::fetch("no subreddits configured"))?;
        let url = format!("{}/r/{sub}/hot.json?limit=50", self.base_url);
        tracing::debug!(%url, "fetching listing");

        let body = get_ok_bytes(&self.http, &url, "listing").await?;
        let listing: Listing = serde_json::from_slice(&body)
            .map_err(|e| SpudcatError::fetch(format!("decoding listing: {e}")))?;

        let candidates: Vec<String> = listing
            .data
            .children
            .into_iter()
            .map(|c| c.data)
            .filter(Post::is_candidate)
            .map(|p| p.url)
            .collect();

        candidates
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| SpudcatError::fetch(format!("no qualifying image posts in r/{sub}")))
    }

    fn pick_fallback(&self) -> SpudcatResult<String> {
        self.fallbacks
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| SpudcatError::fetch("listing failed and no fallback urls configured"))
    }
}

#[async_trait]
impl PotatoSearcher for RedditClient {
    /// The query is accepted for interface compatibility; results come from the subreddits.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn search_random(&self, query: &str) -> SpudcatResult<String> {
        match self.fetch_listing().await {
            Ok(url) => Ok(url),
            Err(err) => {
                tracing::warn!(error = %err, "listing failed, using fallback url");
                self.pick_fallback()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sources/reddit.rs"]
mod tests;
