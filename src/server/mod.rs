//! HTTP surface: `GET /health` and `GET /meme`.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use image::DynamicImage;

use crate::config::Config;
use crate::foundation::error::SpudcatResult;
use crate::meme::generator::MemeGenerator;
use crate::sources::{CatFetcher, PotatoSearcher, download_image};

/// Search phrases handed to the potato searcher, one picked per request.
pub static SEARCH_QUERIES: &[&str] = &[
    "weird potato",
    "funny potato",
    "potato fail",
    "potato meme",
    "ugly potato",
    "potato face",
];

/// Downloads and decodes an image by URL.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download(&self, url: &str) -> SpudcatResult<DynamicImage>;
}

#[async_trait]
impl ImageDownloader for reqwest::Client {
    async fn download(&self, url: &str) -> SpudcatResult<DynamicImage> {
        download_image(self, url).await
    }
}

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub potatoes: Arc<dyn PotatoSearcher>,
    pub cats: Arc<dyn CatFetcher>,
    pub images: Arc<dyn ImageDownloader>,
    pub generator: Arc<dyn MemeGenerator>,
    /// Budget for fetching both subjects of one request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        potatoes: Arc<dyn PotatoSearcher>,
        cats: Arc<dyn CatFetcher>,
        images: Arc<dyn ImageDownloader>,
        generator: Arc<dyn MemeGenerator>,
    ) -> Self {
        Self {
            potatoes,
            cats,
            images,
            generator,
            request_timeout: Config::default().request_timeout,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/meme", get(handlers::meme))
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(state: AppState, addr: SocketAddr) -> SpudcatResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "installing ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "installing SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutting down");
}
