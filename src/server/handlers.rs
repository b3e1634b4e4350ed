use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use image::DynamicImage;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::foundation::error::SpudcatResult;
use crate::server::{AppState, SEARCH_QUERIES};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MemeQuery {
    #[serde(default)]
    top: String,
    #[serde(default)]
    bottom: String,
}

pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[tracing::instrument(level = "info", skip(state))]
pub(crate) async fn meme(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MemeQuery>,
) -> Response {
    let query = SEARCH_QUERIES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("potato");

    let fetch = async {
        tokio::try_join!(fetch_potato(&state, query), fetch_cat(&state))
    };
    let (potato, cat) = match tokio::time::timeout(state.request_timeout, fetch).await {
        Ok(Ok(pair)) => pair,
        Ok(Err(err)) => {
            tracing::error!(error = %err, "failed to fetch images");
            return error_response(StatusCode::BAD_GATEWAY, err.to_string());
        }
        Err(_) => {
            tracing::error!(timeout = ?state.request_timeout, "timed out fetching images");
            return error_response(
                StatusCode::BAD_GATEWAY,
                format!("timed out after {:?} fetching images", state.request_timeout),
            );
        }
    };

    let generator = Arc::clone(&state.generator);
    let rendered = tokio::task::spawn_blocking(move || -> SpudcatResult<Vec<u8>> {
        let anim = if !q.top.is_empty() && !q.bottom.is_empty() {
            generator.generate(Some(&potato), Some(&cat), &q.top, &q.bottom)?
        } else {
            generator.generate_random(Some(&potato), Some(&cat))?
        };
        anim.to_gif_bytes()
    })
    .await;

    match rendered {
        Ok(Ok(bytes)) => ([(header::CONTENT_TYPE, "image/gif")], bytes).into_response(),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "failed to generate meme");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(join) => {
            tracing::error!(error = %join, "generation task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "generation task failed")
        }
    }
}

async fn fetch_potato(state: &AppState, query: &str) -> SpudcatResult<DynamicImage> {
    let url = state.potatoes.search_random(query).await?;
    tracing::debug!(%url, "downloading potato image");
    state.images.download(&url).await
}

async fn fetch_cat(state: &AppState) -> SpudcatResult<DynamicImage> {
    state.cats.fetch_random_cat().await
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "../../tests/unit/server/handlers.rs"]
mod tests;
