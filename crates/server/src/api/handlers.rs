//! HTTP request handlers and shared application state.

use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use ainura_core::config;
use ainura_core::search::{KindFilter, LayoutSize, PromptQuery, SortOrder};
use ainura_core::storage::save_gallery;
use ainura_core::{ContentKind, Gallery, NewItem};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub gallery: Gallery,
    pub data_dir: String,
    pub api_key: Option<String>,
    pub prometheus_handle: PrometheusHandle,
    pub start_time: Instant,
    /// Upstream listing base URL, if configured. Reported by `/health`.
    pub upstream: Option<String>,
}

fn parse_kind(raw: &str) -> Result<ContentKind, ApiError> {
    raw.parse().map_err(ApiError::from)
}

fn page<T>(items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(limit).collect()
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        images: state.gallery.len(ContentKind::Image),
        videos: state.gallery.len(ContentKind::Video),
        upstream: state.upstream.clone(),
    })
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    metrics::update_gallery_metrics(&state.gallery);
    state.prometheus_handle.render()
}

/// `GET /items/:kind`
pub async fn list_items(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let (offset, limit) = query.resolve().map_err(ApiError::BadRequest)?;

    let items: Vec<ItemResponse> = state
        .gallery
        .list(kind, offset, limit)
        .into_iter()
        .enumerate()
        .map(|(i, item)| ItemResponse {
            size: Some(LayoutSize::for_listing(offset + i)),
            ..item.into()
        })
        .collect();

    Ok(Json(ListResponse {
        count: items.len(),
        total: state.gallery.len(kind),
        items,
    }))
}

/// `GET /items/:kind/:id`
pub async fn get_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
) -> Result<Json<ItemResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let item = state
        .gallery
        .get(kind, id)
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", kind, id)))?;
    Ok(Json(item.into()))
}

/// `GET /items/:kind/:id/similar`
pub async fn similar_items(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SimilarResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let (offset, limit) = query.resolve().map_err(ApiError::BadRequest)?;

    let reference = state
        .gallery
        .get(kind, id)
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", kind, id)))?;
    let ranked = state.gallery.find_similar(kind, id)?;
    let total = ranked.len();
    metrics::record_similar_query(kind, total);

    let results: Vec<ItemResponse> = page(ranked, offset, limit)
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(Json(SimilarResponse {
        reference: reference.into(),
        count: results.len(),
        total,
        results,
    }))
}

/// `GET /search`
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    if query.q.len() > config::MAX_QUERY_LEN {
        return Err(ApiError::BadRequest(format!(
            "Query exceeds {} bytes",
            config::MAX_QUERY_LEN
        )));
    }
    let (offset, limit) = query.page().resolve().map_err(ApiError::BadRequest)?;
    let options = PromptQuery {
        kind: query
            .kind
            .as_deref()
            .map(str::parse::<KindFilter>)
            .transpose()?
            .unwrap_or_default(),
        sort: query
            .sort
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default(),
    };

    let hits = state.gallery.search(&query.q, &options);
    let total = hits.len();
    metrics::record_search_query(options.sort);
    tracing::debug!(query = %query.q, sort = options.sort.as_str(), total, "Prompt search");

    let results: Vec<ItemResponse> = page(hits, offset, limit)
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(Json(SearchResponse {
        query: query.q,
        count: results.len(),
        total,
        results,
    }))
}

/// `POST /items/:kind`
pub async fn upload_item(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(req): Json<UploadRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let kind = parse_kind(&kind)?;
    let item = state.gallery.insert_front(
        kind,
        NewItem {
            id: req.id,
            description: req.prompt,
            author: req.author,
            url: req.url,
            thumbnail: req.thumbnail,
        },
    )?;

    metrics::record_write_operation(kind.as_str(), "upload");
    tracing::info!(%kind, id = item.id, "Uploaded item");
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// `POST /items/:kind/:id/like`
pub async fn like(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
) -> Result<Json<LikeResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let likes = state.gallery.like(kind, id)?;
    metrics::record_write_operation(kind.as_str(), "like");
    Ok(Json(LikeResponse { id, kind, likes }))
}

/// `DELETE /items/:kind/:id/like`
pub async fn unlike(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
) -> Result<Json<LikeResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let likes = state.gallery.unlike(kind, id)?;
    metrics::record_write_operation(kind.as_str(), "unlike");
    Ok(Json(LikeResponse { id, kind, likes }))
}

/// `POST /admin/save`
pub async fn save(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    save_gallery(&state.gallery, std::path::Path::new(&state.data_dir)).map_err(|e| {
        tracing::error!("Failed to save gallery: {}", e);
        ApiError::Internal("Save operation failed".into())
    })?;

    metrics::record_write_operation("all", "save");
    Ok(Json(MessageResponse {
        message: format!(
            "Saved {} images and {} videos",
            state.gallery.len(ContentKind::Image),
            state.gallery.len(ContentKind::Video)
        ),
    }))
}
