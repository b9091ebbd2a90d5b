//! API Handlers
//!
//! HTTP request handlers for each record endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::Result;
use crate::models::{
    CreateRecordRequest, DeleteResponse, HealthResponse, ListQuery, ListResponse, Record,
    StatsResponse, UpdateRecordRequest,
};
use crate::service::RecordService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecordService>,
}

impl AppState {
    pub fn new(service: Arc<RecordService>) -> Self {
        Self { service }
    }
}

/// Token for one request, cancelled when the handler future is dropped
/// (for example on client disconnect).
fn request_scope() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

/// Handler for POST /records
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<Record>)> {
    let (cancel, _guard) = request_scope();
    let record = state
        .service
        .create_record(&req.key, &req.title, &req.body, &cancel)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /records/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Record>> {
    let (cancel, _guard) = request_scope();
    let record = state.service.get_record(&key, &cancel).await?;

    Ok(Json(record))
}

/// Handler for GET /records?page=&limit=
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let (cancel, _guard) = request_scope();
    let page = state
        .service
        .list_records(query.page, query.limit, &cancel)
        .await?;

    Ok(Json(ListResponse {
        records: page.records,
        total: page.total,
        page: query.page,
        limit: query.limit,
    }))
}

/// Handler for PUT /records/:key
pub async fn update_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<UpdateRecordRequest>,
) -> Result<Json<Record>> {
    let (cancel, _guard) = request_scope();
    let record = state
        .service
        .update_record(&key, &req.title, &req.body, &cancel)
        .await?;

    Ok(Json(record))
}

/// Handler for DELETE /records/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let (cancel, _guard) = request_scope();
    state.service.delete_record(&key, &cancel).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.stats();

    Json(StatsResponse {
        hits: stats.hits,
        misses: stats.misses,
        list_generation: stats.list_generation,
        cached_entries: state.service.cache().len(),
        hit_rate: stats.hit_rate(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
