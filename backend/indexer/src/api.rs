//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;
use crate::summary;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    pub address: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn internal_error(e: IndexerError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
///
/// Returns all indexed events across the watched contracts.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    match db::get_all_events(&state.pool).await {
        Ok(events) => {
            let count = events.len();
            (StatusCode::OK, Json(AllEventsResponse { count, events })).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /contributors/:address/events`
///
/// Returns every indexed event whose subject is `address`.
pub async fn get_contributor_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    match db::get_events_for_actor(&state.pool, &address).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(EventsResponse {
                    address,
                    count,
                    events,
                }),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /contributors/:address`
///
/// Cumulative contribution, tokens rewarded and badge id for one contributor.
pub async fn get_contributor_summary(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    let result = db::get_events_for_actor(&state.pool, &address)
        .await
        .and_then(|events| summary::contributor(&address, &events));
    match result {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /campaign`
pub async fn get_campaign_summary(State(state): State<Arc<ApiState>>) -> Response {
    let result = db::get_all_events(&state.pool)
        .await
        .and_then(|events| summary::campaign(&events));
    match result {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => internal_error(e),
    }
}
