//! HTTP API endpoints for the catalog, history, stats, and live feed.
//!
//! Session identity rides in the `x-amu-session` header; games that run
//! client-side report their picks through `POST /api/history`.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::session_token;
use crate::protocol::{HistoryEntry, StatsSummary, StatusInfo};
use crate::state::{AppState, FoodQuery};
use crate::types::*;

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

fn bad_request(msg: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError { error: msg.into() }),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiError {
            error: "A valid session token is required".to_string(),
        }),
    )
        .into_response()
}

async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    let token = session_token(headers).ok_or_else(unauthorized)?;
    let session = state
        .session_by_token(token)
        .await
        .ok_or_else(unauthorized)?;
    state.touch_session(&session.id).await;
    Ok(session)
}

// ========== Sessions ==========

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session: crate::protocol::SessionInfo,
    /// Raw token; shown exactly once
    pub token: String,
}

/// POST /api/session
pub async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionCreated> {
    let (session, token) = state.create_session().await;
    Json(SessionCreated {
        session: (&session).into(),
        token,
    })
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub display_name: String,
}

/// POST /api/session/register
pub async fn register_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RegisterBody>,
) -> Response {
    let Some(token) = session_token(&headers) else {
        return unauthorized();
    };
    match state.register_session(token, body.display_name).await {
        Ok(session) => Json(crate::protocol::SessionInfo::from(&session)).into_response(),
        Err(e) => bad_request(e),
    }
}

// ========== Foods ==========

/// GET /api/foods?category=&search=&favorites_only=
pub async fn list_foods(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<FoodQuery>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    Json(state.list_foods(&session.id, &query).await).into_response()
}

/// POST /api/foods
pub async fn create_food(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<FoodInsert>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.create_food(&session.id, input).await {
        Ok(food) => (StatusCode::CREATED, Json(food)).into_response(),
        Err(e) => bad_request(e),
    }
}

/// GET /api/foods/{id}
pub async fn get_food(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<FoodId>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.get_food(&id).await {
        Some(food) if food.session_id == session.id => Json(food).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// PATCH /api/foods/{id}
pub async fn update_food(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<FoodId>,
    Json(update): Json<FoodUpdate>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.update_food(&session.id, &id, update).await {
        Ok(food) => Json(food).into_response(),
        Err(e) if e == "Food not found" => StatusCode::NOT_FOUND.into_response(),
        Err(e) => bad_request(e),
    }
}

/// DELETE /api/foods/{id}
pub async fn delete_food(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<FoodId>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.delete_food(&session.id, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) if e == "Food not found" => StatusCode::NOT_FOUND.into_response(),
        Err(e) => bad_request(e),
    }
}

/// POST /api/foods/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<FoodId>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.toggle_favorite(&session.id, &id).await {
        Ok(food) => Json(food).into_response(),
        Err(e) if e == "Food not found" => StatusCode::NOT_FOUND.into_response(),
        Err(e) => bad_request(e),
    }
}

// ========== History & Stats ==========

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// GET /api/history?limit=
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let limit = query.limit.unwrap_or(state.config.max_history_limit);
    let entries: Vec<HistoryEntry> = state.history_for(&session.id, limit).await;
    Json(entries).into_response()
}

#[derive(Debug, Deserialize)]
pub struct HistoryBody {
    #[serde(default)]
    pub food_id: Option<FoodId>,
    pub food_name: String,
    pub method: SelectionMethod,
}

/// POST /api/history
///
/// Reporting surface for client-driven games: one record per decided pick.
pub async fn post_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<HistoryBody>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if body.food_name.trim().is_empty() {
        return bad_request("Food name must not be empty");
    }
    let record = state
        .record_selection(
            Some(session.id),
            body.food_id,
            body.food_name.trim().to_string(),
            body.method,
        )
        .await;
    (StatusCode::CREATED, Json(record)).into_response()
}

/// GET /api/stats
pub async fn get_stats(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let stats: StatsSummary = state.stats_for(&session.id).await;
    Json(stats).into_response()
}

// ========== Live feed ==========

/// GET /api/statuses
pub async fn get_statuses(State(state): State<Arc<AppState>>) -> Json<Vec<StatusInfo>> {
    let statuses = state.active_statuses().await;
    Json(statuses.iter().map(StatusInfo::from).collect())
}

// ========== Admin ==========

/// POST /admin/reset
///
/// Wipes all in-memory state. Guarded by Basic auth middleware.
pub async fn admin_reset(State(state): State<Arc<AppState>>) -> Response {
    state.reset().await;
    (StatusCode::OK, "State reset").into_response()
}
