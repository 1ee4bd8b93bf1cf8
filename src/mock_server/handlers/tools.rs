//! Generic tool endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::handlers::{paginate, PageQuery};
use crate::mock_server::state::MockState;

/// GET /rest/v1.0/companies/{company_id}/generic_tools
pub async fn list_tools(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(company_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let tools = state
        .tools
        .get(&company_id)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let page = paginate(tools, query.page(), query.per_page());
    (StatusCode::OK, Json(page))
}

/// GET /rest/v1.0/projects/{project_id}/generic_tools/{tool_id}/generic_tool_items
pub async fn list_tool_items(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((project_id, tool_id)): Path<(u64, u64)>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let items = state
        .tool_items
        .get(&(project_id, tool_id))
        .map(Vec::as_slice)
        .unwrap_or_default();

    let page = paginate(items, query.page(), query.per_page());
    (StatusCode::OK, Json(page))
}

/// POST /rest/v1.0/projects/{project_id}/generic_tools/{tool_id}/generic_tool_items
pub async fn create_tool_item(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((project_id, tool_id)): Path<(u64, u64)>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.create_tool_item(project_id, tool_id, &body) {
        Some(item) => (StatusCode::CREATED, Json(item)).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "message": "a generic_tool_item object is required"
            })),
        )
            .into_response(),
    }
}

/// GET /rest/v1.0/projects/{project_id}/generic_tools/{tool_id}/generic_tool_items/available_statuses
pub async fn list_tool_statuses(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((project_id, tool_id)): Path<(u64, u64)>,
) -> impl IntoResponse {
    let state = state.read().await;

    let statuses = state
        .tool_statuses
        .get(&(project_id, tool_id))
        .cloned()
        .unwrap_or_default();

    (StatusCode::OK, Json(statuses))
}
