//! Direct cost endpoint handlers.

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

/// GET /rest/v1.0/projects/{project_id}/direct_costs
pub async fn list_direct_costs(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let costs = state
        .direct_costs
        .get(&project_id)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let page = paginate(costs, query.page(), query.per_page());
    (StatusCode::OK, Json(page))
}

/// GET /rest/v1.0/projects/{project_id}/direct_costs/{direct_cost_id}
pub async fn get_direct_cost(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((project_id, direct_cost_id)): Path<(u64, u64)>,
) -> impl IntoResponse {
    let state = state.read().await;

    let cost = state
        .direct_costs
        .get(&project_id)
        .and_then(|costs| costs.iter().find(|c| c.id == direct_cost_id));

    match cost {
        Some(cost) => (StatusCode::OK, Json(cost.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "message": format!("No direct cost found with id: {direct_cost_id}")
            })),
        )
            .into_response(),
    }
}
