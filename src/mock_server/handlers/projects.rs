//! Project, region, and project type endpoint handlers.

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

/// GET /rest/v1.0/companies/{company_id}/projects
pub async fn list_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(company_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let projects = state
        .projects
        .get(&company_id)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let page = paginate(projects, query.page(), query.per_page());
    (StatusCode::OK, Json(page))
}

/// GET /rest/v1.0/companies/{company_id}/project_regions
pub async fn list_project_regions(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(company_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let regions = state
        .regions
        .get(&company_id)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let page = paginate(regions, query.page(), query.per_page());
    (StatusCode::OK, Json(page))
}

/// GET /rest/v1.0/companies/{company_id}/project_types
pub async fn list_project_types(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(company_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let types = state
        .project_types
        .get(&company_id)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let page = paginate(types, query.page(), query.per_page());
    (StatusCode::OK, Json(page))
}
