//! Company endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::handlers::paginate;
use crate::mock_server::state::MockState;

/// Query parameters for listing companies.
#[derive(Debug, Default, Deserialize)]
pub struct ListCompaniesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[allow(dead_code)] // Accepted as the real API does, but all mock companies are listed
    pub include_free_companies: Option<bool>,
}

/// GET /rest/v1.0/companies
pub async fn list_companies(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListCompaniesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(100);

    let companies = paginate(&state.companies, page, per_page);
    (StatusCode::OK, Json(companies))
}
