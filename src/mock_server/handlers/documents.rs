//! Document tree, folder, and file endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::handlers::ProjectScopeQuery;
use crate::mock_server::state::MockState;
use crate::DocumentType;

/// Maximum accepted JSON body for the dual-mode file update handler.
const MAX_JSON_BODY: usize = 2 * 1024 * 1024;

fn not_found(what: &str, id: u64) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "message": format!("No {what} found with id: {id}")
        })),
    )
        .into_response()
}

fn name_conflict() -> axum::response::Response {
    (
        StatusCode::CONFLICT,
        Json(serde_json::json!({
            "errors": { "name": ["has already been taken"] }
        })),
    )
        .into_response()
}

/// GET /rest/v1.0/projects/{project_id}/documents
pub async fn list_documents(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    (StatusCode::OK, Json(state.documents_for(project_id).to_vec()))
}

/// GET /rest/v1.0/folders (the root listing).
pub async fn root_folder(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(scope): Query<ProjectScopeQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    (StatusCode::OK, Json(state.root_listing(scope.project_id)))
}

/// GET /rest/v1.0/folders/{doc_id}
pub async fn show_folder(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(doc_id): Path<u64>,
    Query(scope): Query<ProjectScopeQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.folder_detail(scope.project_id, doc_id) {
        Some(folder) => (StatusCode::OK, Json(folder)).into_response(),
        None => not_found("folder", doc_id),
    }
}

/// GET /rest/v1.0/files/{doc_id}
pub async fn show_file(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(doc_id): Path<u64>,
    Query(scope): Query<ProjectScopeQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.find_document(scope.project_id, doc_id) {
        Some(file) => (StatusCode::OK, Json(file.clone())).into_response(),
        None => not_found("file", doc_id),
    }
}

/// POST /rest/v1.0/folders
pub async fn create_folder(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(scope): Query<ProjectScopeQuery>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let folder = body.get("folder").cloned().unwrap_or_default();

    let Some(name) = folder.get("name").and_then(|n| n.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": "folder name is required" })),
        )
            .into_response();
    };
    let parent_id = folder.get("parent_id").and_then(|p| p.as_u64());

    let mut state = state.write().await;
    match state.create_document(scope.project_id, name, parent_id, DocumentType::Folder, None) {
        Some(document) => (StatusCode::CREATED, Json(document)).into_response(),
        None => name_conflict(),
    }
}

/// PATCH /rest/v1.0/folders/{doc_id}
pub async fn update_folder(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(doc_id): Path<u64>,
    Query(scope): Query<ProjectScopeQuery>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let folder = body.get("folder").cloned().unwrap_or_default();

    let parent_id = folder.get("parent_id").and_then(|p| p.as_u64());
    let name = folder
        .get("name")
        .and_then(|n| n.as_str())
        .map(str::to_owned);
    let private = folder.get("explicit_permissions").and_then(|p| p.as_bool());

    let mut state = state.write().await;
    match state.update_document(scope.project_id, doc_id, parent_id, name, None, private) {
        Some(document) => (StatusCode::OK, Json(document)).into_response(),
        None => not_found("folder", doc_id),
    }
}

/// DELETE /rest/v1.0/folders/{doc_id}
pub async fn delete_folder(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(doc_id): Path<u64>,
    Query(scope): Query<ProjectScopeQuery>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.delete_document(scope.project_id, doc_id) {
        Some(document) => (StatusCode::OK, Json(document)).into_response(),
        None => not_found("folder", doc_id),
    }
}

/// Fields parsed out of a `file[...]` multipart form.
#[derive(Debug, Default)]
struct FileForm {
    name: Option<String>,
    description: Option<String>,
    parent_id: Option<u64>,
    private: Option<bool>,
    has_data: bool,
}

async fn read_file_form(mut multipart: Multipart) -> FileForm {
    let mut form = FileForm::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file[name]" => form.name = field.text().await.ok(),
            "file[description]" => form.description = field.text().await.ok(),
            "file[parent_id]" => {
                form.parent_id = field.text().await.ok().and_then(|s| s.parse().ok());
            }
            "file[private]" => {
                form.private = field.text().await.ok().and_then(|s| s.parse().ok());
            }
            "file[data]" => {
                form.has_data = field.bytes().await.is_ok();
            }
            _ => {}
        }
    }

    form
}

/// POST /rest/v1.0/files (multipart upload).
pub async fn create_file(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(scope): Query<ProjectScopeQuery>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = read_file_form(multipart).await;

    let Some(name) = form.name else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": "file[name] is required" })),
        )
            .into_response();
    };
    if !form.has_data {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": "file[data] is required" })),
        )
            .into_response();
    }

    let mut state = state.write().await;
    match state.create_document(
        scope.project_id,
        &name,
        form.parent_id,
        DocumentType::File,
        form.description,
    ) {
        Some(document) => (StatusCode::CREATED, Json(document)).into_response(),
        None => name_conflict(),
    }
}

/// PATCH /rest/v1.0/files/{doc_id}
///
/// The real endpoint accepts either a metadata-only JSON body or a
/// multipart re-upload; branch on the content type.
pub async fn update_file(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(doc_id): Path<u64>,
    Query(scope): Query<ProjectScopeQuery>,
    request: Request,
) -> impl IntoResponse {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let (parent_id, name, description, private) = if content_type.starts_with("multipart/form-data")
    {
        let Ok(multipart) = Multipart::from_request(request, &()).await else {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": "malformed multipart body" })),
            )
                .into_response();
        };
        let form = read_file_form(multipart).await;
        (form.parent_id, form.name, form.description, form.private)
    } else {
        let Ok(bytes) = axum::body::to_bytes(request.into_body(), MAX_JSON_BODY).await else {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": "unreadable body" })),
            )
                .into_response();
        };
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or_default();
        let file = body.get("file").cloned().unwrap_or_default();

        (
            file.get("parent_id").and_then(|p| p.as_u64()),
            file.get("name").and_then(|n| n.as_str()).map(str::to_owned),
            file.get("description")
                .and_then(|d| d.as_str())
                .map(str::to_owned),
            file.get("private").and_then(|p| p.as_bool()),
        )
    };

    let mut state = state.write().await;
    match state.update_document(scope.project_id, doc_id, parent_id, name, description, private) {
        Some(document) => (StatusCode::OK, Json(document)).into_response(),
        None => not_found("file", doc_id),
    }
}

/// DELETE /rest/v1.0/files/{doc_id}
pub async fn delete_file(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(doc_id): Path<u64>,
    Query(scope): Query<ProjectScopeQuery>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.delete_document(scope.project_id, doc_id) {
        Some(document) => (StatusCode::OK, Json(document)).into_response(),
        None => not_found("file", doc_id),
    }
}
