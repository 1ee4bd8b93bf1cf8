//! File operations on a project's document tree, including uploads.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};
use crate::models::document::{self, Document, FILES_ENDPOINT};

/// Parameters for updating a file's metadata.
///
/// Only fields that are set are serialized or included as multipart
/// fields; absent fields must stay out of the request entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileUpdateParams {
    /// New containing folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    /// New file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the file carries explicit permissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

/// Read a local file into an upload part, named after the path's final
/// component.
async fn upload_part(filepath: &Path) -> Result<(String, Part)> {
    let file_name = filepath
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| ProcoreError::InvalidPath(filepath.display().to_string()))?;

    let bytes = tokio::fs::read(filepath).await?;
    let part = Part::bytes(bytes).file_name(file_name.clone());
    Ok((file_name, part))
}

/// Fetch all live files in a project.
///
/// Filters the full document tree to entries that are files and are
/// neither deleted nor recycled.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when the project has no live files.
#[tracing::instrument(skip(client))]
pub async fn get(client: &ProcoreClient, company_id: u64, project_id: u64) -> Result<Vec<Document>> {
    let documents = document::get_documents(client, company_id, project_id).await?;

    let files: Vec<Document> = documents.into_iter().filter(Document::is_file).collect();

    if files.is_empty() {
        return Err(ProcoreError::NotFound {
            entity_type: "files in project",
            id: project_id.to_string(),
        });
    }
    Ok(files)
}

/// Fetch one file with full detail.
pub async fn show(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
) -> Result<Document> {
    document::show(client, FILES_ENDPOINT, company_id, project_id, doc_id).await
}

/// Delete a file.
pub async fn remove(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
) -> Result<Document> {
    document::remove(client, FILES_ENDPOINT, company_id, project_id, doc_id).await
}

/// Upload a local file into a project.
///
/// The upload is a multipart form: `file[name]` derived from the path's
/// final component, the contents as `file[data]`, plus optional
/// `file[description]` and `file[parent_id]`. Without a `parent_id` the
/// file lands at the project root. A missing description is omitted from
/// the form rather than sent as a placeholder.
///
/// # Errors
///
/// A rejection from the API (typically a duplicate name under the same
/// parent) is translated to [`ProcoreError::WrongParams`]. Reading the
/// local file can fail with [`ProcoreError::Io`].
#[tracing::instrument(skip(client))]
pub async fn create(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    filepath: &Path,
    parent_id: Option<u64>,
    description: Option<&str>,
) -> Result<Document> {
    let (file_name, part) = upload_part(filepath).await?;

    let mut form = Form::new().text("file[name]", file_name.clone());
    if let Some(description) = description {
        form = form.text("file[description]", description.to_string());
    }
    if let Some(parent_id) = parent_id {
        form = form.text("file[parent_id]", parent_id.to_string());
    }
    form = form.part("file[data]", part);

    let params = [("project_id", project_id)];

    let response = match client
        .post_multipart(FILES_ENDPOINT, Some(company_id), &params, form)
        .await
    {
        Ok(response) => response,
        Err(ProcoreError::ApiError { message, .. }) => {
            return Err(ProcoreError::WrongParams {
                message: format!("file '{file_name}' already exists: {message}"),
            });
        }
        Err(err) => return Err(err),
    };

    let document: Document = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(document)
}

/// Update a file's metadata and optionally replace its contents.
///
/// With an `upload` path the request is a multipart PATCH carrying the
/// sparse `file[...]` fields plus the new contents; without one it is a
/// metadata-only JSON PATCH.
#[tracing::instrument(skip(client))]
pub async fn update(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
    params: FileUpdateParams,
    upload: Option<&Path>,
) -> Result<Document> {
    let path = format!("{FILES_ENDPOINT}/{doc_id}");
    let query = [("project_id", project_id)];

    let response = match upload {
        Some(filepath) => {
            let mut form = Form::new();
            if let Some(parent_id) = params.parent_id {
                form = form.text("file[parent_id]", parent_id.to_string());
            }
            if let Some(name) = &params.name {
                form = form.text("file[name]", name.clone());
            }
            if let Some(description) = &params.description {
                form = form.text("file[description]", description.clone());
            }
            if let Some(private) = params.private {
                form = form.text("file[private]", private.to_string());
            }

            let (_, part) = upload_part(filepath).await?;
            form = form.part("file[data]", part);

            client
                .patch_multipart(&path, Some(company_id), &query, form)
                .await?
        }
        None => {
            #[derive(Serialize)]
            struct RequestBody<'a> {
                file: &'a FileUpdateParams,
            }

            let body = RequestBody { file: &params };
            client
                .patch_with_query(&path, Some(company_id), &query, &body)
                .await?
        }
    };

    let document: Document = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(document)
}

/// Find a file by exact name and fetch its full detail.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when no file has that name.
#[tracing::instrument(skip(client))]
pub async fn find(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    name: &str,
) -> Result<Document> {
    let files = get(client, company_id, project_id).await?;

    for file in files {
        if file.name == name {
            return show(client, company_id, project_id, file.id).await;
        }
    }

    Err(ProcoreError::NotFound {
        entity_type: "file",
        id: name.to_string(),
    })
}
