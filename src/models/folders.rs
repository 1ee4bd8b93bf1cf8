//! Folder operations on a project's document tree.

use serde::Serialize;

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};
use crate::models::document::{self, Document, FOLDERS_ENDPOINT};

/// Parameters for updating a folder.
///
/// Only fields that are set are serialized; the API treats an omitted
/// field and an explicit null differently, so absent fields must stay
/// out of the body entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderUpdateParams {
    /// New containing folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    /// New folder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the folder carries explicit permissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_permissions: Option<bool>,
}

/// Fetch all live folders in a project.
///
/// Filters the full document tree to entries that are folders and are
/// neither deleted nor the recycle bin.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when the project has no live folders.
#[tracing::instrument(skip(client))]
pub async fn get(client: &ProcoreClient, company_id: u64, project_id: u64) -> Result<Vec<Document>> {
    let documents = document::get_documents(client, company_id, project_id).await?;

    let folders: Vec<Document> = documents.into_iter().filter(Document::is_folder).collect();

    if folders.is_empty() {
        return Err(ProcoreError::NotFound {
            entity_type: "folders in project",
            id: project_id.to_string(),
        });
    }
    Ok(folders)
}

/// Fetch the root folder listing of a project.
///
/// Returns the root folder with its direct subfolders and files
/// populated.
#[tracing::instrument(skip(client))]
pub async fn root(client: &ProcoreClient, company_id: u64, project_id: u64) -> Result<Document> {
    let params = [("project_id", project_id)];

    let response = client
        .get_with_query(FOLDERS_ENDPOINT, Some(company_id), &params)
        .await?;
    let root: Document = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(root)
}

/// Fetch one folder with full detail, including its children.
pub async fn show(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
) -> Result<Document> {
    document::show(client, FOLDERS_ENDPOINT, company_id, project_id, doc_id).await
}

/// Delete a folder.
pub async fn remove(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
) -> Result<Document> {
    document::remove(client, FOLDERS_ENDPOINT, company_id, project_id, doc_id).await
}

/// Create a folder.
///
/// Without a `parent_id` the folder is placed at the project root; the
/// field is omitted from the payload rather than sent as null.
///
/// # Errors
///
/// A rejection from the API (typically a duplicate name under the same
/// parent) is translated to [`ProcoreError::WrongParams`].
#[tracing::instrument(skip(client))]
pub async fn create(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    folder_name: &str,
    parent_id: Option<u64>,
) -> Result<Document> {
    #[derive(Serialize)]
    struct FolderPayload<'a> {
        name: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent_id: Option<u64>,
        explicit_permissions: bool,
    }

    #[derive(Serialize)]
    struct RequestBody<'a> {
        folder: FolderPayload<'a>,
    }

    let body = RequestBody {
        folder: FolderPayload {
            name: folder_name,
            parent_id,
            explicit_permissions: false,
        },
    };
    let params = [("project_id", project_id)];

    let response = match client
        .post_with_query(FOLDERS_ENDPOINT, Some(company_id), &params, &body)
        .await
    {
        Ok(response) => response,
        Err(ProcoreError::ApiError { message, .. }) => {
            return Err(ProcoreError::WrongParams {
                message: format!("folder '{folder_name}' already exists: {message}"),
            });
        }
        Err(err) => return Err(err),
    };

    let document: Document = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(document)
}

/// Update a folder with a sparse body.
#[tracing::instrument(skip(client))]
pub async fn update(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
    params: FolderUpdateParams,
) -> Result<Document> {
    #[derive(Serialize)]
    struct RequestBody<'a> {
        folder: &'a FolderUpdateParams,
    }

    let path = format!("{FOLDERS_ENDPOINT}/{doc_id}");
    let query = [("project_id", project_id)];
    let body = RequestBody { folder: &params };

    let response = client
        .patch_with_query(&path, Some(company_id), &query, &body)
        .await?;
    let document: Document = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(document)
}

/// Find a folder by exact name and fetch its full detail.
///
/// Scans the live folders of the project; on a match the folder is
/// re-fetched through the show endpoint so the children come populated.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when no folder has that name.
#[tracing::instrument(skip(client))]
pub async fn find(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    name: &str,
) -> Result<Document> {
    let folders = get(client, company_id, project_id).await?;

    for folder in folders {
        if folder.name == name {
            return show(client, company_id, project_id, folder.id).await;
        }
    }

    Err(ProcoreError::NotFound {
        entity_type: "folder",
        id: name.to_string(),
    })
}
