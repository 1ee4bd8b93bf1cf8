//! Document record shared by the folder and file operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};

pub(crate) const FOLDERS_ENDPOINT: &str = "rest/v1.0/folders";
pub(crate) const FILES_ENDPOINT: &str = "rest/v1.0/files";

/// Discriminator for entries in a project's document tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A folder.
    Folder,
    /// A file.
    File,
    /// Unknown document type. Folder detail responses omit the
    /// discriminator entirely, so this is also the default.
    #[default]
    #[serde(other)]
    Unknown,
}

/// An entry in a project's document tree, either a folder or a file.
///
/// The tree endpoint returns a flat list mixing both kinds; the
/// `document_type` field discriminates, and deleted or recycled entries
/// stay in the list flagged rather than removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document id.
    pub id: u64,

    /// The folder or file name.
    pub name: String,

    /// Id of the containing folder. Root entries have none.
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// Whether this entry is a folder or a file. Absent on folder
    /// detail responses, where the endpoint already implies the kind.
    #[serde(default)]
    pub document_type: DocumentType,

    /// Whether the entry has been deleted.
    #[serde(default)]
    pub is_deleted: bool,

    /// Whether the entry is the recycle bin.
    #[serde(default)]
    pub is_recycle_bin: bool,

    /// Whether the entry carries explicit permissions.
    #[serde(default)]
    pub private: bool,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// When the entry was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the entry was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Subfolders, populated on folder detail responses.
    #[serde(default)]
    pub folders: Vec<Document>,

    /// Contained files, populated on folder detail responses.
    #[serde(default)]
    pub files: Vec<Document>,
}

impl Document {
    /// Whether this entry is neither deleted nor the recycle bin.
    pub fn is_live(&self) -> bool {
        !self.is_deleted && !self.is_recycle_bin
    }

    /// Whether this entry is a live folder.
    pub fn is_folder(&self) -> bool {
        self.is_live() && self.document_type == DocumentType::Folder
    }

    /// Whether this entry is a live file.
    pub fn is_file(&self) -> bool {
        self.is_live() && self.document_type == DocumentType::File
    }
}

/// Fetch a project's full document tree, unfiltered.
///
/// One unpaginated call; the result mixes folders and files and includes
/// deleted and recycled entries. Use [`crate::folders::get`] or
/// [`crate::files::get`] for the filtered views.
#[tracing::instrument(skip(client))]
pub async fn get_documents(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
) -> Result<Vec<Document>> {
    let path = format!("rest/v1.0/projects/{project_id}/documents");
    let response = client.get(&path, Some(company_id)).await?;
    let documents: Vec<Document> = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(documents)
}

/// Fetch one folder or file by id.
///
/// Shared by the folder and file families; `endpoint` selects the
/// resource prefix.
pub(crate) async fn show(
    client: &ProcoreClient,
    endpoint: &str,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
) -> Result<Document> {
    let path = format!("{endpoint}/{doc_id}");
    let params = [("project_id", project_id)];

    let response = client
        .get_with_query(&path, Some(company_id), &params)
        .await?;
    let document: Document = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(document)
}

/// Delete one folder or file by id.
pub(crate) async fn remove(
    client: &ProcoreClient,
    endpoint: &str,
    company_id: u64,
    project_id: u64,
    doc_id: u64,
) -> Result<Document> {
    let path = format!("{endpoint}/{doc_id}");
    let params = [("project_id", project_id)];

    let response = client
        .delete_with_query(&path, Some(company_id), &params)
        .await?;
    let document: Document = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document(id: u64, name: &str, document_type: DocumentType) -> Document {
        Document {
            id,
            name: name.to_string(),
            parent_id: None,
            document_type,
            is_deleted: false,
            is_recycle_bin: false,
            private: false,
            description: None,
            created_at: None,
            updated_at: None,
            folders: vec![],
            files: vec![],
        }
    }

    #[test]
    fn test_document_deserialize() {
        let json = r#"{
            "id": 42,
            "name": "Drawings",
            "parent_id": 7,
            "document_type": "folder",
            "is_deleted": false,
            "is_recycle_bin": false,
            "private": true
        }"#;
        let doc: Document = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(doc.id, 42);
        assert_eq!(doc.document_type, DocumentType::Folder);
        assert_eq!(doc.parent_id, Some(7));
        assert!(doc.private);
        assert!(doc.is_live());
    }

    #[test]
    fn test_document_type_unknown() {
        let json = r#"{"id": 1, "name": "x", "document_type": "shortcut"}"#;
        let doc: Document = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(doc.document_type, DocumentType::Unknown);
        assert!(!doc.is_folder());
        assert!(!doc.is_file());
    }

    #[test]
    fn test_folder_detail_without_discriminator() {
        // Folder detail responses omit document_type and carry children
        let json = r#"{
            "id": 7,
            "name": "Root",
            "folders": [{"id": 8, "name": "Drawings"}],
            "files": [{"id": 9, "name": "plan.pdf"}]
        }"#;
        let doc: Document = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(doc.document_type, DocumentType::Unknown);
        assert_eq!(doc.folders.len(), 1);
        assert_eq!(doc.files.len(), 1);
        assert_eq!(doc.folders[0].name, "Drawings");
    }

    #[test]
    fn test_document_liveness() {
        let mut doc = sample_document(1, "spec.pdf", DocumentType::File);
        assert!(doc.is_file());

        doc.is_deleted = true;
        assert!(!doc.is_live());
        assert!(!doc.is_file());

        doc.is_deleted = false;
        doc.is_recycle_bin = true;
        assert!(!doc.is_live());
    }
}
