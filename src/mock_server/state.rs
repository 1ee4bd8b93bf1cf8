//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Procore API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    Company, DirectCost, Document, DocumentType, GenericTool, Project, ProjectRegion, ProjectType,
    ToolItem, ToolStatus,
};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access. Collections
/// are ordered so pagination is deterministic.
#[derive(Debug, Default)]
pub struct MockState {
    /// Companies visible to the token, in listing order.
    pub companies: Vec<Company>,

    /// Projects indexed by company id.
    pub projects: HashMap<u64, Vec<Project>>,

    /// Project regions indexed by company id.
    pub regions: HashMap<u64, Vec<ProjectRegion>>,

    /// Project types indexed by company id.
    pub project_types: HashMap<u64, Vec<ProjectType>>,

    /// Document trees indexed by project id. Deleted entries stay in
    /// the tree flagged `is_deleted`, as the real API does.
    pub documents: HashMap<u64, Vec<Document>>,

    /// Generic tools indexed by company id.
    pub tools: HashMap<u64, Vec<GenericTool>>,

    /// Tool items indexed by (project id, tool id).
    pub tool_items: HashMap<(u64, u64), Vec<ToolItem>>,

    /// Tool statuses indexed by (project id, tool id).
    pub tool_statuses: HashMap<(u64, u64), Vec<ToolStatus>>,

    /// Direct costs indexed by project id.
    pub direct_costs: HashMap<u64, Vec<DirectCost>>,

    /// Next id handed out for created documents.
    pub next_document_id: u64,

    /// Next id handed out for created tool items.
    pub next_item_id: u64,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            next_document_id: 10_000,
            next_item_id: 90_000,
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a company to the state.
    pub fn with_company(mut self, company: Company) -> Self {
        self.companies.push(company);
        self
    }

    /// Add a project under a company.
    pub fn with_project(mut self, company_id: u64, project: Project) -> Self {
        self.projects.entry(company_id).or_default().push(project);
        self
    }

    /// Add a project region under a company.
    pub fn with_region(mut self, company_id: u64, region: ProjectRegion) -> Self {
        self.regions.entry(company_id).or_default().push(region);
        self
    }

    /// Add a project type under a company.
    pub fn with_project_type(mut self, company_id: u64, ptype: ProjectType) -> Self {
        self.project_types
            .entry(company_id)
            .or_default()
            .push(ptype);
        self
    }

    /// Add a document to a project's tree.
    pub fn with_document(mut self, project_id: u64, document: Document) -> Self {
        self.documents.entry(project_id).or_default().push(document);
        self
    }

    /// Add a generic tool under a company.
    pub fn with_tool(mut self, company_id: u64, tool: GenericTool) -> Self {
        self.tools.entry(company_id).or_default().push(tool);
        self
    }

    /// Add a tool item under (project, tool).
    pub fn with_tool_item(mut self, project_id: u64, tool_id: u64, item: ToolItem) -> Self {
        self.tool_items
            .entry((project_id, tool_id))
            .or_default()
            .push(item);
        self
    }

    /// Add a tool status under (project, tool).
    pub fn with_tool_status(mut self, project_id: u64, tool_id: u64, status: ToolStatus) -> Self {
        self.tool_statuses
            .entry((project_id, tool_id))
            .or_default()
            .push(status);
        self
    }

    /// Add a direct cost under a project.
    pub fn with_direct_cost(mut self, project_id: u64, cost: DirectCost) -> Self {
        self.direct_costs
            .entry(project_id)
            .or_default()
            .push(cost);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get a project's document tree.
    pub fn documents_for(&self, project_id: u64) -> &[Document] {
        self.documents
            .get(&project_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a document by id within a project.
    pub fn find_document(&self, project_id: u64, doc_id: u64) -> Option<&Document> {
        self.documents_for(project_id).iter().find(|d| d.id == doc_id)
    }

    /// Whether a live document with this name already exists under the parent.
    fn name_taken(
        &self,
        project_id: u64,
        parent_id: Option<u64>,
        name: &str,
        document_type: DocumentType,
    ) -> bool {
        self.documents_for(project_id).iter().any(|d| {
            d.is_live()
                && d.document_type == document_type
                && d.parent_id == parent_id
                && d.name == name
        })
    }

    /// Create a document in a project's tree.
    ///
    /// Returns `None` when a live sibling of the same kind already has
    /// the name, mirroring the real API's rejection.
    pub fn create_document(
        &mut self,
        project_id: u64,
        name: &str,
        parent_id: Option<u64>,
        document_type: DocumentType,
        description: Option<String>,
    ) -> Option<Document> {
        if self.name_taken(project_id, parent_id, name, document_type) {
            return None;
        }

        let id = self.next_document_id;
        self.next_document_id += 1;

        let document = Document {
            id,
            name: name.to_string(),
            parent_id,
            document_type,
            is_deleted: false,
            is_recycle_bin: false,
            private: false,
            description,
            created_at: None,
            updated_at: None,
            folders: vec![],
            files: vec![],
        };

        self.documents
            .entry(project_id)
            .or_default()
            .push(document.clone());
        Some(document)
    }

    /// Apply a sparse update to a document and return the updated version.
    pub fn update_document(
        &mut self,
        project_id: u64,
        doc_id: u64,
        parent_id: Option<u64>,
        name: Option<String>,
        description: Option<String>,
        private: Option<bool>,
    ) -> Option<Document> {
        let documents = self.documents.get_mut(&project_id)?;
        let document = documents.iter_mut().find(|d| d.id == doc_id)?;

        if let Some(p) = parent_id {
            document.parent_id = Some(p);
        }
        if let Some(n) = name {
            document.name = n;
        }
        if let Some(d) = description {
            document.description = Some(d);
        }
        if let Some(p) = private {
            document.private = p;
        }
        Some(document.clone())
    }

    /// Mark a document deleted and return its final state.
    ///
    /// The record stays in the tree flagged `is_deleted`, so filtered
    /// listings can be exercised against it.
    pub fn delete_document(&mut self, project_id: u64, doc_id: u64) -> Option<Document> {
        let documents = self.documents.get_mut(&project_id)?;
        let document = documents.iter_mut().find(|d| d.id == doc_id)?;
        document.is_deleted = true;
        Some(document.clone())
    }

    /// A folder detail view: the folder with its direct children populated.
    pub fn folder_detail(&self, project_id: u64, doc_id: u64) -> Option<Document> {
        let mut folder = self.find_document(project_id, doc_id)?.clone();
        self.fill_children(project_id, &mut folder);
        Some(folder)
    }

    /// The root listing: a synthetic folder holding the parentless entries.
    pub fn root_listing(&self, project_id: u64) -> Document {
        let mut root = Document {
            id: 0,
            name: "Root".to_string(),
            parent_id: None,
            document_type: DocumentType::Folder,
            is_deleted: false,
            is_recycle_bin: false,
            private: false,
            description: None,
            created_at: None,
            updated_at: None,
            folders: vec![],
            files: vec![],
        };
        for doc in self.documents_for(project_id) {
            if doc.is_live() && doc.parent_id.is_none() {
                match doc.document_type {
                    DocumentType::Folder => root.folders.push(doc.clone()),
                    DocumentType::File => root.files.push(doc.clone()),
                    DocumentType::Unknown => {}
                }
            }
        }
        root
    }

    fn fill_children(&self, project_id: u64, folder: &mut Document) {
        for doc in self.documents_for(project_id) {
            if doc.is_live() && doc.parent_id == Some(folder.id) {
                match doc.document_type {
                    DocumentType::Folder => folder.folders.push(doc.clone()),
                    DocumentType::File => folder.files.push(doc.clone()),
                    DocumentType::Unknown => {}
                }
            }
        }
    }

    /// Create a tool item from a caller payload.
    pub fn create_tool_item(
        &mut self,
        project_id: u64,
        tool_id: u64,
        payload: &serde_json::Value,
    ) -> Option<ToolItem> {
        let body = payload.get("generic_tool_item")?.as_object()?;

        let id = self.next_item_id;
        self.next_item_id += 1;

        let mut extra = body.clone();
        let title = extra
            .remove("title")
            .and_then(|v| v.as_str().map(str::to_owned));

        let item = ToolItem {
            id,
            title,
            created_at: None,
            updated_at: None,
            extra,
        };

        self.tool_items
            .entry((project_id, tool_id))
            .or_default()
            .push(item.clone());
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_company(id: u64, name: &str) -> Company {
        Company {
            id,
            name: name.to_string(),
            is_active: true,
            my_company: None,
        }
    }

    #[test]
    fn test_state_add_and_list_companies() {
        let state = MockState::new()
            .with_company(sample_company(1, "Acme"))
            .with_company(sample_company(2, "DataPull"));

        assert_eq!(state.companies.len(), 2);
        assert_eq!(state.companies[1].name, "DataPull");
    }

    #[test]
    fn test_state_create_document_conflict() {
        let mut state = MockState::new();

        let first = state.create_document(101, "Drawings", None, DocumentType::Folder, None);
        assert!(first.is_some());

        // Same live name under the same parent is rejected
        let dup = state.create_document(101, "Drawings", None, DocumentType::Folder, None);
        assert!(dup.is_none());

        // Same name under a different parent is fine
        let nested =
            state.create_document(101, "Drawings", Some(first.unwrap().id), DocumentType::Folder, None);
        assert!(nested.is_some());
    }

    #[test]
    fn test_state_delete_marks_not_removes() {
        let mut state = MockState::new();
        let doc = state
            .create_document(101, "Old", None, DocumentType::Folder, None)
            .unwrap();

        let deleted = state.delete_document(101, doc.id).unwrap();
        assert!(deleted.is_deleted);
        assert_eq!(state.documents_for(101).len(), 1);

        // The name becomes reusable once the holder is deleted
        let again = state.create_document(101, "Old", None, DocumentType::Folder, None);
        assert!(again.is_some());
    }

    #[test]
    fn test_state_folder_detail_children() {
        let mut state = MockState::new();
        let parent = state
            .create_document(101, "Specs", None, DocumentType::Folder, None)
            .unwrap();
        state
            .create_document(101, "Div 03", Some(parent.id), DocumentType::Folder, None)
            .unwrap();
        state
            .create_document(101, "cover.pdf", Some(parent.id), DocumentType::File, None)
            .unwrap();

        let detail = state.folder_detail(101, parent.id).unwrap();
        assert_eq!(detail.folders.len(), 1);
        assert_eq!(detail.files.len(), 1);
    }

    #[test]
    fn test_state_create_tool_item_requires_wrapper() {
        let mut state = MockState::new();

        let bad = state.create_tool_item(101, 55, &serde_json::json!({"title": "x"}));
        assert!(bad.is_none());

        let good = state.create_tool_item(
            101,
            55,
            &serde_json::json!({"generic_tool_item": {"title": "x", "custom": 3}}),
        );
        let item = good.unwrap();
        assert_eq!(item.title.as_deref(), Some("x"));
        assert_eq!(item.extra.get("custom").unwrap(), 3);
    }
}
