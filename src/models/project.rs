//! Project model, project regions/types, and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};
use crate::ident::Ident;
use crate::pagination::Page;
use crate::traits::{Find, List, DEFAULT_PER_PAGE};

/// A Procore project.
///
/// Projects live under a company and contain the working data: the
/// document tree, generic tool items, direct costs, and so on. Every
/// project call carries the owning company id as a scoping header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project id.
    pub id: u64,

    /// The project name.
    pub name: String,

    /// Display name (name plus project number where configured).
    #[serde(default)]
    pub display_name: Option<String>,

    /// Customer-assigned project number.
    #[serde(default)]
    pub project_number: Option<String>,

    /// Whether the project is active.
    #[serde(default)]
    pub active: bool,

    /// Project stage (e.g., "Course of Construction").
    #[serde(default)]
    pub stage: Option<String>,

    /// Street address.
    #[serde(default)]
    pub address: Option<String>,

    /// City.
    #[serde(default)]
    pub city: Option<String>,

    /// State or province code.
    #[serde(default)]
    pub state_code: Option<String>,

    /// Country code.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Zip or postal code.
    #[serde(default)]
    pub zip: Option<String>,

    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// When the project was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the project was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl List for Project {
    type Query = u64; // company id

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProcoreClient,
        company_id: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let path = format!("rest/v1.0/companies/{company_id}/projects");
        let params = [("page", page), ("per_page", per_page)];

        let response = client
            .get_with_query(&path, Some(*company_id), &params)
            .await?;
        let projects: Vec<Project> = response.json().await.map_err(ProcoreError::HttpError)?;

        Ok(Page::new(projects, page, per_page))
    }
}

impl Find for Project {
    const ENTITY: &'static str = "project";

    fn matches(&self, ident: &Ident) -> bool {
        match ident {
            Ident::Id(id) => self.id == *id,
            Ident::Name(name) => self.name == *name,
        }
    }
}

/// A geographic project region configured on a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRegion {
    /// Unique region id.
    pub id: u64,
    /// The region name.
    pub name: String,
}

#[async_trait]
impl List for ProjectRegion {
    type Query = u64; // company id

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProcoreClient,
        company_id: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let path = format!("rest/v1.0/companies/{company_id}/project_regions");
        let params = [("page", page), ("per_page", per_page)];

        let response = client
            .get_with_query(&path, Some(*company_id), &params)
            .await?;
        let regions: Vec<ProjectRegion> = response.json().await.map_err(ProcoreError::HttpError)?;

        Ok(Page::new(regions, page, per_page))
    }
}

/// A project type configured on a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectType {
    /// Unique project type id.
    pub id: u64,
    /// The type name.
    pub name: String,
}

#[async_trait]
impl List for ProjectType {
    type Query = u64; // company id

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProcoreClient,
        company_id: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let path = format!("rest/v1.0/companies/{company_id}/project_types");
        let params = [("page", page), ("per_page", per_page)];

        let response = client
            .get_with_query(&path, Some(*company_id), &params)
            .await?;
        let types: Vec<ProjectType> = response.json().await.map_err(ProcoreError::HttpError)?;

        Ok(Page::new(types, page, per_page))
    }
}

// Convenience functions for working with projects

/// Fetch the first page of projects under a company.
pub async fn get_projects(client: &ProcoreClient, company_id: u64) -> Result<Vec<Project>> {
    let page = Project::list_page(client, &company_id, 1, DEFAULT_PER_PAGE).await?;
    Ok(page.items)
}

/// Find a project under a company by id or name.
///
/// Scans the project listing page by page until a match.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when no project matches.
pub async fn find_project(
    client: &ProcoreClient,
    company_id: u64,
    ident: impl Into<Ident>,
) -> Result<Project> {
    Project::find(client, &company_id, &ident.into()).await
}

/// Fetch a page of project regions configured on a company.
pub async fn get_project_regions(
    client: &ProcoreClient,
    company_id: u64,
    page: u32,
    per_page: u32,
) -> Result<Vec<ProjectRegion>> {
    let page = ProjectRegion::list_page(client, &company_id, page, per_page).await?;
    Ok(page.items)
}

/// Fetch a page of project types configured on a company.
pub async fn get_project_types(
    client: &ProcoreClient,
    company_id: u64,
    page: u32,
    per_page: u32,
) -> Result<Vec<ProjectType>> {
    let page = ProjectType::list_page(client, &company_id, page, per_page).await?;
    Ok(page.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_deserialize() {
        let json = r#"{
            "id": 108707,
            "name": "Sandbox Test Project",
            "display_name": "1122 - Sandbox Test Project",
            "project_number": "1122",
            "active": true,
            "stage": "Course of Construction",
            "city": "Austin",
            "state_code": "TX"
        }"#;
        let project: Project = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(project.id, 108707);
        assert_eq!(project.name, "Sandbox Test Project");
        assert!(project.active);
        assert_eq!(project.state_code.as_deref(), Some("TX"));
        assert!(project.created_at.is_none());
    }

    #[test]
    fn test_project_deserialize_minimal() {
        let json = r#"{"id": 1, "name": "Bare"}"#;
        let project: Project = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(project.id, 1);
        assert!(!project.active);
        assert!(project.display_name.is_none());
    }

    #[test]
    fn test_project_matches() {
        let project: Project =
            serde_json::from_str(r#"{"id": 108707, "name": "Sandbox Test Project"}"#).unwrap();
        assert!(project.matches(&Ident::Id(108707)));
        assert!(project.matches(&Ident::Name("Sandbox Test Project".to_string())));
        assert!(!project.matches(&Ident::Name("Sandbox".to_string())));
    }

    #[test]
    fn test_region_and_type_deserialize() {
        let region: ProjectRegion =
            serde_json::from_str(r#"{"id": 3, "name": "Southwest"}"#).unwrap();
        assert_eq!(region.name, "Southwest");

        let ptype: ProjectType = serde_json::from_str(r#"{"id": 9, "name": "Hospital"}"#).unwrap();
        assert_eq!(ptype.id, 9);
    }
}
