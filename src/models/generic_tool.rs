//! Generic tool models and item operations.
//!
//! Generic tools are customer-configurable data modules; their items
//! carry arbitrary columns, so the item model keeps unknown fields in a
//! flattened map instead of forcing a schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};
use crate::ident::Ident;
use crate::pagination::Page;
use crate::traits::{Find, List, DEFAULT_PER_PAGE};

/// Page size for the tool item pagination loop. Item counts are
/// unbounded, so pages are pulled as large as the API allows.
const TOOL_ITEMS_PER_PAGE: u32 = 10_000;

/// A generic tool definition configured on a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericTool {
    /// Unique tool id.
    pub id: u64,

    /// The tool title.
    pub title: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// When the tool was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the tool was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl List for GenericTool {
    type Query = u64; // company id

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProcoreClient,
        company_id: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let path = format!("rest/v1.0/companies/{company_id}/generic_tools");
        let params = [("page", page), ("per_page", per_page)];

        let response = client
            .get_with_query(&path, Some(*company_id), &params)
            .await?;
        let tools: Vec<GenericTool> = response.json().await.map_err(ProcoreError::HttpError)?;

        Ok(Page::new(tools, page, per_page))
    }
}

impl Find for GenericTool {
    const ENTITY: &'static str = "generic tool";

    fn matches(&self, ident: &Ident) -> bool {
        match ident {
            Ident::Id(id) => self.id == *id,
            Ident::Name(title) => self.title == *title,
        }
    }
}

/// Scoping identifiers for tool item operations.
///
/// Items live under a tool, under a project, under a company; all three
/// ids travel with every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolItemScope {
    /// The owning company.
    pub company_id: u64,
    /// The owning project.
    pub project_id: u64,
    /// The generic tool the items belong to.
    pub tool_id: u64,
}

impl ToolItemScope {
    fn items_path(&self) -> String {
        format!(
            "rest/v1.0/projects/{}/generic_tools/{}/generic_tool_items",
            self.project_id, self.tool_id
        )
    }
}

/// An item in a generic tool.
///
/// Only the fields common to every tool are typed; customer-defined
/// columns are preserved in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolItem {
    /// Unique item id.
    pub id: u64,

    /// The item title.
    #[serde(default)]
    pub title: Option<String>,

    /// When the item was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the item was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Customer-defined columns and anything else the tool returns.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[async_trait]
impl List for ToolItem {
    type Query = ToolItemScope;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProcoreClient,
        scope: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams {
            view: &'static str,
            sort: &'static str,
            #[serde(rename = "filters[recycle_bin]")]
            recycle_bin: bool,
            page: u32,
            per_page: u32,
        }

        let params = RequestParams {
            view: "extended",
            sort: "created_at",
            recycle_bin: false,
            page,
            per_page,
        };

        let response = client
            .get_with_query(&scope.items_path(), Some(scope.company_id), &params)
            .await?;
        let items: Vec<ToolItem> = response.json().await.map_err(ProcoreError::HttpError)?;

        Ok(Page::new(items, page, per_page))
    }
}

/// A workflow status available on a generic tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStatus {
    /// Unique status id.
    pub id: u64,

    /// The status label.
    pub status: String,

    /// Display color, when configured.
    #[serde(default)]
    pub color: Option<String>,
}

// Convenience functions for working with generic tools

/// Fetch the generic tools configured on a company (single page).
pub async fn get_tools(client: &ProcoreClient, company_id: u64) -> Result<Vec<GenericTool>> {
    let page = GenericTool::list_page(client, &company_id, 1, DEFAULT_PER_PAGE).await?;
    Ok(page.items)
}

/// Find a generic tool by id or title.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when no tool matches.
pub async fn find_tool(
    client: &ProcoreClient,
    company_id: u64,
    ident: impl Into<Ident>,
) -> Result<GenericTool> {
    GenericTool::find(client, &company_id, &ident.into()).await
}

/// Fetch every item of a generic tool.
///
/// Walks the item endpoint page by page until a page comes back empty or
/// short, returning one flat list.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when the tool has no items at all.
#[tracing::instrument(skip(client))]
pub async fn get_tool_items(client: &ProcoreClient, scope: ToolItemScope) -> Result<Vec<ToolItem>> {
    let items = ToolItem::list_all_with(client, &scope, TOOL_ITEMS_PER_PAGE).await?;

    if items.is_empty() {
        return Err(ProcoreError::NotFound {
            entity_type: "tool items in project",
            id: format!("{} (tool {})", scope.project_id, scope.tool_id),
        });
    }
    Ok(items)
}

/// Create a new item in a generic tool.
///
/// Tool columns are customer-defined, so the payload is caller-shaped
/// JSON rather than a typed struct.
///
/// # Errors
///
/// A rejection from the API is translated to
/// [`ProcoreError::WrongParams`] carrying the original message.
#[tracing::instrument(skip(client, data))]
pub async fn create_tool_item(
    client: &ProcoreClient,
    scope: ToolItemScope,
    data: &Value,
) -> Result<ToolItem> {
    let response = match client
        .post(&scope.items_path(), Some(scope.company_id), data)
        .await
    {
        Ok(response) => response,
        Err(ProcoreError::ApiError { message, .. }) => {
            return Err(ProcoreError::WrongParams { message });
        }
        Err(err) => return Err(err),
    };

    let item: ToolItem = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(item)
}

/// Fetch the statuses available on a generic tool (unpaginated).
#[tracing::instrument(skip(client))]
pub async fn get_tool_statuses(
    client: &ProcoreClient,
    scope: ToolItemScope,
) -> Result<Vec<ToolStatus>> {
    let path = format!("{}/available_statuses", scope.items_path());

    let response = client.get(&path, Some(scope.company_id)).await?;
    let statuses: Vec<ToolStatus> = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_deserialize() {
        let json = r#"{"id": 55, "title": "Idea Submission", "description": "Crowd-sourced ideas"}"#;
        let tool: GenericTool = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(tool.id, 55);
        assert_eq!(tool.title, "Idea Submission");
    }

    #[test]
    fn test_tool_matches_title_not_id_digits() {
        let tool: GenericTool =
            serde_json::from_str(r#"{"id": 55, "title": "Idea Submission"}"#).unwrap();
        assert!(tool.matches(&Ident::Id(55)));
        assert!(tool.matches(&Ident::Name("Idea Submission".to_string())));
        assert!(!tool.matches(&Ident::Name("55".to_string())));
    }

    #[test]
    fn test_tool_item_preserves_custom_columns() {
        let json = r#"{
            "id": 9001,
            "title": "Install hoist",
            "custom_field_1234": "crane bay",
            "status": {"id": 1, "name": "Open"}
        }"#;
        let item: ToolItem = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(item.id, 9001);
        assert_eq!(item.title.as_deref(), Some("Install hoist"));
        assert_eq!(
            item.extra.get("custom_field_1234").and_then(Value::as_str),
            Some("crane bay")
        );
        assert!(item.extra.contains_key("status"));
    }

    #[test]
    fn test_tool_item_roundtrip_keeps_extra() {
        let json = r#"{"id": 1, "title": "t", "custom": 3}"#;
        let item: ToolItem = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back.get("custom").unwrap(), 3);
    }

    #[test]
    fn test_items_path() {
        let scope = ToolItemScope {
            company_id: 1,
            project_id: 108707,
            tool_id: 55,
        };
        assert_eq!(
            scope.items_path(),
            "rest/v1.0/projects/108707/generic_tools/55/generic_tool_items"
        );
    }

    #[test]
    fn test_tool_status_deserialize() {
        let json = r##"[{"id": 1, "status": "Open", "color": "#00ff00"}, {"id": 2, "status": "Closed"}]"##;
        let statuses: Vec<ToolStatus> = serde_json::from_str(json).unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].status, "Open");
        assert!(statuses[1].color.is_none());
    }
}
