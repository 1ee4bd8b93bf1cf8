//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{
    Company, DirectCost, Document, DocumentType, GenericTool, Project, ProjectRegion, ProjectType,
    ToolItem, ToolStatus, Vendor,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Company Fixtures
    // =========================================================================

    /// Create a minimal active company.
    pub fn company(id: u64, name: &str) -> Company {
        Company {
            id,
            name: name.to_string(),
            is_active: true,
            my_company: None,
        }
    }

    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a minimal project with required fields only.
    pub fn minimal_project(id: u64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            display_name: None,
            project_number: None,
            active: true,
            stage: None,
            address: None,
            city: None,
            state_code: None,
            country_code: None,
            zip: None,
            phone: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Create a project with a number and stage filled in.
    pub fn numbered_project(id: u64, name: &str, number: &str) -> Project {
        let mut project = Self::minimal_project(id, name);
        project.project_number = Some(number.to_string());
        project.display_name = Some(format!("{number} - {name}"));
        project.stage = Some("Course of Construction".to_string());
        project
    }

    /// Create a project region.
    pub fn region(id: u64, name: &str) -> ProjectRegion {
        ProjectRegion {
            id,
            name: name.to_string(),
        }
    }

    /// Create a project type.
    pub fn project_type(id: u64, name: &str) -> ProjectType {
        ProjectType {
            id,
            name: name.to_string(),
        }
    }

    // =========================================================================
    // Document Fixtures
    // =========================================================================

    /// Create a live folder entry.
    pub fn folder(id: u64, name: &str, parent_id: Option<u64>) -> Document {
        Self::document(id, name, parent_id, DocumentType::Folder)
    }

    /// Create a live file entry.
    pub fn file(id: u64, name: &str, parent_id: Option<u64>) -> Document {
        Self::document(id, name, parent_id, DocumentType::File)
    }

    /// Create a deleted document entry.
    pub fn deleted(id: u64, name: &str, document_type: DocumentType) -> Document {
        let mut doc = Self::document(id, name, None, document_type);
        doc.is_deleted = true;
        doc
    }

    /// Create the recycle bin entry.
    pub fn recycle_bin(id: u64) -> Document {
        let mut doc = Self::document(id, "Recycle Bin", None, DocumentType::Folder);
        doc.is_recycle_bin = true;
        doc
    }

    fn document(id: u64, name: &str, parent_id: Option<u64>, document_type: DocumentType) -> Document {
        Document {
            id,
            name: name.to_string(),
            parent_id,
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

    // =========================================================================
    // Generic Tool Fixtures
    // =========================================================================

    /// Create a generic tool.
    pub fn tool(id: u64, title: &str) -> GenericTool {
        GenericTool {
            id,
            title: title.to_string(),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Create a tool item with one custom column.
    pub fn tool_item(id: u64, title: &str) -> ToolItem {
        let mut extra = serde_json::Map::new();
        extra.insert(
            "custom_field_location".to_string(),
            serde_json::Value::String("crane bay".to_string()),
        );
        ToolItem {
            id,
            title: Some(title.to_string()),
            created_at: None,
            updated_at: None,
            extra,
        }
    }

    /// Create a tool status.
    pub fn tool_status(id: u64, status: &str) -> ToolStatus {
        ToolStatus {
            id,
            status: status.to_string(),
            color: None,
        }
    }

    // =========================================================================
    // Direct Cost Fixtures
    // =========================================================================

    /// Create a direct cost invoice.
    pub fn direct_cost(id: u64, invoice_number: &str, grand_total: f64) -> DirectCost {
        DirectCost {
            id,
            description: Some(format!("Invoice {invoice_number}")),
            direct_cost_type: Some("invoice".to_string()),
            direct_cost_date: None,
            invoice_number: Some(invoice_number.to_string()),
            status: Some("approved".to_string()),
            terms: None,
            payment_date: None,
            received_date: None,
            vendor: Some(Vendor {
                id: 12,
                name: Some("Ready Mix Co".to_string()),
            }),
            grand_total: Some(grand_total),
        }
    }

    // =========================================================================
    // Default Scenario
    // =========================================================================

    /// The default scenario the server starts with: two companies, one
    /// project with a small document tree, a generic tool with items and
    /// statuses, and a couple of direct costs.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            companies: vec![
                Self::company(1, "Acme Construction"),
                Self::company(2, "DataPull"),
            ],
            projects: vec![
                (1, Self::numbered_project(101, "Sandbox Test Project", "1122")),
                (1, Self::minimal_project(102, "Parking Garage Retrofit")),
                (2, Self::minimal_project(201, "R&D Test Project")),
            ],
            regions: vec![(1, Self::region(3, "Southwest"))],
            project_types: vec![(1, Self::project_type(9, "Commercial"))],
            documents: vec![
                (101, Self::recycle_bin(700)),
                (101, Self::folder(701, "Drawings", None)),
                (101, Self::folder(702, "Specifications", None)),
                (101, Self::folder(703, "Structural", Some(701))),
                (101, Self::file(704, "cover-sheet.pdf", Some(701))),
                (101, Self::file(705, "site-plan.pdf", None)),
                (101, Self::deleted(706, "old-rev.pdf", DocumentType::File)),
            ],
            tools: vec![(1, Self::tool(55, "Idea Submission"))],
            tool_items: vec![
                ((101, 55), Self::tool_item(9001, "Install hoist")),
                ((101, 55), Self::tool_item(9002, "Night pour schedule")),
            ],
            tool_statuses: vec![
                ((101, 55), Self::tool_status(1, "Open")),
                ((101, 55), Self::tool_status(2, "Closed")),
            ],
            direct_costs: vec![
                (101, Self::direct_cost(3300, "INV-0042", 1842.5)),
                (101, Self::direct_cost(3301, "INV-0043", 920.0)),
            ],
        }
    }
}

/// Data for the default mock scenario, keyed the way [`super::MockState`]
/// stores it.
pub struct DefaultScenario {
    pub companies: Vec<Company>,
    pub projects: Vec<(u64, Project)>,
    pub regions: Vec<(u64, ProjectRegion)>,
    pub project_types: Vec<(u64, ProjectType)>,
    pub documents: Vec<(u64, Document)>,
    pub tools: Vec<(u64, GenericTool)>,
    pub tool_items: Vec<((u64, u64), ToolItem)>,
    pub tool_statuses: Vec<((u64, u64), ToolStatus)>,
    pub direct_costs: Vec<(u64, DirectCost)>,
}
