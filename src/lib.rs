//! Procore API client library.
//!
//! A Rust library for interacting with the Procore REST API. The shared
//! pagination and lookup machinery lives in the [`List`] and [`Find`]
//! traits, which entity types implement; resource families with bespoke
//! payloads (the document tree, generic tool items) expose operation
//! functions instead.
//!
//! # Quick Start
//!
//! ```no_run
//! use procore_api::{find_company, find_project, folders, ProcoreClient};
//!
//! #[tokio::main]
//! async fn main() -> procore_api::Result<()> {
//!     // Create client from environment variables
//!     let client = ProcoreClient::from_env()?;
//!
//!     // Resolve a company and project by name
//!     let company = find_company(&client, "Acme Construction").await?;
//!     let project = find_project(&client, company.id, "Sandbox Test Project").await?;
//!
//!     // List the live folders in the project
//!     let project_folders = folders::get(&client, company.id, project.id).await?;
//!     println!("Found {} folders", project_folders.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around two core traits:
//!
//! - [`List`] - Fetch paginated collections of entities
//! - [`Find`] - Resolve an [`Ident`] (id or name) to a single entity by
//!   scanning the listing page by page
//!
//! Entity types like [`Company`], [`Project`], and [`GenericTool`]
//! implement both. The [`folders`] and [`files`] modules carry the
//! document-tree operations (filtered listing, lookup, creation, sparse
//! updates, multipart upload), and the generic tool item and direct
//! cost functions follow the same shape.
//!
//! Every company-scoped call takes the company id explicitly and sends
//! it as the `Procore-Company-Id` header; the library never infers or
//! caches parent scope between calls.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `PROCORE_ACCESS_TOKEN` (required) - A pre-established OAuth bearer
//!   token; acquisition and refresh are the embedding application's job
//! - `PROCORE_BASE_URL` (optional) - Base URL (defaults to
//!   `https://api.procore.com`)

mod client;
mod error;
mod ident;
mod models;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ProcoreClient, COMPANY_ID_HEADER};
pub use error::{ProcoreError, Result};
pub use ident::Ident;
pub use pagination::{Page, PaginationParams};

// Re-export traits
pub use traits::{Find, List};

// Re-export models
pub use models::{
    // Company types
    Company,
    CompanyListQuery,
    // Project types
    Project,
    ProjectRegion,
    ProjectType,
    // Document types
    Document,
    DocumentType,
    // Generic tool types
    GenericTool,
    ToolItem,
    ToolItemScope,
    ToolStatus,
    // Direct cost types
    DirectCost,
    DirectCostQuery,
    Vendor,
};

// Re-export document-tree operation modules
pub use models::{files, folders};
pub use models::{files::FileUpdateParams, folders::FolderUpdateParams};

// Re-export convenience functions
pub use models::{find_company, get_companies};
pub use models::{find_project, get_project_regions, get_project_types, get_projects};
pub use models::{create_tool_item, find_tool, get_tool_items, get_tool_statuses, get_tools};
pub use models::{find_direct_cost, get_direct_cost, get_direct_costs};
pub use models::get_documents;
