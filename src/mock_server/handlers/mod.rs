//! HTTP handlers for the mock Procore API server.

mod companies;
mod direct_costs;
mod documents;
mod projects;
mod tools;

pub use companies::*;
pub use direct_costs::*;
pub use documents::*;
pub use projects::*;
pub use tools::*;

use serde::Deserialize;

/// Pagination query parameters shared by the list handlers.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(100)
    }
}

/// Query parameter scoping a document call to a project.
#[derive(Debug, Deserialize)]
pub struct ProjectScopeQuery {
    pub project_id: u64,
}

/// Slice out one page of a collection.
pub fn paginate<T: Clone>(items: &[T], page: u32, per_page: u32) -> Vec<T> {
    let start = ((page.max(1) - 1) * per_page) as usize;
    let end = (start + per_page as usize).min(items.len());

    if start < items.len() {
        items[start..end].to_vec()
    } else {
        vec![]
    }
}
