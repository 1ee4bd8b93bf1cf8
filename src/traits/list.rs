//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::ProcoreClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for list operations.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List entities with pagination support.
///
/// Implement this trait for entity types that can be listed page by
/// page. The `Query` type carries whatever scoping the endpoint needs
/// (nothing for companies, a company id for projects and tools, the
/// full company/project/tool chain for tool items).
///
/// # Example
///
/// ```ignore
/// use procore_api::{ProcoreClient, Company, List};
///
/// let client = ProcoreClient::from_env()?;
///
/// // Fetch a single page
/// let page = Company::list_page(&client, &Default::default(), 1, 50).await?;
///
/// // Fetch all pages
/// let all_companies = Company::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Scoping identifiers and filters for the list endpoint.
    type Query: Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Procore API client
    /// * `query` - Scoping identifiers and filters
    /// * `page` - Page number (1-indexed)
    /// * `per_page` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &ProcoreClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// This method automatically handles pagination, fetching pages in
    /// increasing order until a page comes back empty or short. The
    /// result is a single flat list.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &ProcoreClient, query: &Self::Query) -> Result<Vec<Self>> {
        Self::list_all_with(client, query, DEFAULT_PER_PAGE).await
    }

    /// List all entities matching the query with an explicit page size.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all_with(
        client: &ProcoreClient,
        query: &Self::Query,
        per_page: u32,
    ) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page, per_page).await?;
            let items_count = result.items.len();
            all_items.extend(result.items);

            if !result.has_more || items_count < per_page as usize {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
