//! Find trait for resolving an identifier to a record.

use async_trait::async_trait;

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};
use crate::ident::Ident;
use crate::traits::list::{List, DEFAULT_PER_PAGE};

/// Maximum pages to scan during a lookup (safety limit).
const MAX_PAGES: u32 = 1000;

/// Resolve a human-friendly identifier to a single record.
///
/// The default `find` walks the list endpoint page by page and returns
/// the first record whose `id` (for [`Ident::Id`]) or name-like field
/// (for [`Ident::Name`]) matches. The scan covers every page, so a
/// record beyond the first one is still reachable.
///
/// # Example
///
/// ```ignore
/// use procore_api::{ProcoreClient, Company, Find};
///
/// let client = ProcoreClient::from_env()?;
/// let company = Company::find(&client, &Default::default(), &"Acme".into()).await?;
/// ```
#[async_trait]
pub trait Find: List + Sync {
    /// Entity name used in `NotFound` errors.
    const ENTITY: &'static str;

    /// Whether this record matches the identifier.
    ///
    /// [`Ident::Id`] must match only the `id` field and [`Ident::Name`]
    /// only the name-like field, never both.
    fn matches(&self, ident: &Ident) -> bool;

    /// Find the first record matching the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProcoreError::NotFound`] when no page contains a match,
    /// or any error from the underlying list requests.
    async fn find(client: &ProcoreClient, query: &Self::Query, ident: &Ident) -> Result<Self> {
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page, DEFAULT_PER_PAGE).await?;
            let has_more = result.has_more;

            for item in result {
                if item.matches(ident) {
                    return Ok(item);
                }
            }

            if !has_more {
                break;
            }
            page += 1;

            if page > MAX_PAGES {
                tracing::warn!("Reached lookup limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Err(ProcoreError::NotFound {
            entity_type: Self::ENTITY,
            id: ident.to_string(),
        })
    }
}
