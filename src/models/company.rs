//! Company model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};
use crate::ident::Ident;
use crate::pagination::Page;
use crate::traits::{Find, List, DEFAULT_PER_PAGE};

const COMPANIES_ENDPOINT: &str = "rest/v1.0/companies";

/// A Procore company.
///
/// Companies are the top-level tenant in Procore; every other resource
/// is scoped to one via the `Procore-Company-Id` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique company id.
    pub id: u64,

    /// The company name.
    pub name: String,

    /// Whether the company account is active.
    #[serde(default)]
    pub is_active: bool,

    /// Whether this is the caller's own company.
    #[serde(default)]
    pub my_company: Option<bool>,
}

/// Query parameters for listing companies.
///
/// `include_free_companies` defaults to `true` so sandbox and free-tier
/// companies show up alongside paid ones.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyListQuery {
    /// Include free companies in the listing.
    pub include_free_companies: bool,
}

impl Default for CompanyListQuery {
    fn default() -> Self {
        Self {
            include_free_companies: true,
        }
    }
}

#[async_trait]
impl List for Company {
    type Query = CompanyListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProcoreClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a CompanyListQuery,
            page: u32,
            per_page: u32,
        }

        let params = RequestParams {
            query,
            page,
            per_page,
        };

        let response = client
            .get_with_query(COMPANIES_ENDPOINT, None, &params)
            .await?;
        let companies: Vec<Company> = response.json().await.map_err(ProcoreError::HttpError)?;

        Ok(Page::new(companies, page, per_page))
    }
}

impl Find for Company {
    const ENTITY: &'static str = "company";

    fn matches(&self, ident: &Ident) -> bool {
        match ident {
            Ident::Id(id) => self.id == *id,
            Ident::Name(name) => self.name == *name,
        }
    }
}

// Convenience functions for working with companies

/// Fetch the first page of companies visible to the token.
///
/// Fetches page 1 with the default page size; pass a different page to
/// [`Company::list_page`] for manual pagination, or use
/// [`Company::list_all`] to aggregate every page.
///
/// # Example
///
/// ```ignore
/// use procore_api::{ProcoreClient, get_companies};
///
/// let client = ProcoreClient::from_env()?;
/// let companies = get_companies(&client).await?;
/// ```
pub async fn get_companies(client: &ProcoreClient) -> Result<Vec<Company>> {
    let page = Company::list_page(client, &CompanyListQuery::default(), 1, DEFAULT_PER_PAGE).await?;
    Ok(page.items)
}

/// Find a company by id or name.
///
/// Scans the company listing page by page until a match.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when no company matches.
pub async fn find_company(client: &ProcoreClient, ident: impl Into<Ident>) -> Result<Company> {
    Company::find(client, &CompanyListQuery::default(), &ident.into()).await
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
    fn test_company_deserialize() {
        let json = r#"{"id": 7, "name": "Acme", "is_active": true}"#;
        let company: Company = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(company.id, 7);
        assert_eq!(company.name, "Acme");
        assert!(company.is_active);
        assert!(company.my_company.is_none());
    }

    #[test]
    fn test_company_deserialize_minimal() {
        let json = r#"{"id": 1, "name": "Solo"}"#;
        let company: Company = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(!company.is_active);
    }

    #[test]
    fn test_company_matches_id_only() {
        let company = sample_company(7, "Acme");
        assert!(company.matches(&Ident::Id(7)));
        assert!(!company.matches(&Ident::Id(8)));
        // An id never matches against the name, even if the digits agree
        let digits = sample_company(1, "7");
        assert!(!digits.matches(&Ident::Id(7)));
    }

    #[test]
    fn test_company_matches_name_only() {
        let company = sample_company(7, "Acme");
        assert!(company.matches(&Ident::Name("Acme".to_string())));
        assert!(!company.matches(&Ident::Name("acme".to_string())));
        assert!(!company.matches(&Ident::Name("7".to_string())));
    }

    #[test]
    fn test_company_list_query_default() {
        let query = CompanyListQuery::default();
        assert!(query.include_free_companies);
    }
}
