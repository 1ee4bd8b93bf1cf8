//! Direct cost model and trait implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::ProcoreClient;
use crate::error::{ProcoreError, Result};
use crate::ident::Ident;
use crate::pagination::Page;
use crate::traits::{Find, List};

/// A vendor reference on a direct cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    /// Unique vendor id.
    pub id: u64,
    /// The vendor name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A direct cost item on a project (an invoice, expense, or payroll
/// entry recorded outside a commitment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectCost {
    /// Unique direct cost id.
    pub id: u64,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Kind of direct cost (e.g., "invoice", "expense", "payroll").
    #[serde(default)]
    pub direct_cost_type: Option<String>,

    /// Date the cost was incurred.
    #[serde(default)]
    pub direct_cost_date: Option<NaiveDate>,

    /// Vendor invoice number.
    #[serde(default)]
    pub invoice_number: Option<String>,

    /// Workflow status (e.g., "draft", "approved").
    #[serde(default)]
    pub status: Option<String>,

    /// Payment terms.
    #[serde(default)]
    pub terms: Option<String>,

    /// Date the cost was paid.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,

    /// Date the invoice was received.
    #[serde(default)]
    pub received_date: Option<NaiveDate>,

    /// The vendor billed against.
    #[serde(default)]
    pub vendor: Option<Vendor>,

    /// Total across line items.
    #[serde(default)]
    pub grand_total: Option<f64>,
}

/// Query type for direct cost listing: (company id, project id).
pub type DirectCostQuery = (u64, u64);

#[async_trait]
impl List for DirectCost {
    type Query = DirectCostQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProcoreClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let (company_id, project_id) = *query;
        let path = format!("rest/v1.0/projects/{project_id}/direct_costs");
        let params = [("page", page), ("per_page", per_page)];

        let response = client
            .get_with_query(&path, Some(company_id), &params)
            .await?;
        let costs: Vec<DirectCost> = response.json().await.map_err(ProcoreError::HttpError)?;

        Ok(Page::new(costs, page, per_page))
    }
}

impl Find for DirectCost {
    const ENTITY: &'static str = "direct cost";

    fn matches(&self, ident: &Ident) -> bool {
        match ident {
            Ident::Id(id) => self.id == *id,
            // Direct costs have no name; the invoice number is the
            // human-friendly handle.
            Ident::Name(invoice) => self.invoice_number.as_deref() == Some(invoice.as_str()),
        }
    }
}

// Convenience functions for working with direct costs

/// Fetch every direct cost on a project.
pub async fn get_direct_costs(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
) -> Result<Vec<DirectCost>> {
    DirectCost::list_all(client, &(company_id, project_id)).await
}

/// Fetch one direct cost with full detail.
#[tracing::instrument(skip(client))]
pub async fn get_direct_cost(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    direct_cost_id: u64,
) -> Result<DirectCost> {
    let path = format!("rest/v1.0/projects/{project_id}/direct_costs/{direct_cost_id}");

    let response = client.get(&path, Some(company_id)).await?;
    let cost: DirectCost = response.json().await.map_err(ProcoreError::HttpError)?;
    Ok(cost)
}

/// Find a direct cost by id or invoice number.
///
/// # Errors
///
/// Returns [`ProcoreError::NotFound`] when no direct cost matches.
pub async fn find_direct_cost(
    client: &ProcoreClient,
    company_id: u64,
    project_id: u64,
    ident: impl Into<Ident>,
) -> Result<DirectCost> {
    DirectCost::find(client, &(company_id, project_id), &ident.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_cost_deserialize() {
        let json = r#"{
            "id": 3300,
            "description": "Concrete delivery",
            "direct_cost_type": "invoice",
            "direct_cost_date": "2022-10-04",
            "invoice_number": "INV-0042",
            "status": "approved",
            "vendor": {"id": 12, "name": "Ready Mix Co"},
            "grand_total": 1842.5
        }"#;
        let cost: DirectCost = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(cost.id, 3300);
        assert_eq!(cost.invoice_number.as_deref(), Some("INV-0042"));
        assert_eq!(
            cost.direct_cost_date,
            NaiveDate::from_ymd_opt(2022, 10, 4)
        );
        assert_eq!(cost.vendor.as_ref().unwrap().id, 12);
        assert_eq!(cost.grand_total, Some(1842.5));
    }

    #[test]
    fn test_direct_cost_deserialize_minimal() {
        let json = r#"{"id": 1}"#;
        let cost: DirectCost = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(cost.invoice_number.is_none());
        assert!(cost.vendor.is_none());
    }

    #[test]
    fn test_direct_cost_matches() {
        let cost: DirectCost =
            serde_json::from_str(r#"{"id": 3300, "invoice_number": "INV-0042"}"#).unwrap();
        assert!(cost.matches(&Ident::Id(3300)));
        assert!(cost.matches(&Ident::Name("INV-0042".to_string())));
        assert!(!cost.matches(&Ident::Name("3300".to_string())));

        let no_invoice: DirectCost = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(!no_invoice.matches(&Ident::Name("INV-0042".to_string())));
    }
}
