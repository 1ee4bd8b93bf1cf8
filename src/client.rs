//! Procore API client.
//!
//! Low-level HTTP client that handles authentication, company scoping,
//! and raw requests. Higher-level operations live in the model modules
//! and the `List`/`Find` traits.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::error::{ProcoreError, Result};

const DEFAULT_API_URL: &str = "https://api.procore.com";
const USER_AGENT: &str = concat!("procore-api/", env!("CARGO_PKG_VERSION"));

/// Header that scopes a request to one company in Procore's multi-tenant API.
pub const COMPANY_ID_HEADER: &str = "Procore-Company-Id";

/// Low-level Procore API client.
///
/// Handles bearer authentication and HTTP requests. Entity-specific
/// operations are implemented via the `List` and `Find` traits and the
/// per-resource operation functions.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool. The client is read-only after construction, so it is
/// safe to share across tasks.
///
/// # Example
///
/// ```no_run
/// use procore_api::ProcoreClient;
///
/// # fn example() -> procore_api::Result<()> {
/// // Create from environment variables
/// let client = ProcoreClient::from_env()?;
///
/// // Or configure manually
/// let client = ProcoreClient::new("your-access-token", "https://api.procore.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ProcoreClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for ProcoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcoreClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ProcoreClient {
    /// Create a client from environment variables.
    ///
    /// Uses `PROCORE_ACCESS_TOKEN` for authentication and optionally
    /// `PROCORE_BASE_URL` for the base URL (defaults to
    /// `https://api.procore.com`). Token acquisition and refresh are the
    /// embedding application's job; this library only attaches the token.
    ///
    /// # Errors
    ///
    /// Returns an error if `PROCORE_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("PROCORE_ACCESS_TOKEN").map_err(|_| {
            ProcoreError::ConfigMissing(
                "PROCORE_ACCESS_TOKEN environment variable not set".to_string(),
            )
        })?;

        let base_url = env::var("PROCORE_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - OAuth bearer token for the Procore API
    /// * `base_url` - Base URL for the Procore API (e.g., `https://api.procore.com`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(ProcoreError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request with bearer auth and the optional company scoping header.
    fn request(&self, method: Method, path: &str, company_id: Option<u64>) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url).bearer_auth(&self.token);
        if let Some(company_id) = company_id {
            builder = builder.header(COMPANY_ID_HEADER, company_id.to_string());
        }
        Ok(builder)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str, company_id: Option<u64>) -> Result<Response> {
        let response = self
            .request(Method::GET, path, company_id)?
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        company_id: Option<u64>,
        query: &Q,
    ) -> Result<Response> {
        let response = self
            .request(Method::GET, path, company_id)?
            .query(query)
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        company_id: Option<u64>,
        body: &B,
    ) -> Result<Response> {
        let response = self
            .request(Method::POST, path, company_id)?
            .json(body)
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with query parameters and JSON body.
    #[tracing::instrument(skip(self, query, body))]
    pub async fn post_with_query<Q: Serialize + ?Sized, B: Serialize + ?Sized>(
        &self,
        path: &str,
        company_id: Option<u64>,
        query: &Q,
        body: &B,
    ) -> Result<Response> {
        let response = self
            .request(Method::POST, path, company_id)?
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a PATCH request with query parameters and JSON body.
    #[tracing::instrument(skip(self, query, body))]
    pub async fn patch_with_query<Q: Serialize + ?Sized, B: Serialize + ?Sized>(
        &self,
        path: &str,
        company_id: Option<u64>,
        query: &Q,
        body: &B,
    ) -> Result<Response> {
        let response = self
            .request(Method::PATCH, path, company_id)?
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn delete_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        company_id: Option<u64>,
        query: &Q,
    ) -> Result<Response> {
        let response = self
            .request(Method::DELETE, path, company_id)?
            .query(query)
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a multipart POST request (file upload endpoints).
    #[tracing::instrument(skip(self, query, form))]
    pub async fn post_multipart<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        company_id: Option<u64>,
        query: &Q,
        form: Form,
    ) -> Result<Response> {
        let response = self
            .request(Method::POST, path, company_id)?
            .query(query)
            .multipart(form)
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a multipart PATCH request (file re-upload endpoints).
    #[tracing::instrument(skip(self, query, form))]
    pub async fn patch_multipart<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        company_id: Option<u64>,
        query: &Q,
        form: Form,
    ) -> Result<Response> {
        let response = self
            .request(Method::PATCH, path, company_id)?
            .query(query)
            .multipart(form)
            .send()
            .await
            .map_err(ProcoreError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ProcoreError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(ProcoreError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field. Procore answers
        // with "message", "error", or a field-keyed "errors" object
        // depending on the endpoint.
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
            if let Some(errors) = json.get("errors") {
                return errors.to_string();
            }
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ProcoreClient::new("test-token", "https://api.procore.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ProcoreClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ProcoreClient::new("token", "https://api.procore.com").unwrap();
        let client2 = ProcoreClient::new("token", "https://api.procore.com/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }
}
