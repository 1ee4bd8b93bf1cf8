//! Mock Procore API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Procore
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use procore_api::mock_server::MockServer;
//! use procore_api::{find_company, ProcoreClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ProcoreClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let company = find_company(&client, "Acme Construction").await.unwrap();
//!     assert_eq!(company.id, 1);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
