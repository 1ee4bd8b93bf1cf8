//! Mock Procore API server.
//!
//! Provides an axum-based HTTP server that simulates the Procore API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Procore API server for testing.
///
/// The server runs in the background and can be used to test the Procore
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `ProcoreClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        state.companies = scenario.companies;

        for (company_id, project) in scenario.projects {
            state.projects.entry(company_id).or_default().push(project);
        }

        for (company_id, region) in scenario.regions {
            state.regions.entry(company_id).or_default().push(region);
        }

        for (company_id, ptype) in scenario.project_types {
            state
                .project_types
                .entry(company_id)
                .or_default()
                .push(ptype);
        }

        for (project_id, document) in scenario.documents {
            state.documents.entry(project_id).or_default().push(document);
        }

        for (company_id, tool) in scenario.tools {
            state.tools.entry(company_id).or_default().push(tool);
        }

        for (key, item) in scenario.tool_items {
            state.tool_items.entry(key).or_default().push(item);
        }

        for (key, status) in scenario.tool_statuses {
            state.tool_statuses.entry(key).or_default().push(status);
        }

        for (project_id, cost) in scenario.direct_costs {
            state.direct_costs.entry(project_id).or_default().push(cost);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Company routes
            .route("/rest/v1.0/companies", get(handlers::list_companies))
            .route(
                "/rest/v1.0/companies/:company_id/projects",
                get(handlers::list_projects),
            )
            .route(
                "/rest/v1.0/companies/:company_id/project_regions",
                get(handlers::list_project_regions),
            )
            .route(
                "/rest/v1.0/companies/:company_id/project_types",
                get(handlers::list_project_types),
            )
            // Document tree routes
            .route(
                "/rest/v1.0/projects/:project_id/documents",
                get(handlers::list_documents),
            )
            .route(
                "/rest/v1.0/folders",
                get(handlers::root_folder).post(handlers::create_folder),
            )
            .route(
                "/rest/v1.0/folders/:doc_id",
                get(handlers::show_folder)
                    .patch(handlers::update_folder)
                    .delete(handlers::delete_folder),
            )
            .route("/rest/v1.0/files", post(handlers::create_file))
            .route(
                "/rest/v1.0/files/:doc_id",
                get(handlers::show_file)
                    .patch(handlers::update_file)
                    .delete(handlers::delete_file),
            )
            // Generic tool routes
            .route(
                "/rest/v1.0/companies/:company_id/generic_tools",
                get(handlers::list_tools),
            )
            .route(
                "/rest/v1.0/projects/:project_id/generic_tools/:tool_id/generic_tool_items",
                get(handlers::list_tool_items).post(handlers::create_tool_item),
            )
            .route(
                "/rest/v1.0/projects/:project_id/generic_tools/:tool_id/generic_tool_items/available_statuses",
                get(handlers::list_tool_statuses),
            )
            // Direct cost routes
            .route(
                "/rest/v1.0/projects/:project_id/direct_costs",
                get(handlers::list_direct_costs),
            )
            .route(
                "/rest/v1.0/projects/:project_id/direct_costs/:direct_cost_id",
                get(handlers::get_direct_cost),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
