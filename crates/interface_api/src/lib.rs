//! HTTP API Layer
//!
//! This crate provides the REST API for the CRM backend using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource, each calling exactly one
//!   repository operation
//! - **Middleware**: request ids, tracing, CORS, request logging
//! - **DTOs**: bodies that are not plain entity shapes
//! - **Error Handling**: `{success: false, error}` bodies with mapped statuses
//!
//! Store access goes through the [`ConnectionProvider`] held in [`AppState`];
//! nothing here touches a process-wide singleton.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_store::ConnectionProvider;
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let provider = Arc::new(ConnectionProvider::new(config.store_config()));
//! let app = create_router(provider, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use infra_store::repositories::{
    AdminUserRepository, CallLogRepository, ConversationRepository, CustomerRepository,
    LeadRepository, ServiceTicketRepository,
};
use infra_store::{ConnectionProvider, Privilege, StoreHandle};

use crate::config::ApiConfig;
use crate::handlers::{admin, call_logs, conversations, customers, health, leads, tickets};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<ConnectionProvider>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(provider: Arc<ConnectionProvider>, config: ApiConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// The handle data routes use; server-side code asks for full privilege
    pub fn store(&self) -> StoreHandle {
        self.provider.client_for(Privilege::Full)
    }

    pub fn leads(&self) -> LeadRepository {
        LeadRepository::new(&self.store())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(&self.store())
    }

    pub fn tickets(&self) -> ServiceTicketRepository {
        ServiceTicketRepository::new(&self.store())
    }

    pub fn conversations(&self) -> ConversationRepository {
        ConversationRepository::new(&self.store())
    }

    pub fn call_logs(&self) -> CallLogRepository {
        CallLogRepository::new(&self.store())
    }

    pub fn admins(&self) -> AdminUserRepository {
        AdminUserRepository::new(&self.store())
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `provider` - Store connection provider
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(provider: Arc<ConnectionProvider>, config: ApiConfig) -> Router {
    let state = AppState::new(provider, config);

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let lead_routes = Router::new()
        .route("/", post(leads::create_lead).get(leads::list_leads))
        .route("/:id", get(leads::get_lead).patch(leads::update_lead))
        .route("/:id/status", put(leads::update_lead_status));

    let customer_routes = Router::new()
        .route("/", post(customers::create_customer).get(customers::list_customers))
        .route("/:id", get(customers::get_customer).patch(customers::update_customer));

    let ticket_routes = Router::new()
        .route("/", post(tickets::create_ticket).get(tickets::list_tickets))
        .route("/:id", get(tickets::get_ticket).patch(tickets::update_ticket));

    let chat_routes = Router::new()
        .route("/conversations", put(conversations::save_conversation))
        .route("/conversations/:session_id", get(conversations::get_conversation));

    let call_log_routes = Router::new()
        .route("/", post(call_logs::create_call_log).get(call_logs::list_call_logs))
        .route("/:id", get(call_logs::get_call_log));

    let api_routes = Router::new()
        .nest("/leads", lead_routes)
        .nest("/customers", customer_routes)
        .nest("/service-tickets", ticket_routes)
        .nest("/chat", chat_routes)
        .nest("/call-logs", call_log_routes)
        .route("/auth/setup-admin", post(admin::setup_admin).get(admin::admin_status))
        .layer(axum_middleware::from_fn(request_log_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
