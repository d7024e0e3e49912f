//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::routes::{graphql_handler, graphql_playground, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
}

/// Build the axum application from assembled dependencies.
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let schema = Arc::new(create_schema());
    let context = GraphQLContext::new(deps.clone());
    let state = AppState {
        db_pool: deps.db_pool.clone(),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/graphql", post(graphql_handler).get(graphql_playground))
        .route("/health", get(health_handler))
        .with_state(schema)
        .layer(Extension(context))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
