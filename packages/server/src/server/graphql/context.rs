use std::sync::Arc;

use sqlx::PgPool;

use crate::kernel::ServerDeps;

/// GraphQL request context
///
/// Contains shared resources available to all resolvers
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: Arc<ServerDeps>) -> Self {
        Self {
            db_pool: deps.db_pool.clone(),
            deps,
        }
    }
}
