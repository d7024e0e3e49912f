pub mod graphql;
pub mod health;

pub use graphql::{graphql_handler, graphql_playground};
pub use health::health_handler;
