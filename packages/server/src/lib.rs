// Real-Estate CRM - API Core
//
// This crate provides the backend API for a multi-tenant real-estate CRM:
// organizations manage clients, property listings, photos/videos, and notes
// through a GraphQL surface backed by Postgres.
//
// Architecture follows domain-driven design: each domain owns its models
// (rows + queries), data (GraphQL types), edges (resolver glue), and
// activities (multi-step workflows such as the property save orchestrator).

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
