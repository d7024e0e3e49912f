// Domain modules - one per aggregate, each with models (rows + queries),
// data (GraphQL types), edges (resolver glue), and activities (workflows).

pub mod client;
pub mod member;
pub mod notes;
pub mod organization;
pub mod property;
