pub mod resolve_owner;

pub use resolve_owner::{resolve_owner, NewOwnerFields, OwnerSpec};
