//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod email_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ImageKitAdapter, ServerDeps};
pub use email_client::ResendEmailClient;
pub use test_dependencies::{MockEmailService, MockStorageService, TestDependencies};
pub use traits::*;
