// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Media
// reconciliation and notification policy live in the domains; these traits
// just describe the collaborators they talk to.
//
// Naming convention: Base* for trait names (e.g., BaseStorageService)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// =============================================================================
// Object Storage Trait (image hosting provider)
// =============================================================================

/// A single-use upload target issued by the provider.
#[derive(Debug, Clone)]
pub struct UploadCredential {
    pub upload_url: String,
    pub expire: i64,
}

/// Metadata recorded after a successful binary upload.
#[derive(Debug, Clone)]
pub struct UploadedObject {
    pub remote_id: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

#[async_trait]
pub trait BaseStorageService: Send + Sync {
    /// Issue upload credentials for `count` pending files.
    async fn request_upload_credentials(&self, count: usize) -> Result<Vec<UploadCredential>>;

    /// Upload a file's bytes against a previously issued credential.
    async fn upload_binary(
        &self,
        credential: &UploadCredential,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedObject>;

    /// Permanently delete a remote object by its provider-assigned id.
    async fn delete_remote_object(&self, remote_id: &str) -> Result<()>;
}

// =============================================================================
// Email Trait (outbound notifications)
// =============================================================================

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Send a single HTML email.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}
