//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container handed to all
//! domain activities. External collaborators sit behind trait abstractions
//! so tests can inject doubles.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use imagekit::ImageKitService;
use sqlx::PgPool;

use super::traits::{BaseEmailService, BaseStorageService, UploadCredential, UploadedObject};

// =============================================================================
// ImageKitService Adapter (implements BaseStorageService trait)
// =============================================================================

/// Wrapper around ImageKitService that implements the storage trait
pub struct ImageKitAdapter(pub Arc<ImageKitService>);

impl ImageKitAdapter {
    pub fn new(service: Arc<ImageKitService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseStorageService for ImageKitAdapter {
    async fn request_upload_credentials(&self, count: usize) -> Result<Vec<UploadCredential>> {
        let credentials = self
            .0
            .request_upload_credentials(count, Utc::now().timestamp())
            .await
            .map_err(|e| anyhow!("{}", e))?;
        Ok(credentials
            .into_iter()
            .map(|c| UploadCredential {
                upload_url: c.upload_url,
                expire: c.expire,
            })
            .collect())
    }

    async fn upload_binary(
        &self,
        credential: &UploadCredential,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedObject> {
        let provider_credential = imagekit::models::UploadCredential {
            upload_url: credential.upload_url.clone(),
            expire: credential.expire,
        };
        let response = self
            .0
            .upload(&provider_credential, filename, bytes)
            .await
            .map_err(|e| anyhow!("{}", e))?;
        Ok(UploadedObject {
            remote_id: response.file_id,
            filename: response.name,
            uploaded_at: Utc::now(),
        })
    }

    async fn delete_remote_object(&self, remote_id: &str) -> Result<()> {
        self.0
            .delete_file(remote_id)
            .await
            .map_err(|e| anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to domain activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Image hosting provider for property photos
    pub storage: Arc<dyn BaseStorageService>,
    /// Outbound email for best-effort notifications
    pub email: Arc<dyn BaseEmailService>,
    /// Recipient for marketplace cross-posting notifications
    pub marketplace_email: String,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        storage: Arc<dyn BaseStorageService>,
        email: Arc<dyn BaseEmailService>,
        marketplace_email: String,
    ) -> Self {
        Self {
            db_pool,
            storage,
            email,
            marketplace_email,
        }
    }
}
