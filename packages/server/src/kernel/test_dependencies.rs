// TestDependencies - mock implementations for testing
//
// Provides collaborator doubles that can be injected into ServerDeps for
// unit and integration tests.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::deps::ServerDeps;
use super::traits::{BaseEmailService, BaseStorageService, UploadCredential, UploadedObject};

// =============================================================================
// Mock Storage
// =============================================================================

/// In-memory storage double.
///
/// Uploads are assigned sequential remote ids; `fail_uploads(n)` makes the
/// next `n` upload attempts fail, which is how the retry policy is tested.
pub struct MockStorageService {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    failures_remaining: Mutex<usize>,
    next_id: Mutex<u64>,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            failures_remaining: Mutex::new(0),
            next_id: Mutex::new(1),
        }
    }

    /// Make the next `count` upload attempts fail.
    pub fn fail_uploads(&self, count: usize) {
        *self.failures_remaining.lock().unwrap() = count;
    }

    /// Filenames uploaded so far, in order.
    pub fn uploaded_filenames(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    /// Remote ids deleted so far, in order.
    pub fn deleted_remote_ids(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

impl Default for MockStorageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseStorageService for MockStorageService {
    async fn request_upload_credentials(&self, count: usize) -> Result<Vec<UploadCredential>> {
        Ok((0..count)
            .map(|_| UploadCredential {
                upload_url: "mock://upload".to_string(),
                expire: Utc::now().timestamp() + 3600,
            })
            .collect())
    }

    async fn upload_binary(
        &self,
        _credential: &UploadCredential,
        filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadedObject> {
        {
            let mut failures = self.failures_remaining.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(anyhow!("mock upload failure"));
            }
        }
        let remote_id = {
            let mut next = self.next_id.lock().unwrap();
            let id = format!("mock-file-{}", *next);
            *next += 1;
            id
        };
        self.uploads.lock().unwrap().push(filename.to_string());
        Ok(UploadedObject {
            remote_id,
            filename: filename.to_string(),
            uploaded_at: Utc::now(),
        })
    }

    async fn delete_remote_object(&self, remote_id: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(remote_id.to_string());
        Ok(())
    }
}

// =============================================================================
// Mock Email
// =============================================================================

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Recording email double; `fail_next()` makes the next send fail.
pub struct MockEmailService {
    sent: Mutex<Vec<SentEmail>>,
    fail_next: Mutex<bool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_next: Mutex::new(false),
        }
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(anyhow!("mock email failure"));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of doubles plus a ready-to-use ServerDeps.
pub struct TestDependencies {
    pub storage: Arc<MockStorageService>,
    pub email: Arc<MockEmailService>,
    pub deps: ServerDeps,
}

impl TestDependencies {
    pub fn new(db_pool: PgPool) -> Self {
        let storage = Arc::new(MockStorageService::new());
        let email = Arc::new(MockEmailService::new());
        let deps = ServerDeps::new(
            db_pool,
            storage.clone(),
            email.clone(),
            "listings@marketplace.test".to_string(),
        );
        Self {
            storage,
            email,
            deps,
        }
    }
}
