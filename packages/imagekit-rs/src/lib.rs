// https://imagekit.io/docs/api-reference/upload-file/upload-file-v1

pub mod models;

use reqwest::{multipart, Client, StatusCode};
use thiserror::Error;

use crate::models::{ApiErrorBody, UploadCredential, UploadResponse};

const UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";
const API_BASE_URL: &str = "https://api.imagekit.io/v1";

/// Default validity window for issued upload credentials, in seconds.
const CREDENTIAL_TTL_SECS: i64 = 3600;

#[derive(Debug, Error)]
pub enum ImageKitError {
    #[error("request to ImageKit failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ImageKit returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("file not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct ImageKitOptions {
    pub private_key: String,
    pub public_key: String,
    pub url_endpoint: String,
}

#[derive(Debug, Clone)]
pub struct ImageKitService {
    options: ImageKitOptions,
    client: Client,
}

impl ImageKitService {
    pub fn new(options: ImageKitOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Issue upload credentials for `count` pending files.
    ///
    /// ImageKit authenticates uploads with the account's private key rather
    /// than presigned URLs, so each credential points at the shared upload
    /// endpoint. Issuing one credential per file keeps the call shape
    /// compatible with providers that do hand out per-file URLs.
    pub async fn request_upload_credentials(
        &self,
        count: usize,
        now_epoch_secs: i64,
    ) -> Result<Vec<UploadCredential>, ImageKitError> {
        let expire = now_epoch_secs + CREDENTIAL_TTL_SECS;
        Ok((0..count)
            .map(|_| UploadCredential {
                upload_url: UPLOAD_URL.to_string(),
                expire,
            })
            .collect())
    }

    /// Upload a file's bytes under the given name.
    pub async fn upload(
        &self,
        credential: &UploadCredential,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ImageKitError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .part("file", part)
            .text("fileName", file_name.to_string())
            .text("useUniqueFileName", "true");

        let response = self
            .client
            .post(&credential.upload_url)
            .basic_auth(&self.options.private_key, Some(""))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        Ok(response.json::<UploadResponse>().await?)
    }

    /// Permanently delete a remote file by its provider-assigned id.
    pub async fn delete_file(&self, file_id: &str) -> Result<(), ImageKitError> {
        let url = format!("{API_BASE_URL}/files/{file_id}");
        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.options.private_key, Some(""))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ImageKitError::NotFound(file_id.to_string()));
        }
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        Ok(())
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> ImageKitError {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => "unreadable error body".to_string(),
        };
        ImageKitError::Api { status, message }
    }
}
