use serde::{Deserialize, Serialize};

/// A single-use upload target handed to the caller.
///
/// ImageKit accepts authenticated uploads directly against its upload
/// endpoint; the credential carries the endpoint URL and the expiry the
/// provider will honor for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCredential {
    pub upload_url: String,
    pub expire: i64,
}

/// Response payload for a successful file upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
}

/// Error body returned by the ImageKit API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub help: Option<String>,
}
