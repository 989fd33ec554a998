use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::{UploadError, UploadGateway};
use crate::config::CloudinaryConfig;

/// All item images land in the same remote folder.
const UPLOAD_FOLDER: &str = "items";

/// HTTP client for Cloudinary's signed image upload API.
pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http: reqwest::Client,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        )
    }

    /// SHA-1 hex over the signed parameters (alphabetical order) with the
    /// API secret appended, per Cloudinary's signature scheme.
    fn sign(&self, timestamp: i64) -> String {
        let payload = format!(
            "folder={UPLOAD_FOLDER}&timestamp={timestamp}{}",
            self.config.api_secret
        );
        hex::encode(Sha1::digest(payload.as_bytes()))
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[async_trait]
impl UploadGateway for CloudinaryClient {
    async fn upload(&self, path: &Path) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let timestamp = Utc::now().timestamp();
        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", UPLOAD_FOLDER)
            .text("signature", self.sign(timestamp))
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response = self.http.post(self.upload_url()).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            tracing::error!(status, "Cloudinary rejected upload");
            return Err(UploadError::Rejected { status, body });
        }

        let parsed: UploadResponse = response.json().await?;

        tracing::debug!(url = %parsed.secure_url, "Image uploaded");
        Ok(parsed.secure_url)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
