// ============================================================================
// Upload Gateway - image hosting behind a trait seam
// ============================================================================
//
// `upload` takes a local file path and returns the durable public URL the
// hosting service stored the image under. Removing the local file is the
// caller's job; the adapter never touches it.
//
// ============================================================================

mod cloudinary;

pub use cloudinary::CloudinaryClient;

use std::path::Path;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read upload file: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait UploadGateway: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<String, UploadError>;
}
