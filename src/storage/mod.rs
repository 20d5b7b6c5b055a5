pub mod drive;
pub mod local;

pub use drive::DriveClient;
pub use local::LocalStorage;

use async_trait::async_trait;

/// Listing entry returned by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
}

/// Error types for storage operations, split by the operation that failed
/// so the batch can map each to its pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Listing failed: {0}")]
    List(String),
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Folder-oriented storage capability consumed by the batch pipeline.
/// Implementations are assumed to be already authenticated; no login or
/// token refresh happens behind this trait.
#[async_trait]
pub trait Storage: Send + Sync {
    /// List files under `folder_id` matching `mime_filter`, in the backend's
    /// listing order. Pagination is handled transparently.
    async fn list_files(
        &self,
        folder_id: &str,
        mime_filter: &str,
    ) -> Result<Vec<RemoteFile>, StorageError>;

    /// Retrieve the full text content of one file.
    async fn fetch_content(&self, file_id: &str) -> Result<String, StorageError>;

    /// Write `content` as a new file named `name` under `parent_folder_id`.
    async fn upload_file(
        &self,
        name: &str,
        content: &str,
        parent_folder_id: &str,
        mime_type: &str,
    ) -> Result<(), StorageError>;
}
