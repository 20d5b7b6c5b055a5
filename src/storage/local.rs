use crate::storage::{RemoteFile, Storage, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Local-filesystem backend: a directory path plays the folder id and a
/// file path plays the file id. Useful for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        LocalStorage
    }
}

fn extension_for(mime_filter: &str) -> &str {
    match mime_filter {
        "application/json" => "json",
        "text/markdown" => "md",
        other => other.rsplit('/').next().unwrap_or(other),
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn list_files(
        &self,
        folder_id: &str,
        mime_filter: &str,
    ) -> Result<Vec<RemoteFile>, StorageError> {
        let extension = extension_for(mime_filter);
        let mut entries = tokio::fs::read_dir(folder_id)
            .await
            .map_err(|e| StorageError::List(format!("{}: {}", folder_id, e)))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::List(e.to_string()))?
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            files.push(RemoteFile {
                id: path.display().to_string(),
                name,
                mime_type: mime_filter.to_string(),
            });
        }

        // Directory iteration order is platform-dependent; sort for a
        // deterministic batch order.
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    async fn fetch_content(&self, file_id: &str) -> Result<String, StorageError> {
        tokio::fs::read_to_string(file_id)
            .await
            .map_err(|e| StorageError::Fetch(format!("{}: {}", file_id, e)))
    }

    async fn upload_file(
        &self,
        name: &str,
        content: &str,
        parent_folder_id: &str,
        _mime_type: &str,
    ) -> Result<(), StorageError> {
        let parent: &Path = Path::new(parent_folder_id);
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;
        let destination: PathBuf = parent.join(name);
        tokio::fs::write(&destination, content)
            .await
            .map_err(|e| StorageError::Upload(format!("{}: {}", destination.display(), e)))
    }
}
