use crate::storage::{RemoteFile, Storage, StorageError};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

const PAGE_SIZE: usize = 100;

/// Google Drive v3 REST backend. The bearer token is supplied by the
/// caller; this client performs no login or consent handling.
#[derive(Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    id: String,
    name: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

impl DriveClient {
    pub fn new(base_url: Url, access_token: String) -> Self {
        DriveClient {
            http: reqwest::Client::new(),
            base_url,
            access_token,
        }
    }

    fn endpoint(&self, segments: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            segments
        )
    }
}

#[async_trait]
impl Storage for DriveClient {
    async fn list_files(
        &self,
        folder_id: &str,
        mime_filter: &str,
    ) -> Result<Vec<RemoteFile>, StorageError> {
        let query = format!(
            "'{}' in parents and mimeType = '{}' and trashed = false",
            folder_id, mime_filter
        );
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(self.endpoint("drive/v3/files"))
                .bearer_auth(&self.access_token)
                .query(&[
                    ("q", query.as_str()),
                    ("fields", "nextPageToken, files(id, name, mimeType)"),
                    ("pageSize", &PAGE_SIZE.to_string()),
                ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| StorageError::List(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StorageError::List(format!(
                    "files.list returned {}: {}",
                    status, body
                )));
            }

            let page: FileList = response
                .json()
                .await
                .map_err(|e| StorageError::List(e.to_string()))?;
            files.extend(page.files.into_iter().map(|entry| RemoteFile {
                id: entry.id,
                name: entry.name,
                mime_type: entry.mime_type,
            }));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!("Drive listing returned {} files", files.len());
        Ok(files)
    }

    async fn fetch_content(&self, file_id: &str) -> Result<String, StorageError> {
        let response = self
            .http
            .get(self.endpoint(&format!("drive/v3/files/{}", file_id)))
            .bearer_auth(&self.access_token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| StorageError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Fetch(format!(
                "files.get returned {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| StorageError::Fetch(e.to_string()))
    }

    async fn upload_file(
        &self,
        name: &str,
        content: &str,
        parent_folder_id: &str,
        mime_type: &str,
    ) -> Result<(), StorageError> {
        let metadata = serde_json::json!({
            "name": name,
            "parents": [parent_folder_id],
            "mimeType": mime_type,
        });

        let metadata_part = reqwest::multipart::Part::text(metadata.to_string())
            .mime_str("application/json")
            .map_err(|e| StorageError::Upload(e.to_string()))?;
        let content_part = reqwest::multipart::Part::text(content.to_string())
            .mime_str(mime_type)
            .map_err(|e| StorageError::Upload(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", content_part);

        let response = self
            .http
            .post(self.endpoint("upload/drive/v3/files"))
            .bearer_auth(&self.access_token)
            .query(&[("uploadType", "multipart")])
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload(format!(
                "upload returned {}: {}",
                status, body
            )));
        }
        Ok(())
    }
}
