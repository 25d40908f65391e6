//! Blob storage gateway
//!
//! Uploads go straight to the managed bucket's media endpoint; download URLs
//! carry the access token the provider mints at upload time.

use super::{BackendError, BackendResult, BlobRef, BlobStore};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const STORAGE_HOST: &str = "https://firebasestorage.googleapis.com/v0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blob store backed by the managed storage bucket
pub struct StorageBucket {
    client: reqwest::Client,
    bucket: String,
}

impl StorageBucket {
    pub fn new(bucket: impl Into<String>) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            bucket: bucket.into(),
        })
    }

    fn object_url(&self, encoded_name: &str) -> String {
        format!("{STORAGE_HOST}/b/{}/o/{encoded_name}", self.bucket)
    }
}

/// Percent-encode an object name for use inside a URL path segment
///
/// The object name contains `/` separators which must become `%2F`.
fn encode_object_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[async_trait]
impl BlobStore for StorageBucket {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<BlobRef> {
        let response = self
            .client
            .post(format!("{STORAGE_HOST}/b/{}/o", self.bucket))
            .query(&[("uploadType", "media"), ("name", path)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => BackendError::Denied(format!("{status}: {body}")),
                _ => BackendError::Unavailable(format!("{status}: {body}")),
            });
        }

        let metadata: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        // downloadTokens is a comma-separated list; the first one suffices
        let token = metadata
            .get("downloadTokens")
            .and_then(Value::as_str)
            .and_then(|tokens| tokens.split(',').next())
            .map(str::to_string);

        Ok(BlobRef {
            path: path.to_string(),
            token,
        })
    }

    async fn download_url(&self, blob: &BlobRef) -> BackendResult<String> {
        let mut url = format!(
            "{}?alt=media",
            self.object_url(&encode_object_name(&blob.path))
        );
        if let Some(token) = &blob.token {
            url.push_str("&token=");
            url.push_str(token);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_encode_path_separators() {
        assert_eq!(
            encode_object_name("menuItems/abc 123.jpg"),
            "menuItems%2Fabc%20123.jpg"
        );
    }

    #[tokio::test]
    async fn download_url_carries_the_token() {
        let bucket = StorageBucket::new("demo.appspot.com").unwrap();
        let blob = BlobRef {
            path: "menuItems/x.jpg".into(),
            token: Some("tok-1".into()),
        };
        let url = bucket.download_url(&blob).await.unwrap();
        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o/menuItems%2Fx.jpg?alt=media&token=tok-1"
        );
    }
}
