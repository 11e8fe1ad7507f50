//! External media collaborators: the object store holding video assets and
//! the ffprobe-based duration probe. Both are consumed as opaque services.

use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use tokio::process::Command;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

pub struct MediaService {
    s3: Client,
    bucket: String,
}

impl MediaService {
    /// Build the S3 client from explicit configuration.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "vidtube",
        );

        let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint {
            if !endpoint.trim().is_empty() {
                builder = builder.endpoint_url(endpoint);
            }
        }

        Self {
            s3: Client::from_conf(builder.build()),
            bucket: config.bucket_name.clone(),
        }
    }

    /// Delete the object backing an asset URL.
    pub async fn delete_asset(&self, asset_url: &str) -> Result<()> {
        let key = object_key(asset_url).ok_or_else(|| {
            AppError::Internal(format!("Cannot derive object key from URL: {asset_url}"))
        })?;

        self.s3
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete object {key}: {e}")))?;

        Ok(())
    }

    /// Probe the duration (seconds) of a media source via ffprobe.
    pub async fn probe_duration(&self, source: &str) -> Result<f64> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "json",
                source,
            ])
            .output()
            .await
            .map_err(|e| AppError::Internal(format!("ffprobe spawn error: {e}")))?;

        if !output.status.success() {
            return Err(AppError::Internal("ffprobe failed".to_string()));
        }

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| AppError::Internal(format!("ffprobe json parse: {e}")))?;

        json.get("format")
            .and_then(|f| f.get("duration"))
            .and_then(|d| d.as_str())
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| AppError::Internal("ffprobe reported no duration".to_string()))
    }
}

/// Object key for an asset URL: the URL path without the leading slash.
fn object_key(asset_url: &str) -> Option<String> {
    let parsed = url::Url::parse(asset_url).ok()?;
    let key = parsed.path().trim_start_matches('/');

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_from_url() {
        assert_eq!(
            object_key("https://media.example.com/videos/abc123.mp4").as_deref(),
            Some("videos/abc123.mp4")
        );
        assert_eq!(
            object_key("https://media.example.com/thumb.png").as_deref(),
            Some("thumb.png")
        );
    }

    #[test]
    fn test_object_key_rejects_bare_host() {
        assert!(object_key("https://media.example.com/").is_none());
        assert!(object_key("not a url").is_none());
    }
}
