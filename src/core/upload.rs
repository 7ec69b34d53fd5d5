//! Image uploads stored inline as data URLs

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::core::error::UploadError;

/// 2 MiB
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Size and type limits applied before an image is accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub max_bytes: usize,
    pub accepted_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
            accepted_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }
}

impl UploadLimits {
    /// Limit expressed in megabytes, as shown to users
    pub fn limit_mb(&self) -> f64 {
        self.max_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// An accepted image, ready to be stored in an image field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub size: usize,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
}

impl ImageUpload {
    /// Check the file against the limits and encode it.
    ///
    /// Files of exactly `max_bytes` are accepted.
    pub fn accept(
        file_name: &str,
        mime: &str,
        bytes: &[u8],
        limits: &UploadLimits,
    ) -> Result<Self, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let mime = mime.trim().to_ascii_lowercase();
        if !limits.accepted_types.iter().any(|t| t.eq_ignore_ascii_case(&mime)) {
            return Err(UploadError::UnsupportedType {
                mime,
                accepted: limits.accepted_types.clone(),
            });
        }

        if bytes.len() > limits.max_bytes {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                limit_mb: limits.limit_mb(),
            });
        }

        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
        tracing::debug!(file = %file_name, size = bytes.len(), "image accepted");

        Ok(Self {
            file_name: file_name.to_string(),
            mime,
            size: bytes.len(),
            data_url,
        })
    }
}
