//! User-supplied design files and the records kept for them

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A file picked by the user, not yet validated
#[derive(Debug, Clone)]
pub struct DesignFile {
    pub filename: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl DesignFile {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, content: impl Into<Bytes>) -> Self {
        DesignFile {
            filename: filename.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn meta(&self) -> FileMeta {
        FileMeta {
            filename: self.filename.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size(),
        }
    }
}

/// Descriptive metadata of a picked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub filename: String,
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
}

impl FileMeta {
    /// Size in MB with two decimals
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / (1024.0 * 1024.0))
    }
}

/// Handle to an in-memory preview of a file that never left the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPreview(pub Uuid);

impl LocalPreview {
    pub fn new() -> Self {
        LocalPreview(Uuid::new_v4())
    }
}

impl Default for LocalPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local-preview:{}", self.0)
    }
}

/// Design as confirmed by the upload endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDesign {
    /// Server-assigned design id
    pub id: String,
    /// Where the backend stored the file, when it says so
    pub url: Option<String>,
}

/// Design attached to a customization session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    /// `None` when the upload failed and the design is local-only
    pub server_id: Option<String>,
    pub remote_url: Option<String>,
    pub local_preview: LocalPreview,
    pub filename: String,
    pub size: u64,
}

impl DesignRecord {
    pub fn is_local_only(&self) -> bool {
        self.server_id.is_none()
    }

    /// Best reference for showing this design: remote when known
    pub fn preview_ref(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| self.local_preview.to_string())
    }
}
