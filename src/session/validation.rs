//! Input validation for the designer
//!
//! Upload checks run before anything is sent to the backend. The accepted
//! MIME types are configured per slot: the main designer upload defaults
//! to PNG only, the auxiliary image slots to PNG/JPEG.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{UploadSettings, DEFAULT_MAX_FILE_SIZE};
use crate::domain::{FileMeta, Template, UnknownOption};

/// User-input validation failures. The rejected operation changes no state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported file type {mime_type} for {slot}; accepted: {}", .accepted.join(", "))]
    UnsupportedFileType {
        slot: UploadSlot,
        mime_type: String,
        accepted: Vec<String>,
    },

    #[error("File is too large: {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Please enter a {0}")]
    EmptyField(&'static str),

    #[error("Invalid color: {0} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error(transparent)]
    UnknownOption(#[from] UnknownOption),
}

/// Auxiliary image slots on the designer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSlot {
    ImageOne,
    ImageTwo,
    Logo,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 3] = [ImageSlot::ImageOne, ImageSlot::ImageTwo, ImageSlot::Logo];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSlot::ImageOne => "image-1",
            ImageSlot::ImageTwo => "image-2",
            ImageSlot::Logo => "logo",
        }
    }
}

/// Where a file is being uploaded to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSlot {
    /// The print design of the selected template
    Design,
    Image(ImageSlot),
}

impl fmt::Display for UploadSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadSlot::Design => f.write_str("design"),
            UploadSlot::Image(slot) => f.write_str(slot.as_str()),
        }
    }
}

/// Accepted file types and size limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub design_mime_types: Vec<String>,
    pub image_mime_types: Vec<String>,
    pub default_max_file_size: u64,
    pub image_max_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        UploadPolicy::from(&UploadSettings::default())
    }
}

impl From<&UploadSettings> for UploadPolicy {
    fn from(settings: &UploadSettings) -> Self {
        UploadPolicy {
            design_mime_types: settings.primary_mime_types.clone(),
            image_mime_types: settings.secondary_mime_types.clone(),
            default_max_file_size: settings.default_max_file_size,
            image_max_file_size: settings.secondary_max_file_size,
        }
    }
}

impl UploadPolicy {
    /// Check a design upload against the open template's limits
    pub fn check_design(&self, file: &FileMeta, template: Option<&Template>) -> Result<(), ValidationError> {
        let max = template
            .map(|t| t.print.max_file_size)
            .filter(|max| *max > 0)
            .unwrap_or(self.default_max_file_size);

        Self::check(UploadSlot::Design, file, &self.design_mime_types, max)
    }

    /// Check a file for one of the auxiliary image slots
    pub fn check_image(&self, slot: ImageSlot, file: &FileMeta) -> Result<(), ValidationError> {
        let max = if self.image_max_file_size > 0 {
            self.image_max_file_size
        } else {
            DEFAULT_MAX_FILE_SIZE
        };

        Self::check(UploadSlot::Image(slot), file, &self.image_mime_types, max)
    }

    fn check(slot: UploadSlot, file: &FileMeta, accepted: &[String], max: u64) -> Result<(), ValidationError> {
        // Drop parameters such as "; charset=binary"
        let essence = file.mime_type.split(';').next().unwrap_or_default().trim();

        if !accepted.iter().any(|m| m.eq_ignore_ascii_case(essence)) {
            return Err(ValidationError::UnsupportedFileType {
                slot,
                mime_type: file.mime_type.clone(),
                accepted: accepted.to_vec(),
            });
        }

        if file.size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if file.size > max {
            return Err(ValidationError::FileTooLarge { size: file.size, max });
        }

        Ok(())
    }
}
