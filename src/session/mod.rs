//! Customization session
//!
//! Holds what the user is configuring for the currently open template:
//! quality tier, garment size, uploaded design, auxiliary images and
//! personalization. Opening a template resets everything, so nothing
//! leaks from one template to the next. Price is always derived.

mod personalization;
mod validation;

pub use personalization::{ColorRole, HexColor, Personalization, TextField};
pub use validation::{ImageSlot, UploadPolicy, UploadSlot, ValidationError};

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    DesignRecord, FileMeta, GarmentSize, LocalPreview, Money, PreviewMode, QualityTier, Template,
    UploadedDesign,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No template selected")]
    NoTemplate,
}

/// Locally held file for an auxiliary image slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub filename: String,
    pub size: u64,
    pub preview: LocalPreview,
}

impl ImageRecord {
    /// Size in KB with two decimals
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

/// The single in-progress customization
#[derive(Debug, Clone, Default)]
pub struct CustomizationSession {
    template: Option<Arc<Template>>,
    quality: QualityTier,
    size: GarmentSize,
    design: Option<DesignRecord>,
    preview_mode: PreviewMode,
    images: BTreeMap<ImageSlot, ImageRecord>,
    personalization: Personalization,
}

impl CustomizationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start customizing `template`, discarding any previous state
    pub fn open(&mut self, template: Arc<Template>) {
        debug!(template_id = %template.id, name = %template.name, "Opening session");
        *self = CustomizationSession {
            template: Some(template),
            ..Default::default()
        };
    }

    /// Close the session and drop everything attached to it
    pub fn close(&mut self) {
        *self = CustomizationSession::default();
    }

    pub fn is_open(&self) -> bool {
        self.template.is_some()
    }

    pub fn template(&self) -> Option<&Arc<Template>> {
        self.template.as_ref()
    }

    pub fn quality(&self) -> QualityTier {
        self.quality
    }

    pub fn size(&self) -> GarmentSize {
        self.size
    }

    pub fn preview_mode(&self) -> PreviewMode {
        self.preview_mode
    }

    pub fn design(&self) -> Option<&DesignRecord> {
        self.design.as_ref()
    }

    pub fn images(&self) -> &BTreeMap<ImageSlot, ImageRecord> {
        &self.images
    }

    pub fn personalization(&self) -> &Personalization {
        &self.personalization
    }

    pub fn personalization_mut(&mut self) -> &mut Personalization {
        &mut self.personalization
    }

    pub fn set_quality(&mut self, quality: QualityTier) {
        self.quality = quality;
    }

    pub fn set_size(&mut self, size: GarmentSize) {
        self.size = size;
    }

    pub fn toggle_preview_mode(&mut self) -> PreviewMode {
        self.preview_mode = self.preview_mode.toggled();
        self.preview_mode
    }

    /// Template base price plus the quality surcharge; zero when closed
    pub fn current_price(&self) -> Money {
        match &self.template {
            Some(template) => template.base_price + self.quality.price_delta(),
            None => Money::ZERO,
        }
    }

    /// Attach a design file.
    ///
    /// `upload` is the backend's confirmation. Without one the design is
    /// kept as a local-only preview and the session stays fully usable.
    pub fn attach_design(
        &mut self,
        file: &FileMeta,
        upload: Option<UploadedDesign>,
    ) -> Result<&DesignRecord, SessionError> {
        if self.template.is_none() {
            return Err(SessionError::NoTemplate);
        }

        let (server_id, remote_url) = match upload {
            Some(design) => (Some(design.id), design.url),
            None => (None, None),
        };

        Ok(self.design.insert(DesignRecord {
            server_id,
            remote_url,
            local_preview: LocalPreview::new(),
            filename: file.filename.clone(),
            size: file.size,
        }))
    }

    /// Clear the design and return the preview to the template art
    pub fn remove_design(&mut self) -> Option<DesignRecord> {
        self.preview_mode = PreviewMode::TemplateArt;
        self.design.take()
    }

    pub fn attach_image(&mut self, slot: ImageSlot, file: &FileMeta) -> Result<&ImageRecord, SessionError> {
        if self.template.is_none() {
            return Err(SessionError::NoTemplate);
        }

        let record = ImageRecord {
            filename: file.filename.clone(),
            size: file.size,
            preview: LocalPreview::new(),
        };
        self.images.insert(slot, record);
        Ok(&self.images[&slot])
    }

    pub fn remove_image(&mut self, slot: ImageSlot) -> Option<ImageRecord> {
        self.images.remove(&slot)
    }

    /// Reference shown for the current configuration: the uploaded design,
    /// else the template's card image, else its mockup.
    pub fn preview_ref(&self) -> Option<String> {
        if let Some(design) = &self.design {
            return Some(design.preview_ref());
        }
        self.template.as_ref().map(|t| {
            if t.image_url.is_empty() {
                t.mockup_url.clone()
            } else {
                t.image_url.clone()
            }
        })
    }
}
