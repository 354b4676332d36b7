//! Domain types and models

mod design;
mod money;
mod options;
mod template;

pub use design::{DesignFile, DesignRecord, FileMeta, LocalPreview, UploadedDesign};
pub use money::Money;
pub use options::{GarmentSize, PreviewMode, QualityTier, UnknownOption};
pub use template::{PrintSpec, Template, TemplateId};
