//! Purchasable templates derived from a base garment product

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Identifier of a template within one loaded catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical print constraints shared by every template of a garment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSpec {
    /// Print area width in inches
    pub area_width_in: f64,
    /// Print area height in inches
    pub area_height_in: f64,
    pub min_dpi: u32,
    /// Largest accepted design upload in bytes
    pub max_file_size: u64,
}

impl PrintSpec {
    /// Pixel dimensions a design needs to print sharply at `min_dpi`
    pub fn recommended_pixels(&self) -> (u32, u32) {
        let width = (self.area_width_in * self.min_dpi as f64).round() as u32;
        let height = (self.area_height_in * self.min_dpi as f64).round() as u32;
        (width, height)
    }

    /// Max upload size in MB, one decimal, as shown on the designer
    pub fn max_file_size_label(&self) -> String {
        format!("{:.1} MB", self.max_file_size as f64 / (1024.0 * 1024.0))
    }
}

/// A pre-configured customization starting point. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,

    /// Layout key, e.g. "front-logo"
    pub template_key: String,

    pub name: String,
    pub description: String,

    /// Garment type copied from the base product (e.g. "tshirt")
    pub product_type: String,

    pub base_price: Money,
    pub print: PrintSpec,

    /// Card image shown in the template grid
    pub image_url: String,

    /// Template rendered on the garment
    pub mockup_url: String,
}
