//! Backend API Response Models
//!
//! These models mirror the JSON returned by the PHP endpoints. Numeric
//! fields are read leniently: the backend sends them as numbers or as
//! numeric strings depending on the driver.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::UploadedDesign;
use super::traits::{ApiError, ApiResult};

// ============================================================================
// Response Envelope
// ============================================================================

/// `{ success, message?, data? }` wrapper used by every endpoint
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning `success: false` into `ApiError::Rejected`
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Parse("Response has no data".to_string()))
    }
}

// ============================================================================
// Products
// ============================================================================

/// `data` of `GET products.php`
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    #[serde(default)]
    pub products: Vec<BaseProduct>,
}

/// Base garment product; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseProduct {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub base_price: Option<f64>,
    /// Inches
    #[serde(default, deserialize_with = "flexible_f64")]
    pub print_area_width: Option<f64>,
    /// Inches
    #[serde(default, deserialize_with = "flexible_f64")]
    pub print_area_height: Option<f64>,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub min_dpi: Option<f64>,
    /// Bytes
    #[serde(default, deserialize_with = "flexible_f64")]
    pub max_file_size: Option<f64>,
    #[serde(default)]
    pub product_type: Option<String>,
}

// ============================================================================
// Design Upload
// ============================================================================

/// `data` of `POST upload-designs.php`.
///
/// The design is normally nested under `design`, but some backend versions
/// return it inline.
#[derive(Debug, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub design: Option<DesignDto>,
    #[serde(flatten)]
    pub inline: DesignDto,
}

#[derive(Debug, Default, Deserialize)]
pub struct DesignDto {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl UploadData {
    pub fn into_design(self) -> ApiResult<UploadedDesign> {
        let dto = match self.design {
            Some(design) => design,
            None => self.inline,
        };

        let id = dto
            .id
            .ok_or_else(|| ApiError::Parse("Upload response has no design id".to_string()))?;

        Ok(UploadedDesign {
            id,
            url: dto.url.or(dto.file_url).or(dto.file_path),
        })
    }
}

// ============================================================================
// Serialization Helpers
// ============================================================================

/// Integers are tried before floats so large ids keep every digit
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

/// Accept `19.99` or `"19.99"`; anything unparseable reads as missing
fn flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Unsigned(n)) => Some(n as f64),
        Some(NumberOrText::Signed(n)) => Some(n as f64),
        Some(NumberOrText::Float(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Accept `7` or `"7"` as an id
fn flexible_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Unsigned(n)) => Some(n.to_string()),
        Some(NumberOrText::Signed(n)) => Some(n.to_string()),
        Some(NumberOrText::Float(n)) => Some(n.to_string()),
        Some(NumberOrText::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(NumberOrText::Text(_)) | None => None,
    })
}
