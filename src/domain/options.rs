//! Closed option sets offered by the designer: quality tier, garment size
//! and preview mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::money::Money;

/// Raised when a string does not name a known option
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

// ============================================================================
// Quality Tier
// ============================================================================

/// Print/material grade with a fixed surcharge over the template price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    #[default]
    Premium,
    Heavyweight,
    Performance,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [
        QualityTier::Premium,
        QualityTier::Heavyweight,
        QualityTier::Performance,
    ];

    /// Surcharge added to the template base price
    pub const fn price_delta(self) -> Money {
        match self {
            QualityTier::Premium => Money::from_units(0),
            QualityTier::Heavyweight => Money::from_units(2),
            QualityTier::Performance => Money::from_units(4),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Premium => "premium",
            QualityTier::Heavyweight => "heavyweight",
            QualityTier::Performance => "performance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Premium => "Premium",
            QualityTier::Heavyweight => "Heavyweight",
            QualityTier::Performance => "Performance",
        }
    }
}

impl FromStr for QualityTier {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualityTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownOption {
                kind: "quality tier",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Garment Size
// ============================================================================

/// Garment sizes offered for every template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GarmentSize {
    #[serde(rename = "youth-s")]
    YouthS,
    #[serde(rename = "youth-m")]
    YouthM,
    #[serde(rename = "youth-l")]
    YouthL,
    #[serde(rename = "adult-s")]
    AdultS,
    #[default]
    #[serde(rename = "adult-m")]
    AdultM,
    #[serde(rename = "adult-l")]
    AdultL,
    #[serde(rename = "adult-xl")]
    AdultXl,
    #[serde(rename = "adult-2xl")]
    Adult2Xl,
    #[serde(rename = "adult-3xl")]
    Adult3Xl,
}

impl GarmentSize {
    pub const ALL: [GarmentSize; 9] = [
        GarmentSize::YouthS,
        GarmentSize::YouthM,
        GarmentSize::YouthL,
        GarmentSize::AdultS,
        GarmentSize::AdultM,
        GarmentSize::AdultL,
        GarmentSize::AdultXl,
        GarmentSize::Adult2Xl,
        GarmentSize::Adult3Xl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentSize::YouthS => "youth-s",
            GarmentSize::YouthM => "youth-m",
            GarmentSize::YouthL => "youth-l",
            GarmentSize::AdultS => "adult-s",
            GarmentSize::AdultM => "adult-m",
            GarmentSize::AdultL => "adult-l",
            GarmentSize::AdultXl => "adult-xl",
            GarmentSize::Adult2Xl => "adult-2xl",
            GarmentSize::Adult3Xl => "adult-3xl",
        }
    }

    /// Cart label, e.g. "ADULT M"
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ").to_uppercase()
    }
}

impl FromStr for GarmentSize {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GarmentSize::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownOption {
                kind: "garment size",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for GarmentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Preview Mode
// ============================================================================

/// What the designer preview pane currently shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    #[default]
    TemplateArt,
    Mockup,
}

impl PreviewMode {
    pub fn toggled(self) -> Self {
        match self {
            PreviewMode::TemplateArt => PreviewMode::Mockup,
            PreviewMode::Mockup => PreviewMode::TemplateArt,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PreviewMode::TemplateArt => "Template Design",
            PreviewMode::Mockup => "Mock-up on T-Shirt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_deltas() {
        assert_eq!(QualityTier::Premium.price_delta(), Money::ZERO);
        assert_eq!(QualityTier::Heavyweight.price_delta(), Money::from_cents(200));
        assert_eq!(QualityTier::Performance.price_delta(), Money::from_cents(400));
    }

    #[test]
    fn test_quality_parse_rejects_unknown() {
        assert_eq!("performance".parse::<QualityTier>(), Ok(QualityTier::Performance));
        assert_eq!(" Heavyweight ".parse::<QualityTier>(), Ok(QualityTier::Heavyweight));

        let err = "standard".parse::<QualityTier>().unwrap_err();
        assert_eq!(err.kind, "quality tier");
        assert_eq!(err.value, "standard");
    }

    #[test]
    fn test_size_parse_and_label() {
        assert_eq!("adult-2xl".parse::<GarmentSize>(), Ok(GarmentSize::Adult2Xl));
        assert!("adult-xxs".parse::<GarmentSize>().is_err());
        assert_eq!(GarmentSize::default(), GarmentSize::AdultM);
        assert_eq!(GarmentSize::YouthL.label(), "YOUTH L");
    }

    #[test]
    fn test_size_serde_uses_kebab_names() {
        let json = serde_json::to_string(&GarmentSize::AdultXl).unwrap();
        assert_eq!(json, "\"adult-xl\"");
    }

    #[test]
    fn test_preview_toggle() {
        let mode = PreviewMode::default();
        assert_eq!(mode, PreviewMode::TemplateArt);
        assert_eq!(mode.toggled(), PreviewMode::Mockup);
        assert_eq!(mode.toggled().toggled(), PreviewMode::TemplateArt);
    }
}
