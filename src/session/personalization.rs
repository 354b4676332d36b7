//! Text and color personalization entered on the designer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::ValidationError;

/// A `#RRGGBB` color, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor(s.to_string()));
        }

        Ok(HexColor(format!("#{}", digits.to_ascii_uppercase())))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> String {
        color.0
    }
}

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which color a value applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    School,
    FontFill,
    FontOutline,
}

impl ColorRole {
    pub fn label(&self) -> &'static str {
        match self {
            ColorRole::School => "School color",
            ColorRole::FontFill => "Font fill color",
            ColorRole::FontOutline => "Font outline color",
        }
    }
}

/// Optional text fields that can be cleared by submitting an empty value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    SchoolName,
    TeamName,
}

impl TextField {
    pub fn label(&self) -> &'static str {
        match self {
            TextField::SchoolName => "School name",
            TextField::TeamName => "Team name",
        }
    }
}

/// Personalization attached to the open session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personalization {
    pub last_name: Option<String>,
    pub school_name: Option<String>,
    pub team_name: Option<String>,
    pub school_color: Option<HexColor>,
    pub font_fill_color: Option<HexColor>,
    pub font_outline_color: Option<HexColor>,
}

impl Personalization {
    /// Set the last name. Required: blank input is rejected.
    pub fn set_last_name(&mut self, value: &str) -> Result<&str, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("last name"));
        }
        Ok(self.last_name.insert(trimmed.to_string()))
    }

    /// Set or clear an optional text field. Returns the stored value.
    pub fn set_text(&mut self, field: TextField, value: &str) -> Option<&str> {
        let trimmed = value.trim();
        let slot = match field {
            TextField::SchoolName => &mut self.school_name,
            TextField::TeamName => &mut self.team_name,
        };

        *slot = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        slot.as_deref()
    }

    pub fn set_color(&mut self, role: ColorRole, value: &str) -> Result<&HexColor, ValidationError> {
        let color: HexColor = value.parse()?;
        let slot = match role {
            ColorRole::School => &mut self.school_color,
            ColorRole::FontFill => &mut self.font_fill_color,
            ColorRole::FontOutline => &mut self.font_outline_color,
        };
        Ok(slot.insert(color))
    }
}
