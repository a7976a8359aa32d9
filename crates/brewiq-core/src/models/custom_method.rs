//! User-defined brew methods and ratio overrides

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::BrewStrength;
use crate::util::{normalize_text_option, parse_positive};

/// Longest allowed custom method name, in characters.
pub const MAX_CUSTOM_NAME_LEN: usize = 15;

/// Icon given to a custom method when none is picked.
pub const DEFAULT_CUSTOM_ICON: &str = "mug.fill";

/// Icons offered when creating a custom method.
pub const CUSTOM_ICONS: [&str; 8] = [
    "mug.fill",
    "cup.and.saucer.fill",
    "drop.fill",
    "sparkles",
    "star.fill",
    "heart.fill",
    "leaf.fill",
    "flame.fill",
];

/// A mild/medium/bold ratio triple.
///
/// Used both as a per-method override of catalog defaults and as the ratio
/// table of a custom method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomRatio {
    pub mild: f64,
    pub medium: f64,
    pub bold: f64,
}

impl CustomRatio {
    /// Ratios prefilled in the "add custom method" form.
    pub const DEFAULT: Self = Self {
        mild: 17.0,
        medium: 16.0,
        bold: 15.0,
    };

    pub const fn new(mild: f64, medium: f64, bold: f64) -> Self {
        Self { mild, medium, bold }
    }

    /// Parse three user-typed ratios.
    ///
    /// Returns `None` unless every field is a finite positive number.
    pub fn parse(mild: &str, medium: &str, bold: &str) -> Option<Self> {
        Some(Self {
            mild: parse_positive(mild)?,
            medium: parse_positive(medium)?,
            bold: parse_positive(bold)?,
        })
    }

    /// Whether every ratio is finite and positive.
    pub fn is_valid(&self) -> bool {
        [self.mild, self.medium, self.bold]
            .iter()
            .all(|ratio| ratio.is_finite() && *ratio > 0.0)
    }

    pub const fn get(&self, strength: BrewStrength) -> f64 {
        match strength {
            BrewStrength::Mild => self.mild,
            BrewStrength::Medium => self.medium,
            BrewStrength::Bold => self.bold,
        }
    }
}

impl Default for CustomRatio {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A unique identifier for a custom method, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomMethodId(Uuid);

impl CustomMethodId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for CustomMethodId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomMethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomMethodId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A brew method created by the user. Independent of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomBrewMethod {
    pub id: CustomMethodId,
    /// Display name, 1 to 15 characters
    pub name: String,
    /// Icon reference (SF Symbol name)
    pub icon: String,
    pub ratios: CustomRatio,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl CustomBrewMethod {
    /// Build a custom method from form input.
    ///
    /// Returns `None` when the trimmed name is empty or longer than
    /// [`MAX_CUSTOM_NAME_LEN`] characters, or when a ratio is not a finite
    /// positive number. A blank icon falls back to [`DEFAULT_CUSTOM_ICON`].
    pub fn new(name: &str, icon: &str, ratios: CustomRatio) -> Option<Self> {
        let name = validate_custom_name(name)?;
        if !ratios.is_valid() {
            return None;
        }
        let icon = normalize_text_option(Some(icon)).unwrap_or_else(|| DEFAULT_CUSTOM_ICON.into());
        Some(Self {
            id: CustomMethodId::new(),
            name,
            icon,
            ratios,
            created_at: crate::util::unix_timestamp_millis(),
        })
    }

    pub const fn ratio(&self, strength: BrewStrength) -> f64 {
        self.ratios.get(strength)
    }
}

/// Trim a custom method name and check its length.
pub fn validate_custom_name(name: &str) -> Option<String> {
    let name = normalize_text_option(Some(name))?;
    (name.chars().count() <= MAX_CUSTOM_NAME_LEN).then_some(name)
}
