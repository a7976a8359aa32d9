//! User preferences model and override resolution

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::brew_method::DEFAULT_SELECTION;
use super::{BrewMethod, BrewStrength, CustomBrewMethod, CustomMethodId, CustomRatio};

/// Maximum number of built-in methods shown on the calculator screen.
pub const MAX_SELECTED_METHODS: usize = 9;

/// Theme options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    Light,
    Dark,
    /// Follow system preference
    #[default]
    Auto,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::Auto];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Auto => "Auto",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidInput(format!("unknown theme '{s}'")))
    }
}

/// Result of a preference edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The edit changed the record.
    Applied,
    /// The edit was valid but left the record as it was (e.g. the selection
    /// cap was reached, or the value was already set).
    Unchanged,
    /// The input was invalid; the host should keep the action disabled.
    Rejected,
}

impl Outcome {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Reference to either a built-in or a user-defined method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodRef {
    BuiltIn(BrewMethod),
    Custom(CustomMethodId),
}

impl From<BrewMethod> for MethodRef {
    fn from(method: BrewMethod) -> Self {
        Self::BuiltIn(method)
    }
}

/// The persisted per-installation preferences record.
///
/// Method keys are catalog identifiers (see [`BrewMethod::id`]) so records
/// written by older versions survive catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Selected method identifiers in display order
    pub selected_methods: Vec<String>,
    /// Per-method ratio overrides
    pub custom_ratios: BTreeMap<String, CustomRatio>,
    /// Per-method brew notes overrides
    pub custom_notes: BTreeMap<String, String>,
    /// User-defined methods in creation order
    pub custom_methods: Vec<CustomBrewMethod>,
    pub theme: Theme,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            selected_methods: DEFAULT_SELECTION
                .iter()
                .map(|method| method.id().to_string())
                .collect(),
            custom_ratios: BTreeMap::new(),
            custom_notes: BTreeMap::new(),
            custom_methods: Vec::new(),
            theme: Theme::Auto,
        }
    }
}

impl UserPreferences {
    /// Selected methods that still exist in the catalog, in display order.
    pub fn selected_methods(&self) -> Vec<BrewMethod> {
        self.selected_methods
            .iter()
            .filter_map(|id| BrewMethod::from_id(id))
            .collect()
    }

    pub fn is_selected(&self, method: BrewMethod) -> bool {
        self.selected_methods.iter().any(|id| id == method.id())
    }

    /// Ratio for a built-in method: the user's override when present,
    /// otherwise the catalog default.
    pub fn effective_ratio(&self, method: BrewMethod, strength: BrewStrength) -> f64 {
        self.custom_ratios
            .get(method.id())
            .map_or_else(|| method.ratio(strength), |custom| custom.get(strength))
    }

    /// Brew notes for a built-in method: the user's override when present,
    /// otherwise the catalog text.
    pub fn effective_notes(&self, method: BrewMethod) -> &str {
        self.custom_notes
            .get(method.id())
            .map_or_else(|| method.default_notes(), String::as_str)
    }

    pub fn custom_ratio(&self, method: BrewMethod) -> Option<&CustomRatio> {
        self.custom_ratios.get(method.id())
    }

    pub fn has_customization(&self, method: BrewMethod) -> bool {
        self.custom_ratios.contains_key(method.id()) || self.custom_notes.contains_key(method.id())
    }

    pub fn custom_method(&self, id: CustomMethodId) -> Option<&CustomBrewMethod> {
        self.custom_methods.iter().find(|method| method.id == id)
    }

    /// Ratio for any method reference. `None` when a custom method has been
    /// deleted.
    pub fn ratio_for(&self, method: MethodRef, strength: BrewStrength) -> Option<f64> {
        match method {
            MethodRef::BuiltIn(method) => Some(self.effective_ratio(method, strength)),
            MethodRef::Custom(id) => self.custom_method(id).map(|custom| custom.ratio(strength)),
        }
    }

    /// Display name for any method reference.
    pub fn name_for(&self, method: MethodRef) -> Option<&str> {
        match method {
            MethodRef::BuiltIn(method) => Some(method.id()),
            MethodRef::Custom(id) => self.custom_method(id).map(|custom| custom.name.as_str()),
        }
    }

    /// Remove `method` if selected, otherwise append it while fewer than
    /// [`MAX_SELECTED_METHODS`] are selected.
    ///
    /// Identifiers no longer in the catalog are dropped first so they cannot
    /// hold slots.
    pub fn toggle_method(&mut self, method: BrewMethod) -> Outcome {
        let before = self.selected_methods.len();
        self.selected_methods
            .retain(|id| BrewMethod::from_id(id).is_some());
        let pruned = self.selected_methods.len() != before;

        if let Some(index) = self.selected_methods.iter().position(|id| id == method.id()) {
            self.selected_methods.remove(index);
            return Outcome::Applied;
        }
        if self.selected_methods.len() < MAX_SELECTED_METHODS {
            self.selected_methods.push(method.id().to_string());
            return Outcome::Applied;
        }
        if pruned {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }

    pub fn set_custom_ratio(&mut self, method: BrewMethod, ratio: CustomRatio) -> Outcome {
        if !ratio.is_valid() {
            return Outcome::Rejected;
        }
        if self.custom_ratios.get(method.id()) == Some(&ratio) {
            return Outcome::Unchanged;
        }
        self.custom_ratios.insert(method.id().to_string(), ratio);
        Outcome::Applied
    }

    pub fn clear_custom_ratio(&mut self, method: BrewMethod) -> Outcome {
        if self.custom_ratios.remove(method.id()).is_some() {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }

    /// Override a method's notes. Blank text is rejected.
    pub fn set_custom_notes(&mut self, method: BrewMethod, notes: &str) -> Outcome {
        if notes.trim().is_empty() {
            return Outcome::Rejected;
        }
        if self.custom_notes.get(method.id()).map(String::as_str) == Some(notes) {
            return Outcome::Unchanged;
        }
        self.custom_notes
            .insert(method.id().to_string(), notes.to_string());
        Outcome::Applied
    }

    pub fn clear_custom_notes(&mut self, method: BrewMethod) -> Outcome {
        if self.custom_notes.remove(method.id()).is_some() {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }

    /// Validate and append a custom method, returning its id.
    ///
    /// `None` means the input was rejected and nothing changed.
    pub fn add_custom_method(
        &mut self,
        name: &str,
        icon: &str,
        ratios: CustomRatio,
    ) -> Option<CustomMethodId> {
        let method = CustomBrewMethod::new(name, icon, ratios)?;
        let id = method.id;
        self.custom_methods.push(method);
        Some(id)
    }

    pub fn delete_custom_method(&mut self, id: CustomMethodId) -> Outcome {
        let before = self.custom_methods.len();
        self.custom_methods.retain(|method| method.id != id);
        if self.custom_methods.len() == before {
            Outcome::Unchanged
        } else {
            Outcome::Applied
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> Outcome {
        if self.theme == theme {
            Outcome::Unchanged
        } else {
            self.theme = theme;
            Outcome::Applied
        }
    }
}
