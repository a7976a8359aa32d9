//! Data models for BrewIQ

pub mod brew_method;
mod custom_method;
mod preferences;
mod strength;
mod water_unit;

pub use brew_method::{BrewMethod, DEFAULT_SELECTION};
pub use custom_method::{
    validate_custom_name, CustomBrewMethod, CustomMethodId, CustomRatio, CUSTOM_ICONS,
    DEFAULT_CUSTOM_ICON, MAX_CUSTOM_NAME_LEN,
};
pub use preferences::{MethodRef, Outcome, Theme, UserPreferences, MAX_SELECTED_METHODS};
pub use strength::BrewStrength;
pub use water_unit::{CoffeeUnit, WaterUnit};
