//! Stateful services shared by BrewIQ front ends.

mod preferences;

pub use crate::models::Outcome;
pub use preferences::PreferencesStore;
