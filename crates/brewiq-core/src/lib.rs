//! brewiq-core - Core library for BrewIQ
//!
//! This crate contains the brew method catalog, unit conversion, ratio
//! calculator, persisted user preferences, and the brew countdown timer used
//! by every BrewIQ front end.

pub mod calculator;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod timer;
mod util;

pub use error::{Error, Result};
pub use models::{BrewMethod, BrewStrength, MethodRef, UserPreferences, WaterUnit};
