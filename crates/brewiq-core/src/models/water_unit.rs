//! Water and coffee measurement units

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MILLILITERS_PER_OUNCE: f64 = 29.5735;
const MILLILITERS_PER_CUP: f64 = 118.294;

/// Unit for the water side of a brew.
///
/// Water is treated as 1 ml = 1 g, so milliliters double as the mass unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WaterUnit {
    #[default]
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "oz")]
    Ounces,
    /// A 4 fl oz cup.
    #[serde(rename = "cup (4oz)")]
    Cups,
}

impl WaterUnit {
    pub const ALL: [Self; 3] = [Self::Milliliters, Self::Ounces, Self::Cups];

    /// Short symbol shown after amounts.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Milliliters => "ml",
            Self::Ounces => "oz",
            Self::Cups => "cup (4oz)",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Milliliters => "Milliliters",
            Self::Ounces => "Ounces",
            Self::Cups => "Cup (4oz)",
        }
    }

    const fn milliliters_per_unit(self) -> f64 {
        match self {
            Self::Milliliters => 1.0,
            Self::Ounces => MILLILITERS_PER_OUNCE,
            Self::Cups => MILLILITERS_PER_CUP,
        }
    }

    /// Convert an amount in this unit to milliliters.
    pub fn to_milliliters(self, value: f64) -> f64 {
        value * self.milliliters_per_unit()
    }

    /// Convert milliliters to an amount in this unit.
    pub fn from_milliliters(self, milliliters: f64) -> f64 {
        milliliters / self.milliliters_per_unit()
    }

    /// Mass of the given amount of water in grams.
    pub fn to_grams(self, value: f64) -> f64 {
        self.to_milliliters(value)
    }
}

impl fmt::Display for WaterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WaterUnit {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ml" | "milliliters" | "millilitres" => Ok(Self::Milliliters),
            "oz" | "ounce" | "ounces" => Ok(Self::Ounces),
            "cup" | "cups" | "cup (4oz)" => Ok(Self::Cups),
            _ => Err(crate::Error::InvalidInput(format!(
                "unknown water unit '{s}'"
            ))),
        }
    }
}

/// Coffee is always weighed in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoffeeUnit {
    #[default]
    #[serde(rename = "g")]
    Grams,
}

impl CoffeeUnit {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Grams => "g",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Grams => "Grams",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milliliters_identity() {
        assert!((WaterUnit::Milliliters.to_milliliters(100.0) - 100.0).abs() < f64::EPSILON);
        assert!((WaterUnit::Milliliters.from_milliliters(100.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ounce_and_cup_constants() {
        assert!((WaterUnit::Ounces.to_milliliters(1.0) - 29.5735).abs() < 0.001);
        assert!((WaterUnit::Ounces.from_milliliters(29.5735) - 1.0).abs() < 0.001);
        assert!((WaterUnit::Cups.to_milliliters(1.0) - 118.294).abs() < 0.001);
        assert!((WaterUnit::Cups.from_milliliters(118.294) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for unit in WaterUnit::ALL {
            for value in [0.1, 1.0, 7.25, 300.0, 12_345.678] {
                let back = unit.from_milliliters(unit.to_milliliters(value));
                assert!((back - value).abs() < 1e-6, "{unit}: {value} -> {back}");
            }
        }
    }

    #[test]
    fn test_water_grams_match_milliliters() {
        assert!((WaterUnit::Milliliters.to_grams(250.0) - 250.0).abs() < f64::EPSILON);
        for unit in WaterUnit::ALL {
            assert!((unit.to_grams(3.0) - unit.to_milliliters(3.0)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_display_names_and_parse() {
        for unit in WaterUnit::ALL {
            assert!(!unit.display_name().is_empty());
            assert_eq!(unit.symbol().parse::<WaterUnit>().unwrap(), unit);
        }
        assert!("gallon".parse::<WaterUnit>().is_err());
        assert_eq!(CoffeeUnit::Grams.symbol(), "g");
    }
}
