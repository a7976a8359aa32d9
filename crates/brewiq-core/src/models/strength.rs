//! Brew strength model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strength selector; picks which of a method's three ratios applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrewStrength {
    Mild,
    #[default]
    Medium,
    Bold,
}

impl BrewStrength {
    pub const ALL: [Self; 3] = [Self::Mild, Self::Medium, Self::Bold];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Medium => "Medium",
            Self::Bold => "Bold",
        }
    }
}

impl fmt::Display for BrewStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BrewStrength {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strength| strength.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidInput(format!("unknown brew strength '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_count() {
        assert_eq!(BrewStrength::ALL.len(), 3);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("bold".parse::<BrewStrength>().unwrap(), BrewStrength::Bold);
        assert_eq!(" MILD ".parse::<BrewStrength>().unwrap(), BrewStrength::Mild);
        assert!("strong".parse::<BrewStrength>().is_err());
    }
}
