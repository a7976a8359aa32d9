//! Built-in brew method catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::BrewStrength;

/// A built-in brew method.
///
/// The catalog is closed: adding a method means adding a variant here and a
/// row to each lookup below. User-defined methods live in
/// [`super::CustomBrewMethod`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrewMethod {
    #[serde(rename = "Percolation")]
    Percolation,
    #[serde(rename = "French Press")]
    FrenchPress,
    #[serde(rename = "Moka Pot")]
    MokaPot,
    #[serde(rename = "Pour Over")]
    PourOver,
    #[serde(rename = "Drip Coffee")]
    DripCoffee,
    #[serde(rename = "AeroPress")]
    AeroPress,
    #[serde(rename = "Siphon Coffee")]
    SiphonCoffee,
    #[serde(rename = "Chemex")]
    Chemex,
    #[serde(rename = "Hario V60")]
    HarioV60,
    #[serde(rename = "Clever Dripper")]
    CleverDripper,
}

/// Methods selected on first launch, in display order.
pub const DEFAULT_SELECTION: [BrewMethod; 9] = [
    BrewMethod::FrenchPress,
    BrewMethod::MokaPot,
    BrewMethod::DripCoffee,
    BrewMethod::AeroPress,
    BrewMethod::SiphonCoffee,
    BrewMethod::Chemex,
    BrewMethod::HarioV60,
    BrewMethod::CleverDripper,
    BrewMethod::PourOver,
];

impl BrewMethod {
    /// Every built-in method in catalog order.
    pub const ALL: [Self; 10] = [
        Self::Percolation,
        Self::FrenchPress,
        Self::MokaPot,
        Self::PourOver,
        Self::DripCoffee,
        Self::AeroPress,
        Self::SiphonCoffee,
        Self::Chemex,
        Self::HarioV60,
        Self::CleverDripper,
    ];

    /// Stable identifier, also used as the display name and persisted key.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Percolation => "Percolation",
            Self::FrenchPress => "French Press",
            Self::MokaPot => "Moka Pot",
            Self::PourOver => "Pour Over",
            Self::DripCoffee => "Drip Coffee",
            Self::AeroPress => "AeroPress",
            Self::SiphonCoffee => "Siphon Coffee",
            Self::Chemex => "Chemex",
            Self::HarioV60 => "Hario V60",
            Self::CleverDripper => "Clever Dripper",
        }
    }

    /// Look up a method by its exact identifier.
    ///
    /// Returns `None` for identifiers that are not (or no longer) in the
    /// catalog.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.id() == id)
    }

    /// Default ratio (grams of water per gram of coffee) for a strength.
    pub const fn ratio(self, strength: BrewStrength) -> f64 {
        let (mild, medium, bold) = match self {
            Self::Percolation => (18.0, 16.0, 14.0),
            Self::FrenchPress => (17.0, 15.0, 13.0),
            Self::MokaPot => (12.0, 10.0, 8.0),
            Self::PourOver
            | Self::DripCoffee
            | Self::Chemex
            | Self::HarioV60
            | Self::CleverDripper => (17.0, 16.0, 15.0),
            Self::AeroPress => (15.0, 13.0, 11.0),
            Self::SiphonCoffee => (16.0, 15.0, 14.0),
        };
        match strength {
            BrewStrength::Mild => mild,
            BrewStrength::Medium => medium,
            BrewStrength::Bold => bold,
        }
    }

    /// Icon reference (SF Symbol name) shown next to the method.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Percolation => "drop.fill",
            Self::FrenchPress => "cup.and.saucer.fill",
            Self::MokaPot => "flame.fill",
            Self::PourOver => "drop.triangle",
            Self::DripCoffee => "drop.triangle.fill",
            Self::AeroPress => "cylinder.fill",
            Self::SiphonCoffee => "flask.fill",
            Self::Chemex => "hourglass",
            Self::HarioV60 => "arrowtriangle.down.fill",
            Self::CleverDripper => "mug.fill",
        }
    }

    /// Suggested brew time, used to seed the timer.
    pub const fn default_brew_time(self) -> Duration {
        let secs = match self {
            Self::Percolation => 300,
            Self::FrenchPress | Self::CleverDripper => 240,
            Self::MokaPot | Self::SiphonCoffee | Self::HarioV60 => 180,
            Self::PourOver | Self::DripCoffee => 210,
            Self::AeroPress => 120,
            Self::Chemex => 270,
        };
        Duration::from_secs(secs)
    }

    /// Built-in brew instructions.
    pub const fn default_notes(self) -> &'static str {
        match self {
            Self::Percolation => {
                "Fill the basket with coarse grounds and heat until the water starts cycling. \
                 Percolate for about 5 minutes, then remove from heat so it does not over-extract."
            }
            Self::FrenchPress => {
                "Use a coarse grind and water just off the boil. Pour, stir once, and steep for \
                 4 minutes before pressing the plunger down slowly."
            }
            Self::MokaPot => {
                "Fill the base with hot water up to the valve and the basket with a fine grind, \
                 without tamping. Brew over medium heat and pull it off once it starts to gurgle."
            }
            Self::PourOver => {
                "Rinse the filter, add a medium-fine grind and bloom with twice the coffee weight \
                 in water for 30 seconds. Pour the rest in slow spirals."
            }
            Self::DripCoffee => {
                "Use a medium grind and fresh cold water in the reservoir. Serve soon after the \
                 cycle ends rather than leaving it on the hot plate."
            }
            Self::AeroPress => {
                "Use a fine to medium grind and water around 85 C. Stir for 10 seconds, steep for \
                 about a minute, then press gently for 30 seconds."
            }
            Self::SiphonCoffee => {
                "Heat water in the lower chamber until it rises, then add a medium grind and stir. \
                 Brew for about a minute and remove the heat to draw the coffee down."
            }
            Self::Chemex => {
                "Use a thick rinsed filter and a medium-coarse grind. Bloom for 45 seconds, then \
                 pour in stages so the bed stays level."
            }
            Self::HarioV60 => {
                "Use a medium-fine grind and a gooseneck kettle. Bloom for 30 seconds, then pour \
                 in steady circles and aim to finish draining by 3 minutes."
            }
            Self::CleverDripper => {
                "Add water first, then a medium-coarse grind, and stir. Steep for about 2 minutes \
                 before setting it on the cup to drain."
            }
        }
    }
}

impl fmt::Display for BrewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BrewMethod {
    type Err = crate::Error;

    /// Lenient parse: ignores case, spaces, dashes, and underscores, so
    /// `"french-press"` and `"French Press"` both resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold_identifier(s);
        Self::ALL
            .into_iter()
            .find(|method| fold_identifier(method.id()) == wanted)
            .ok_or_else(|| crate::Error::InvalidInput(format!("unknown brew method '{s}'")))
    }
}

fn fold_identifier(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ratios(method: BrewMethod) -> (f64, f64, f64) {
        (
            method.ratio(BrewStrength::Mild),
            method.ratio(BrewStrength::Medium),
            method.ratio(BrewStrength::Bold),
        )
    }

    #[test]
    fn test_ratio_table() {
        let expected = [
            (BrewMethod::Percolation, (18.0, 16.0, 14.0)),
            (BrewMethod::FrenchPress, (17.0, 15.0, 13.0)),
            (BrewMethod::MokaPot, (12.0, 10.0, 8.0)),
            (BrewMethod::PourOver, (17.0, 16.0, 15.0)),
            (BrewMethod::DripCoffee, (17.0, 16.0, 15.0)),
            (BrewMethod::AeroPress, (15.0, 13.0, 11.0)),
            (BrewMethod::SiphonCoffee, (16.0, 15.0, 14.0)),
            (BrewMethod::Chemex, (17.0, 16.0, 15.0)),
            (BrewMethod::HarioV60, (17.0, 16.0, 15.0)),
            (BrewMethod::CleverDripper, (17.0, 16.0, 15.0)),
        ];
        assert_eq!(expected.len(), BrewMethod::ALL.len());
        for (method, table) in expected {
            assert_eq!(ratios(method), table, "{method}");
        }
    }

    #[test]
    fn test_ratios_positive_and_bold_is_strongest() {
        for method in BrewMethod::ALL {
            let (mild, medium, bold) = ratios(method);
            assert!(bold > 0.0);
            assert!(mild >= medium && medium >= bold, "{method}");
        }
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = BrewMethod::ALL.iter().map(|m| m.id()).collect();
        assert_eq!(ids.len(), BrewMethod::ALL.len());
    }

    #[test]
    fn test_every_method_has_icon_and_notes() {
        for method in BrewMethod::ALL {
            assert!(!method.icon().is_empty());
            assert!(!method.default_notes().trim().is_empty());
            assert!(method.default_brew_time() > Duration::ZERO);
        }
    }

    #[test]
    fn test_from_id_exact() {
        assert_eq!(
            BrewMethod::from_id("French Press"),
            Some(BrewMethod::FrenchPress)
        );
        assert_eq!(BrewMethod::from_id("french press"), None);
        assert_eq!(BrewMethod::from_id("Cold Brew"), None);
    }

    #[test]
    fn test_from_str_lenient() {
        assert_eq!(
            "french-press".parse::<BrewMethod>().unwrap(),
            BrewMethod::FrenchPress
        );
        assert_eq!(
            "hario_v60".parse::<BrewMethod>().unwrap(),
            BrewMethod::HarioV60
        );
        assert!("espresso".parse::<BrewMethod>().is_err());
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&BrewMethod::MokaPot).unwrap();
        assert_eq!(json, "\"Moka Pot\"");
    }

    #[test]
    fn test_default_selection_is_nine_distinct_methods() {
        let unique: HashSet<_> = DEFAULT_SELECTION.iter().collect();
        assert_eq!(unique.len(), 9);
        assert!(!DEFAULT_SELECTION.contains(&BrewMethod::Percolation));
    }
}
