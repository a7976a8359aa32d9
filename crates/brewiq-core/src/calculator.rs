//! Coffee/water ratio calculator

use crate::models::{BrewMethod, BrewStrength, MethodRef, UserPreferences, WaterUnit};
use crate::util::parse_positive;

/// Rendered in place of a result that cannot be computed.
pub const PLACEHOLDER: &str = "--";

/// Grams of coffee for an amount of water.
///
/// `None` when the water amount or ratio is not a finite positive number.
pub fn coffee_for_water(water: f64, unit: WaterUnit, ratio: f64) -> Option<f64> {
    if !is_positive(water) || !is_positive(ratio) {
        return None;
    }
    Some(unit.to_grams(water) / ratio)
}

/// Amount of water, in `unit`, for grams of coffee.
///
/// `None` when the coffee amount or ratio is not a finite positive number.
pub fn water_for_coffee(coffee_grams: f64, ratio: f64, unit: WaterUnit) -> Option<f64> {
    if !is_positive(coffee_grams) || !is_positive(ratio) {
        return None;
    }
    Some(unit.from_milliliters(coffee_grams * ratio))
}

/// Grams of coffee for a user-typed water amount.
pub fn compute_coffee(water_input: &str, unit: WaterUnit, ratio: f64) -> Option<f64> {
    coffee_for_water(parse_positive(water_input)?, unit, ratio)
}

/// Water amount in `unit` for a user-typed coffee amount in grams.
pub fn compute_water(coffee_input: &str, ratio: f64, unit: WaterUnit) -> Option<f64> {
    water_for_coffee(parse_positive(coffee_input)?, ratio, unit)
}

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a result with one decimal, or [`PLACEHOLDER`] when absent.
pub fn format_amount(value: Option<f64>) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |value| format!("{:.1}", round_one_decimal(value)),
    )
}

/// Format a ratio as `1:N` with one decimal.
pub fn format_ratio(ratio: f64) -> String {
    format!("1:{:.1}", round_one_decimal(ratio))
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Calculator screen state: the current selection and the two amount fields.
///
/// Only one field holds a value at a time; typing into one clears the other.
#[derive(Debug, Clone, PartialEq)]
pub struct BrewSession {
    pub method: MethodRef,
    pub strength: BrewStrength,
    pub water_unit: WaterUnit,
    coffee_input: String,
    water_input: String,
}

impl Default for BrewSession {
    fn default() -> Self {
        Self::new(MethodRef::BuiltIn(BrewMethod::FrenchPress))
    }
}

impl BrewSession {
    pub fn new(method: MethodRef) -> Self {
        Self {
            method,
            strength: BrewStrength::Medium,
            water_unit: WaterUnit::Milliliters,
            coffee_input: String::new(),
            water_input: String::new(),
        }
    }

    pub fn coffee_input(&self) -> &str {
        &self.coffee_input
    }

    pub fn water_input(&self) -> &str {
        &self.water_input
    }

    /// Set the coffee field and clear the water field.
    pub fn set_coffee_input(&mut self, input: impl Into<String>) {
        self.coffee_input = input.into();
        self.water_input.clear();
    }

    /// Set the water field and clear the coffee field.
    pub fn set_water_input(&mut self, input: impl Into<String>) {
        self.water_input = input.into();
        self.coffee_input.clear();
    }

    pub fn clear_inputs(&mut self) {
        self.coffee_input.clear();
        self.water_input.clear();
    }

    /// Effective ratio for the selected method and strength.
    pub fn ratio(&self, prefs: &UserPreferences) -> Option<f64> {
        prefs.ratio_for(self.method, self.strength)
    }

    /// Grams of coffee for the water field.
    pub fn calculated_coffee(&self, prefs: &UserPreferences) -> Option<f64> {
        compute_coffee(&self.water_input, self.water_unit, self.ratio(prefs)?)
    }

    /// Water in the selected unit for the coffee field.
    pub fn calculated_water(&self, prefs: &UserPreferences) -> Option<f64> {
        compute_water(&self.coffee_input, self.ratio(prefs)?, self.water_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomRatio;

    const FRENCH_PRESS_MEDIUM: f64 = 15.0;

    #[test]
    fn test_compute_coffee_from_water() {
        let coffee = compute_coffee("300", WaterUnit::Milliliters, FRENCH_PRESS_MEDIUM).unwrap();
        assert!((coffee - 20.0).abs() < 0.1);
    }

    #[test]
    fn test_compute_water_from_coffee() {
        let water = compute_water("20", FRENCH_PRESS_MEDIUM, WaterUnit::Milliliters).unwrap();
        assert!((water - 300.0).abs() < 0.1);
    }

    #[test]
    fn test_compute_coffee_with_ounces() {
        // 10 oz = 295.735 ml; / 16 = 18.48 g
        let coffee = compute_coffee("10", WaterUnit::Ounces, 16.0).unwrap();
        assert!((coffee - 18.48).abs() < 0.01);
    }

    #[test]
    fn test_invalid_inputs_yield_no_result() {
        for input in ["abc", "0", "-100", ""] {
            assert_eq!(
                compute_coffee(input, WaterUnit::Milliliters, FRENCH_PRESS_MEDIUM),
                None,
                "water {input:?}"
            );
            assert_eq!(
                compute_water(input, FRENCH_PRESS_MEDIUM, WaterUnit::Milliliters),
                None,
                "coffee {input:?}"
            );
        }
    }

    #[test]
    fn test_non_positive_ratio_yields_no_result() {
        assert_eq!(coffee_for_water(300.0, WaterUnit::Milliliters, 0.0), None);
        assert_eq!(water_for_coffee(20.0, -15.0, WaterUnit::Milliliters), None);
    }

    #[test]
    fn test_round_trip_through_both_directions() {
        for unit in WaterUnit::ALL {
            for ratio in [8.0, 13.0, 15.0, 16.5, 18.0] {
                for water in [0.5, 1.0, 4.0, 250.0, 1_000.0] {
                    let coffee = coffee_for_water(water, unit, ratio).unwrap();
                    let back = water_for_coffee(coffee, ratio, unit).unwrap();
                    assert!((back - water).abs() < 1e-9, "{unit} 1:{ratio} {water}");
                }
            }
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Some(20.5)), "20.5");
        assert_eq!(format_amount(Some(20.123)), "20.1");
        assert_eq!(format_amount(Some(20.99)), "21.0");
        assert_eq!(format_amount(Some(0.25)), "0.3");
        assert_eq!(format_amount(None), PLACEHOLDER);
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(15.0), "1:15.0");
        assert_eq!(format_ratio(16.25), "1:16.3");
    }

    #[test]
    fn test_session_inputs_are_exclusive() {
        let mut session = BrewSession::default();
        session.set_coffee_input("20");
        session.set_water_input("300");
        assert_eq!(session.coffee_input(), "");
        assert_eq!(session.water_input(), "300");

        session.set_coffee_input("18");
        assert_eq!(session.water_input(), "");

        session.clear_inputs();
        assert!(session.coffee_input().is_empty());
        assert!(session.water_input().is_empty());
    }

    #[test]
    fn test_session_uses_effective_ratio() {
        let mut prefs = UserPreferences::default();
        let mut session = BrewSession::default();
        session.set_water_input("300");
        assert!((session.calculated_coffee(&prefs).unwrap() - 20.0).abs() < 0.1);
        assert_eq!(session.calculated_water(&prefs), None);

        prefs.set_custom_ratio(BrewMethod::FrenchPress, CustomRatio::new(17.0, 12.0, 10.0));
        assert!((session.calculated_coffee(&prefs).unwrap() - 25.0).abs() < 0.1);
    }

    #[test]
    fn test_session_strength_and_method_change_result() {
        let prefs = UserPreferences::default();
        let mut session = BrewSession::default();
        session.set_water_input("300");

        session.strength = BrewStrength::Mild;
        let mild = session.calculated_coffee(&prefs).unwrap();
        session.strength = BrewStrength::Bold;
        let bold = session.calculated_coffee(&prefs).unwrap();
        assert!(bold > mild);

        session.strength = BrewStrength::Medium;
        let french_press = session.calculated_coffee(&prefs).unwrap();
        session.method = MethodRef::BuiltIn(BrewMethod::AeroPress);
        let aeropress = session.calculated_coffee(&prefs).unwrap();
        assert!((french_press - aeropress).abs() > 1.0);
    }

    #[test]
    fn test_session_with_custom_method() {
        let mut prefs = UserPreferences::default();
        let id = prefs
            .add_custom_method("Cold Brew", "leaf.fill", CustomRatio::new(8.0, 5.0, 4.0))
            .unwrap();
        let mut session = BrewSession::new(MethodRef::Custom(id));
        session.set_coffee_input("100");
        assert!((session.calculated_water(&prefs).unwrap() - 500.0).abs() < 0.1);

        prefs.delete_custom_method(id);
        assert_eq!(session.calculated_water(&prefs), None);
    }
}
