use std::path::Path;

use brewiq_core::calculator::{format_amount, format_ratio, BrewSession, PLACEHOLDER};
use brewiq_core::models::CoffeeUnit;
use brewiq_core::{MethodRef, UserPreferences};

use crate::cli::{BrewSelection, CalcCommands};
use crate::commands::common::{open_database, open_store, resolve_custom_method};
use crate::error::CliError;

pub fn run_calc(command: CalcCommands, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let store = open_store(&db)?;
    let prefs = store.preferences();

    let line = match command {
        CalcCommands::Coffee { water, selection } => {
            let mut session = build_session(&selection, prefs)?;
            session.set_water_input(water);
            describe_coffee(&session, prefs)
        }
        CalcCommands::Water { coffee, selection } => {
            let mut session = build_session(&selection, prefs)?;
            session.set_coffee_input(coffee);
            describe_water(&session, prefs)
        }
    };
    println!("{line}");
    Ok(())
}

pub fn build_session(
    selection: &BrewSelection,
    prefs: &UserPreferences,
) -> Result<BrewSession, CliError> {
    let method = match selection.custom.as_deref() {
        Some(query) => MethodRef::Custom(resolve_custom_method(query, prefs)?.id),
        None => MethodRef::BuiltIn(selection.method),
    };
    let mut session = BrewSession::new(method);
    session.strength = selection.strength;
    session.water_unit = selection.unit;
    Ok(session)
}

/// One line for the coffee result; unparseable input renders the placeholder.
pub fn describe_coffee(session: &BrewSession, prefs: &UserPreferences) -> String {
    format!(
        "{} {} coffee for {} {} water ({})",
        format_amount(session.calculated_coffee(prefs)),
        CoffeeUnit::Grams.symbol(),
        session.water_input().trim(),
        session.water_unit.symbol(),
        describe_selection(session, prefs),
    )
}

pub fn describe_water(session: &BrewSession, prefs: &UserPreferences) -> String {
    format!(
        "{} {} water for {} {} coffee ({})",
        format_amount(session.calculated_water(prefs)),
        session.water_unit.symbol(),
        session.coffee_input().trim(),
        CoffeeUnit::Grams.symbol(),
        describe_selection(session, prefs),
    )
}

fn describe_selection(session: &BrewSession, prefs: &UserPreferences) -> String {
    let name = prefs.name_for(session.method).unwrap_or(PLACEHOLDER);
    let ratio = session
        .ratio(prefs)
        .map_or_else(|| PLACEHOLDER.to_string(), format_ratio);
    format!("{name}, {}, {ratio}", session.strength)
}
