use std::path::Path;

use brewiq_core::models::Theme;
use brewiq_core::BrewMethod;

use crate::commands::common::{finish_edit, join_words, open_database, open_store};
use crate::error::CliError;

pub fn run_toggle(method: BrewMethod, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;
    let was_selected = store.preferences().is_selected(method);
    let outcome = store.toggle_method(method);

    let applied = if was_selected {
        format!("Removed {method} from selected methods")
    } else {
        format!("Added {method} to selected methods")
    };
    let unchanged = format!("Selection is full; deselect a method before adding {method}");
    println!(
        "{}",
        finish_edit(&mut store, outcome, &applied, &unchanged, "")?
    );
    Ok(())
}

pub fn run_ratio_set(
    method: BrewMethod,
    mild: &str,
    medium: &str,
    bold: &str,
    db_path: &Path,
) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;
    let outcome = store.set_custom_ratio(method, mild, medium, bold);
    println!(
        "{}",
        finish_edit(
            &mut store,
            outcome,
            &format!("Saved custom ratios for {method}"),
            &format!("{method} already uses these ratios"),
            "ratios must be positive numbers",
        )?
    );
    Ok(())
}

pub fn run_ratio_clear(method: BrewMethod, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;
    let outcome = store.clear_custom_ratio(method);
    println!(
        "{}",
        finish_edit(
            &mut store,
            outcome,
            &format!("Restored default ratios for {method}"),
            &format!("{method} has no custom ratios"),
            "",
        )?
    );
    Ok(())
}

pub fn run_notes_show(method: BrewMethod, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let store = open_store(&db)?;
    println!("{}", store.preferences().effective_notes(method));
    Ok(())
}

pub fn run_notes_set(method: BrewMethod, text: &[String], db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;
    let outcome = store.set_custom_notes(method, &join_words(text));
    println!(
        "{}",
        finish_edit(
            &mut store,
            outcome,
            &format!("Saved notes for {method}"),
            &format!("{method} already uses these notes"),
            "notes cannot be empty",
        )?
    );
    Ok(())
}

pub fn run_notes_clear(method: BrewMethod, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;
    let outcome = store.clear_custom_notes(method);
    println!(
        "{}",
        finish_edit(
            &mut store,
            outcome,
            &format!("Restored default notes for {method}"),
            &format!("{method} has no custom notes"),
            "",
        )?
    );
    Ok(())
}

pub fn run_theme(theme: Option<Theme>, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;

    let Some(theme) = theme else {
        println!("{}", store.preferences().theme);
        return Ok(());
    };

    let outcome = store.set_theme(theme);
    println!(
        "{}",
        finish_edit(
            &mut store,
            outcome,
            &format!("Theme set to {theme}"),
            &format!("Theme is already {theme}"),
            "",
        )?
    );
    Ok(())
}
