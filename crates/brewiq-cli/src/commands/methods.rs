use std::path::Path;

use brewiq_core::{BrewMethod, UserPreferences};

use crate::commands::common::{
    built_in_to_list_item, custom_to_list_item, format_method_line, open_database, open_store,
    MethodListItem,
};
use crate::error::CliError;

pub fn run_methods(all: bool, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let store = open_store(&db)?;
    let prefs = store.preferences();
    let items = list_methods(prefs, all);

    if as_json {
        let json_items = items.into_iter().map(|(_, item)| item).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        println!("   {:<16} {:>6} {:>6} {:>6}  time", "method", "mild", "medium", "bold");
        for (name, item) in &items {
            println!("{}", format_method_line(item, name));
        }
    }

    Ok(())
}

/// Selected built-ins in display order, then custom methods.
///
/// With `all`, unselected built-ins follow the selected ones in catalog
/// order.
pub fn list_methods(prefs: &UserPreferences, all: bool) -> Vec<(String, MethodListItem)> {
    let mut items = prefs
        .selected_methods()
        .into_iter()
        .map(|method| (method.id().to_string(), built_in_to_list_item(method, prefs)))
        .collect::<Vec<_>>();

    if all {
        items.extend(
            BrewMethod::ALL
                .into_iter()
                .filter(|method| !prefs.is_selected(*method))
                .map(|method| (method.id().to_string(), built_in_to_list_item(method, prefs))),
        );
    }

    items.extend(
        prefs
            .custom_methods
            .iter()
            .map(|method| (method.name.clone(), custom_to_list_item(method))),
    );
    items
}

pub fn run_prefs(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let store = open_store(&db)?;
    let prefs = store.preferences();

    if as_json {
        println!("{}", serde_json::to_string_pretty(prefs)?);
        return Ok(());
    }

    println!("theme: {}", prefs.theme);
    println!("database: {}", db_path.display());
    println!(
        "selected: {}",
        prefs
            .selected_methods()
            .iter()
            .map(|method| method.id())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for (id, ratio) in &prefs.custom_ratios {
        println!(
            "ratio override: {id} {:.1}/{:.1}/{:.1}",
            ratio.mild, ratio.medium, ratio.bold
        );
    }
    for id in prefs.custom_notes.keys() {
        println!("notes override: {id}");
    }
    println!("custom methods: {}", prefs.custom_methods.len());
    Ok(())
}
