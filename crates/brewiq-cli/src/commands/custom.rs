use std::path::Path;

use brewiq_core::models::{validate_custom_name, Outcome, MAX_CUSTOM_NAME_LEN};

use crate::commands::common::{
    custom_to_list_item, finish_edit, format_created_date, format_method_line, open_database,
    open_store, resolve_custom_method, short_id,
};
use crate::error::CliError;

pub fn run_custom_add(
    name: &str,
    icon: &str,
    [mild, medium, bold]: [&str; 3],
    db_path: &Path,
) -> Result<(), CliError> {
    if validate_custom_name(name).is_none() {
        return Err(CliError::InvalidInput(format!(
            "name must be 1 to {MAX_CUSTOM_NAME_LEN} characters"
        )));
    }

    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;
    let id = store
        .add_custom_method(name, icon, mild, medium, bold)
        .ok_or_else(|| CliError::InvalidInput("ratios must be positive numbers".to_string()))?;
    finish_edit(&mut store, Outcome::Applied, "", "", "")?;

    println!("{id}");
    Ok(())
}

pub fn run_custom_delete(query: &str, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut store = open_store(&db)?;
    let (id, name) = {
        let method = resolve_custom_method(query, store.preferences())?;
        (method.id, method.name.clone())
    };

    let outcome = store.delete_custom_method(id);
    println!(
        "{}",
        finish_edit(
            &mut store,
            outcome,
            &format!("Deleted {name} ({})", short_id(id)),
            &format!("{name} was already deleted"),
            "",
        )?
    );
    Ok(())
}

pub fn run_custom_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let store = open_store(&db)?;
    let methods = &store.preferences().custom_methods;

    if as_json {
        println!("{}", serde_json::to_string_pretty(methods)?);
        return Ok(());
    }

    for method in methods {
        println!(
            "{}  {}  {}",
            short_id(method.id),
            format_created_date(method.created_at),
            format_method_line(&custom_to_list_item(method), &method.name)
        );
    }
    Ok(())
}
