use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use brewiq_core::db::{Database, PreferencesRepository, SqlitePreferencesRepository};
use brewiq_core::models::{CustomBrewMethod, CustomMethodId, Outcome};
use brewiq_core::services::PreferencesStore;
use brewiq_core::{BrewMethod, BrewStrength, UserPreferences};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CliError;

pub type Store<'a> = PreferencesStore<SqlitePreferencesRepository<'a>>;

#[derive(Debug, Serialize)]
pub struct MethodListItem {
    pub id: String,
    pub kind: &'static str,
    pub icon: String,
    pub selected: bool,
    pub customized: bool,
    pub mild: f64,
    pub medium: f64,
    pub bold: f64,
    pub brew_time_secs: Option<u64>,
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("BREWIQ_DB_PATH").map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path().ok_or(CliError::NoDataDir)
}

pub fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("brewiq").join("brewiq.db"))
}

/// Open the local store, resetting it once when it is unreadable.
pub fn open_database(path: &Path) -> Result<Database, CliError> {
    Database::open_or_reset(path).map_err(|error| CliError::DatabaseInit(error.to_string()))
}

pub fn open_store(db: &Database) -> Result<Store<'_>, CliError> {
    Ok(PreferencesStore::open(SqlitePreferencesRepository::new(
        db.connection(),
    ))?)
}

/// Turn an edit outcome into a user-facing message.
///
/// A save that failed during the edit gets one more attempt here; the CLI
/// exits right after, so a lost write must surface as an error.
pub fn finish_edit<R: PreferencesRepository>(
    store: &mut PreferencesStore<R>,
    outcome: Outcome,
    applied: &str,
    unchanged: &str,
    rejected: &str,
) -> Result<String, CliError> {
    match outcome {
        Outcome::Applied => {
            store.retry_save()?;
            Ok(applied.to_string())
        }
        Outcome::Unchanged => Ok(unchanged.to_string()),
        Outcome::Rejected => Err(CliError::InvalidInput(rejected.to_string())),
    }
}

/// Find a custom method by full id, unique id prefix, or name.
pub fn resolve_custom_method<'p>(
    query: &str,
    prefs: &'p UserPreferences,
) -> Result<&'p CustomBrewMethod, CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::InvalidInput(
            "custom method id cannot be empty".to_string(),
        ));
    }

    if let Ok(id) = query.parse::<CustomMethodId>() {
        if let Some(method) = prefs.custom_method(id) {
            return Ok(method);
        }
    }

    let mut matches = prefs
        .custom_methods
        .iter()
        .filter(|method| method.id.as_str().starts_with(query))
        .collect::<Vec<_>>();
    if matches.is_empty() {
        matches = prefs
            .custom_methods
            .iter()
            .filter(|method| method.name.eq_ignore_ascii_case(query))
            .collect();
    }

    match matches.as_slice() {
        [] => Err(CliError::CustomMethodNotFound(query.to_string())),
        [method] => Ok(method),
        _ => {
            let options = matches
                .iter()
                .take(3)
                .map(|method| short_id(method.id))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousCustomMethod(format!(
                "'{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn short_id(id: CustomMethodId) -> String {
    id.as_str().chars().take(13).collect()
}

pub fn built_in_to_list_item(method: BrewMethod, prefs: &UserPreferences) -> MethodListItem {
    MethodListItem {
        id: method.id().to_string(),
        kind: "built-in",
        icon: method.icon().to_string(),
        selected: prefs.is_selected(method),
        customized: prefs.has_customization(method),
        mild: prefs.effective_ratio(method, BrewStrength::Mild),
        medium: prefs.effective_ratio(method, BrewStrength::Medium),
        bold: prefs.effective_ratio(method, BrewStrength::Bold),
        brew_time_secs: Some(method.default_brew_time().as_secs()),
    }
}

pub fn custom_to_list_item(method: &CustomBrewMethod) -> MethodListItem {
    MethodListItem {
        id: method.id.as_str(),
        kind: "custom",
        icon: method.icon.clone(),
        selected: true,
        customized: false,
        mild: method.ratios.mild,
        medium: method.ratios.medium,
        bold: method.ratios.bold,
        brew_time_secs: None,
    }
}

pub fn format_method_line(item: &MethodListItem, name: &str) -> String {
    let marker = match (item.selected, item.customized) {
        (true, true) => "*+",
        (true, false) => "* ",
        (false, true) => " +",
        (false, false) => "  ",
    };
    let brew_time = item
        .brew_time_secs
        .map_or_else(String::new, |secs| format_duration(Duration::from_secs(secs)));
    format!(
        "{marker} {name:<16} {:>6} {:>6} {:>6}  {brew_time}",
        format_ratio_value(item.mild),
        format_ratio_value(item.medium),
        format_ratio_value(item.bold),
    )
}

fn format_ratio_value(ratio: f64) -> String {
    format!("{:.1}", brewiq_core::calculator::round_one_decimal(ratio))
}

pub fn format_created_date(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map_or_else(|| "unknown".to_string(), |date| date.format("%Y-%m-%d").to_string())
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Join trailing CLI words into one notes string.
pub fn join_words(parts: &[String]) -> String {
    parts.join(" ")
}
