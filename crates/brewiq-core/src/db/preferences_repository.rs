//! Preferences repository implementation

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{CustomBrewMethod, CustomMethodId, CustomRatio, UserPreferences};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

/// Trait for preferences storage operations
pub trait PreferencesRepository {
    /// Load the preferences record, `None` when it was never saved
    fn load(&self) -> Result<Option<UserPreferences>>;

    /// Replace the stored record with `prefs`
    fn save(&self, prefs: &UserPreferences) -> Result<()>;
}

/// `SQLite` implementation of `PreferencesRepository`
pub struct SqlitePreferencesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqlitePreferencesRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn load_ratio_overrides(&self) -> Result<BTreeMap<String, CustomRatio>> {
        let mut stmt = self
            .conn
            .prepare("SELECT method, mild, medium, bold FROM ratio_overrides")?;
        let overrides = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    CustomRatio::new(row.get(1)?, row.get(2)?, row.get(3)?),
                ))
            })?
            .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
        Ok(overrides)
    }

    fn load_notes_overrides(&self) -> Result<BTreeMap<String, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT method, notes FROM notes_overrides")?;
        let overrides = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
        Ok(overrides)
    }

    fn load_custom_methods(&self) -> Result<Vec<CustomBrewMethod>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, icon, mild, medium, bold, created_at
             FROM custom_methods
             ORDER BY position ASC",
        )?;
        let methods = stmt
            .query_map([], Self::parse_custom_method)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(methods)
    }

    /// Parse a custom method from a database row
    ///
    /// An id that is not a UUID fails the load instead of being replaced.
    fn parse_custom_method(row: &rusqlite::Row<'_>) -> rusqlite::Result<CustomBrewMethod> {
        let id = row
            .get::<_, String>(0)?
            .parse::<CustomMethodId>()
            .map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(error))
            })?;
        Ok(CustomBrewMethod {
            id,
            name: row.get(1)?,
            icon: row.get(2)?,
            ratios: CustomRatio::new(row.get(3)?, row.get(4)?, row.get(5)?),
            created_at: row.get(6)?,
        })
    }
}

impl PreferencesRepository for SqlitePreferencesRepository<'_> {
    fn load(&self) -> Result<Option<UserPreferences>> {
        let row = self
            .conn
            .query_row(
                "SELECT selected_methods, theme FROM preferences WHERE id = 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        let Some((selected_json, theme)) = row else {
            return Ok(None);
        };

        Ok(Some(UserPreferences {
            selected_methods: serde_json::from_str(&selected_json)?,
            custom_ratios: self.load_ratio_overrides()?,
            custom_notes: self.load_notes_overrides()?,
            custom_methods: self.load_custom_methods()?,
            theme: theme.parse().unwrap_or_default(),
        }))
    }

    fn save(&self, prefs: &UserPreferences) -> Result<()> {
        let selected_json = serde_json::to_string(&prefs.selected_methods)?;
        let now = chrono::Utc::now().timestamp_millis();

        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO preferences (id, selected_methods, theme, updated_at)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 selected_methods = excluded.selected_methods,
                 theme = excluded.theme,
                 updated_at = excluded.updated_at",
            params![selected_json, prefs.theme.as_str(), now],
        )?;

        tx.execute("DELETE FROM ratio_overrides", [])?;
        for (method, ratio) in &prefs.custom_ratios {
            tx.execute(
                "INSERT INTO ratio_overrides (method, mild, medium, bold) VALUES (?, ?, ?, ?)",
                params![method, ratio.mild, ratio.medium, ratio.bold],
            )?;
        }

        tx.execute("DELETE FROM notes_overrides", [])?;
        for (method, notes) in &prefs.custom_notes {
            tx.execute(
                "INSERT INTO notes_overrides (method, notes) VALUES (?, ?)",
                params![method, notes],
            )?;
        }

        tx.execute("DELETE FROM custom_methods", [])?;
        for (position, method) in prefs.custom_methods.iter().enumerate() {
            tx.execute(
                "INSERT INTO custom_methods
                 (id, name, icon, mild, medium, bold, position, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    method.id.as_str(),
                    method.name,
                    method.icon,
                    method.ratios.mild,
                    method.ratios.medium,
                    method.ratios.bold,
                    i64::try_from(position).unwrap_or(i64::MAX),
                    method.created_at
                ],
            )?;
        }

        tx.commit()?;
        tracing::debug!(
            "Saved preferences ({} selected, {} custom methods)",
            prefs.selected_methods.len(),
            prefs.custom_methods.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{BrewMethod, Theme};
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_load_empty_store() {
        let db = setup();
        let repo = SqlitePreferencesRepository::new(db.connection());

        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_preferences() {
        let db = setup();
        let repo = SqlitePreferencesRepository::new(db.connection());

        let mut prefs = UserPreferences::default();
        prefs.toggle_method(BrewMethod::Chemex);
        prefs.set_custom_ratio(BrewMethod::FrenchPress, CustomRatio::new(18.0, 16.5, 14.0));
        prefs.set_custom_notes(BrewMethod::MokaPot, "Low heat, lid open");
        prefs.add_custom_method("Cold Brew", "leaf.fill", CustomRatio::new(8.0, 6.0, 4.0));
        prefs.add_custom_method("Turkish", "flame.fill", CustomRatio::new(12.0, 10.0, 9.0));
        prefs.set_theme(Theme::Dark);

        repo.save(&prefs).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_save_replaces_previous_record() {
        let db = setup();
        let repo = SqlitePreferencesRepository::new(db.connection());

        let mut prefs = UserPreferences::default();
        prefs.set_custom_ratio(BrewMethod::AeroPress, CustomRatio::new(16.0, 14.0, 12.0));
        let id = prefs
            .add_custom_method("Mine", "star.fill", CustomRatio::DEFAULT)
            .unwrap();
        repo.save(&prefs).unwrap();

        prefs.clear_custom_ratio(BrewMethod::AeroPress);
        prefs.delete_custom_method(id);
        repo.save(&prefs).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert!(loaded.custom_ratios.is_empty());
        assert!(loaded.custom_methods.is_empty());

        let rows: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM preferences", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_auto() {
        let db = setup();
        db.connection()
            .execute(
                "INSERT INTO preferences (id, selected_methods, theme, updated_at)
                 VALUES (1, '[\"Chemex\"]', 'Sepia', 0)",
                [],
            )
            .unwrap();

        let repo = SqlitePreferencesRepository::new(db.connection());
        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded.theme, Theme::Auto);
        assert_eq!(loaded.selected_methods(), vec![BrewMethod::Chemex]);
    }

    #[test]
    fn test_malformed_custom_method_id_fails_load() {
        let db = setup();
        let repo = SqlitePreferencesRepository::new(db.connection());
        let mut prefs = UserPreferences::default();
        prefs.add_custom_method("Cold Brew", "leaf.fill", CustomRatio::DEFAULT);
        repo.save(&prefs).unwrap();

        db.connection()
            .execute("UPDATE custom_methods SET id = 'garbage'", [])
            .unwrap();

        let error = repo.load().unwrap_err();
        assert!(
            matches!(
                error,
                crate::Error::Sqlite(rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _))
            ),
            "{error:?}"
        );
    }
}
