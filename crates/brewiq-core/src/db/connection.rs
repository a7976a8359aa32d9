//! Database connection management

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::{migrations, PreferencesRepository, SqlitePreferencesRepository};

/// Database wrapper for the local `SQLite` store
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open a database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let database = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        database.configure()?;
        database.migrate()?;
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let database = Self { conn, path: None };
        database.configure()?;
        database.migrate()?;
        Ok(database)
    }

    /// Open the store, resetting it once if it cannot be initialized.
    ///
    /// The store counts as broken when the file cannot be opened or migrated,
    /// or when the saved preferences record cannot be decoded. On the first
    /// failure the database file is moved aside (and its journal sidecars
    /// removed) before a single retry. A second failure is returned to the
    /// caller, which should abort startup.
    pub fn open_or_reset(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::open_checked(path) {
            Ok(db) => Ok(db),
            Err(error) => {
                tracing::warn!(
                    "Failed to open preferences store at {}: {}. Resetting and retrying once.",
                    path.display(),
                    error
                );
                quarantine_db_files(path)?;
                Self::open_checked(path)
            }
        }
    }

    /// Open and make sure the preferences record reads back.
    fn open_checked(path: &Path) -> Result<Self> {
        let database = Self::open(path)?;
        SqlitePreferencesRepository::new(&database.conn).load()?;
        Ok(database)
    }

    fn configure(&self) -> Result<()> {
        // journal_mode reports the resulting mode; in-memory stores stay "memory"
        self.conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .ok();
        self.conn.pragma_update(None, "synchronous", "NORMAL").ok();
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn)
    }

    /// Filesystem location, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Move a broken database file aside and drop its `-wal`/`-shm`/`-journal`
/// sidecars.
fn quarantine_db_files(db_path: &Path) -> Result<()> {
    let Some(base_name) = db_path.file_name().and_then(|name| name.to_str()) else {
        return Err(Error::Database(format!(
            "cannot reset store without a file name: {}",
            db_path.display()
        )));
    };

    if db_path.exists() {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let backup_path = db_path.with_file_name(format!("{base_name}.corrupt-{timestamp}"));
        std::fs::rename(db_path, &backup_path)?;
        tracing::warn!(
            "Moved unreadable preferences store from {} to {}",
            db_path.display(),
            backup_path.display()
        );
    }

    let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    let sidecar_prefix = format!("{base_name}-");

    for entry in std::fs::read_dir(parent)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if file_name.to_string_lossy().starts_with(&sidecar_prefix) {
            let path = entry.path();
            std::fs::remove_file(&path)?;
            tracing::warn!("Removed stale store file {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrewMethod, CustomRatio, UserPreferences};
    use crate::services::PreferencesStore;
    use tempfile::tempdir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.path().is_none());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("brewiq.db");

        let db = Database::open(&db_path).unwrap();
        assert_eq!(db.path(), Some(db_path.as_path()));
        assert!(db_path.exists());
    }

    #[test]
    fn test_open_or_reset_recovers_from_garbage_file() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("brewiq.db");
        std::fs::write(&db_path, "not an sqlite database ".repeat(400)).unwrap();

        assert!(Database::open(&db_path).is_err());

        let db = Database::open_or_reset(&db_path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM preferences", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);

        assert_quarantined(tmp.path());
    }

    fn assert_quarantined(dir: &Path) {
        let quarantined = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .any(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("brewiq.db.corrupt-")
            });
        assert!(quarantined);
    }

    fn seeded_store(db_path: &Path) {
        let db = Database::open(db_path).unwrap();
        let mut prefs = UserPreferences::default();
        prefs.set_custom_ratio(BrewMethod::Chemex, CustomRatio::new(18.0, 17.0, 16.0));
        SqlitePreferencesRepository::new(db.connection())
            .save(&prefs)
            .unwrap();
    }

    #[test]
    fn test_open_or_reset_recovers_from_undecodable_selection() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("brewiq.db");
        seeded_store(&db_path);
        Database::open(&db_path)
            .unwrap()
            .connection()
            .execute("UPDATE preferences SET selected_methods = 'not json'", [])
            .unwrap();

        let db = Database::open_or_reset(&db_path).unwrap();
        let repo = SqlitePreferencesRepository::new(db.connection());
        assert!(repo.load().unwrap().is_none());
        assert_quarantined(tmp.path());

        let store = PreferencesStore::open(repo).unwrap();
        assert_eq!(store.preferences(), &UserPreferences::default());
    }

    #[test]
    fn test_open_or_reset_recovers_from_text_in_ratio_column() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("brewiq.db");
        seeded_store(&db_path);
        Database::open(&db_path)
            .unwrap()
            .connection()
            .execute("UPDATE ratio_overrides SET mild = 'strong'", [])
            .unwrap();

        let db = Database::open_or_reset(&db_path).unwrap();
        let loaded = SqlitePreferencesRepository::new(db.connection())
            .load()
            .unwrap();
        assert!(loaded.is_none());
        assert_quarantined(tmp.path());
    }

    #[test]
    fn test_open_or_reset_keeps_readable_store() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("brewiq.db");
        seeded_store(&db_path);

        let db = Database::open_or_reset(&db_path).unwrap();
        let loaded = SqlitePreferencesRepository::new(db.connection())
            .load()
            .unwrap()
            .unwrap();
        assert_eq!(
            loaded.custom_ratio(BrewMethod::Chemex),
            Some(&CustomRatio::new(18.0, 17.0, 16.0))
        );
    }
}
