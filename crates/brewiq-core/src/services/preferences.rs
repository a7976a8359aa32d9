//! Preferences store: the owned preferences record plus write-through
//! persistence.

use crate::db::PreferencesRepository;
use crate::models::{
    BrewMethod, CustomMethodId, CustomRatio, Outcome, Theme, UserPreferences,
};
use crate::Result;

/// Owns the user's preferences and persists every applied edit.
///
/// Saves are best-effort: a failed write is logged and remembered, never
/// returned from the edit itself. Call [`PreferencesStore::retry_save`] to
/// try again and see the error.
pub struct PreferencesStore<R> {
    repo: R,
    prefs: UserPreferences,
    pending_save: bool,
}

impl<R: PreferencesRepository> PreferencesStore<R> {
    /// Load the stored record, creating and saving defaults when absent.
    ///
    /// Load failures are returned; only saving the fresh defaults is
    /// best-effort.
    pub fn open(repo: R) -> Result<Self> {
        if let Some(prefs) = repo.load()? {
            return Ok(Self {
                repo,
                prefs,
                pending_save: false,
            });
        }

        tracing::info!("No preferences record found, creating defaults");
        let mut store = Self {
            repo,
            prefs: UserPreferences::default(),
            pending_save: false,
        };
        store.persist();
        Ok(store)
    }

    pub const fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    /// Whether the last applied edit has not reached storage yet.
    pub const fn has_pending_save(&self) -> bool {
        self.pending_save
    }

    /// Re-attempt a failed save. No-op when nothing is pending.
    pub fn retry_save(&mut self) -> Result<()> {
        if !self.pending_save {
            return Ok(());
        }
        self.repo.save(&self.prefs)?;
        self.pending_save = false;
        tracing::info!("Saved preferences after retry");
        Ok(())
    }

    pub fn toggle_method(&mut self, method: BrewMethod) -> Outcome {
        let outcome = self.prefs.toggle_method(method);
        if outcome == Outcome::Unchanged {
            tracing::debug!("Selection full, ignoring {}", method);
        }
        self.commit(outcome)
    }

    /// Override a method's ratios from user-typed text.
    ///
    /// Rejected unless all three fields are finite positive numbers.
    pub fn set_custom_ratio(
        &mut self,
        method: BrewMethod,
        mild: &str,
        medium: &str,
        bold: &str,
    ) -> Outcome {
        let Some(ratio) = CustomRatio::parse(mild, medium, bold) else {
            return Outcome::Rejected;
        };
        let outcome = self.prefs.set_custom_ratio(method, ratio);
        self.commit(outcome)
    }

    pub fn clear_custom_ratio(&mut self, method: BrewMethod) -> Outcome {
        let outcome = self.prefs.clear_custom_ratio(method);
        self.commit(outcome)
    }

    pub fn set_custom_notes(&mut self, method: BrewMethod, notes: &str) -> Outcome {
        let outcome = self.prefs.set_custom_notes(method, notes);
        self.commit(outcome)
    }

    pub fn clear_custom_notes(&mut self, method: BrewMethod) -> Outcome {
        let outcome = self.prefs.clear_custom_notes(method);
        self.commit(outcome)
    }

    /// Add a custom method from form input. `None` when rejected.
    pub fn add_custom_method(
        &mut self,
        name: &str,
        icon: &str,
        mild: &str,
        medium: &str,
        bold: &str,
    ) -> Option<CustomMethodId> {
        let ratios = CustomRatio::parse(mild, medium, bold)?;
        let id = self.prefs.add_custom_method(name, icon, ratios)?;
        self.commit(Outcome::Applied);
        Some(id)
    }

    pub fn delete_custom_method(&mut self, id: CustomMethodId) -> Outcome {
        let outcome = self.prefs.delete_custom_method(id);
        self.commit(outcome)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Outcome {
        let outcome = self.prefs.set_theme(theme);
        self.commit(outcome)
    }

    fn commit(&mut self, outcome: Outcome) -> Outcome {
        if outcome.is_applied() {
            self.persist();
        }
        outcome
    }

    fn persist(&mut self) {
        match self.repo.save(&self.prefs) {
            Ok(()) => self.pending_save = false,
            Err(error) => {
                tracing::warn!("Failed to save preferences: {}", error);
                self.pending_save = true;
            }
        }
    }
}
