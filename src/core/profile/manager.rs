use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::document::ProfileDocument;
use super::events::{Listener, ListenerList};
use super::model::Profile;
use crate::core::auth::AuthenticationDatabase;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::fs::write_text_atomic;
use crate::core::state::LauncherConfig;

/// Name of the profile created when none can be selected.
pub const DEFAULT_PROFILE_NAME: &str = "(Default)";

/// Outcome of [`ProfileManager::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No profile file existed; the registry is empty.
    NoPriorState,
    Loaded,
}

/// Lifecycle of the in-memory state relative to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Unloaded,
    Loaded,
    /// Mutated since the last load or save.
    Dirty,
}

/// Owns the profile registry, the selected profile and user, and the
/// authentication records backing `launcher_profiles.json`.
///
/// Observers are notified with the manager itself when the profile set or the
/// selected user changes.
#[derive(Debug)]
pub struct ProfileManager {
    config: LauncherConfig,
    profile_file: PathBuf,
    client_token: Uuid,
    profiles: HashMap<String, Profile>,
    selected_profile: Option<String>,
    selected_user: Option<String>,
    auth_database: AuthenticationDatabase,
    phase: StorePhase,
    refreshed_listeners: ListenerList<ProfileManager>,
    user_changed_listeners: ListenerList<ProfileManager>,
}

impl ProfileManager {
    pub fn new(config: LauncherConfig) -> Self {
        let profile_file = config.profile_file();
        let client_token = config.client_token.unwrap_or_else(Uuid::new_v4);

        Self {
            config,
            profile_file,
            client_token,
            profiles: HashMap::new(),
            selected_profile: None,
            selected_user: None,
            auth_database: AuthenticationDatabase::new(),
            phase: StorePhase::Unloaded,
            refreshed_listeners: ListenerList::new("profiles refreshed"),
            user_changed_listeners: ListenerList::new("user changed"),
        }
    }

    // ── Persistence ─────────────────────────────────────

    /// Replace the in-memory state with the contents of the profile file.
    ///
    /// Both events fire whether or not a file existed. A client token stored
    /// in the file replaces the current one.
    pub fn load(&mut self) -> LauncherResult<LoadOutcome> {
        self.profiles.clear();
        self.selected_profile = None;
        self.selected_user = None;
        // Stays unloaded if reading or parsing fails below.
        self.phase = StorePhase::Unloaded;

        if !self.profile_file.is_file() {
            info!("No profile file at {:?}; starting empty", self.profile_file);
            self.phase = StorePhase::Loaded;
            self.fire_refresh_event();
            self.fire_user_changed_event();
            return Ok(LoadOutcome::NoPriorState);
        }

        let raw = std::fs::read_to_string(&self.profile_file).map_err(|source| {
            LauncherError::Io {
                path: self.profile_file.clone(),
                source,
            }
        })?;
        let decoded = ProfileDocument::decode(&raw).map_err(|source| {
            LauncherError::DocumentParse {
                path: self.profile_file.clone(),
                source,
            }
        })?;

        if decoded.client_token_on_disk {
            self.client_token = decoded.document.client_token;
        }

        let document = decoded.document;
        self.profiles = document.profiles;
        self.selected_profile = document.selected_profile;
        self.selected_user = document.selected_user;
        self.auth_database = document.authentication_database;
        self.phase = StorePhase::Loaded;

        info!(
            "Loaded {} profiles from {:?}",
            self.profiles.len(),
            self.profile_file
        );

        self.fire_refresh_event();
        self.fire_user_changed_event();
        Ok(LoadOutcome::Loaded)
    }

    /// Write the current state, resolving the selected profile first.
    pub fn save(&mut self) -> LauncherResult<()> {
        let selected = self.resolve_selected_profile();
        let document = ProfileDocument {
            profiles: self.profiles.clone(),
            selected_profile: Some(selected),
            selected_user: self.selected_user.clone(),
            client_token: self.client_token,
            authentication_database: self.auth_database.clone(),
        };

        let json = document.encode()?;
        write_text_atomic(&self.profile_file, &json)?;
        self.phase = StorePhase::Loaded;

        info!(
            "Saved {} profiles to {:?}",
            self.profiles.len(),
            self.profile_file
        );
        Ok(())
    }

    // ── Selection ───────────────────────────────────────

    /// The selected profile, re-deriving the selection when it is unset or
    /// stale: the default-named profile, else any profile, else a newly
    /// created default profile.
    pub fn current_profile(&mut self) -> &Profile {
        self.current_profile_mut()
    }

    pub fn current_profile_mut(&mut self) -> &mut Profile {
        let name = self.resolve_selected_profile();
        self.profiles
            .entry(name)
            .or_insert_with_key(|key| Profile::new(key.clone()))
    }

    /// Name of the selected profile as stored, without defaulting.
    pub fn selected_profile_name(&self) -> Option<&str> {
        self.selected_profile.as_deref()
    }

    pub fn set_selected_profile(&mut self, name: impl Into<String>) {
        let name = name.into();
        let changed = self.selected_profile.as_deref() != Some(name.as_str());
        self.selected_profile = Some(name);

        if changed {
            self.mark_dirty();
            self.fire_refresh_event();
        }
    }

    pub fn selected_user(&self) -> Option<&str> {
        self.selected_user.as_deref()
    }

    /// Select a user, or clear the selection with `None`.
    pub fn set_selected_user(&mut self, user: Option<String>) {
        if self.selected_user == user {
            return;
        }
        self.selected_user = user;
        self.mark_dirty();
        self.fire_user_changed_event();
    }

    fn resolve_selected_profile(&mut self) -> String {
        if let Some(name) = &self.selected_profile {
            if self.profiles.contains_key(name) {
                return name.clone();
            }
        }

        let any_existing = self.profiles.keys().next().cloned();
        let name = if self.profiles.contains_key(DEFAULT_PROFILE_NAME) {
            DEFAULT_PROFILE_NAME.to_string()
        } else if let Some(name) = any_existing {
            name
        } else {
            debug!("Registry empty; creating '{}'", DEFAULT_PROFILE_NAME);
            self.profiles.insert(
                DEFAULT_PROFILE_NAME.to_string(),
                Profile::new(DEFAULT_PROFILE_NAME),
            );
            self.mark_dirty();
            DEFAULT_PROFILE_NAME.to_string()
        };

        debug!(
            "Selected profile {:?} resolved to '{}'",
            self.selected_profile, name
        );
        self.selected_profile = Some(name.clone());
        name
    }

    // ── Registry editing ────────────────────────────────

    pub fn profiles(&self) -> &HashMap<String, Profile> {
        &self.profiles
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn profile_mut(&mut self, name: &str) -> Option<&mut Profile> {
        let profile = self.profiles.get_mut(name)?;
        self.phase = StorePhase::Dirty;
        Some(profile)
    }

    /// Add or replace a profile under its own name.
    pub fn insert_profile(&mut self, profile: Profile) -> Option<Profile> {
        self.mark_dirty();
        self.profiles.insert(profile.name.clone(), profile)
    }

    /// Remove a profile. A selection pointing at it is left stale and is
    /// re-derived on the next [`current_profile`](Self::current_profile).
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        let removed = self.profiles.remove(name);
        if removed.is_some() {
            self.mark_dirty();
        }
        removed
    }

    /// Rename a profile, carrying the selection along with it.
    pub fn rename_profile(&mut self, old_name: &str, new_name: &str) -> LauncherResult<()> {
        if old_name == new_name {
            return Ok(());
        }
        if self.profiles.contains_key(new_name) {
            return Err(LauncherError::ProfileAlreadyExists(new_name.to_string()));
        }
        let mut profile = self
            .profiles
            .remove(old_name)
            .ok_or_else(|| LauncherError::ProfileNotFound(old_name.to_string()))?;

        profile.name = new_name.to_string();
        self.profiles.insert(new_name.to_string(), profile);
        if self.selected_profile.as_deref() == Some(old_name) {
            self.selected_profile = Some(new_name.to_string());
        }
        self.mark_dirty();
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────

    pub fn auth_database(&self) -> &AuthenticationDatabase {
        &self.auth_database
    }

    pub fn auth_database_mut(&mut self) -> &mut AuthenticationDatabase {
        self.mark_dirty();
        &mut self.auth_database
    }

    pub fn client_token(&self) -> Uuid {
        self.client_token
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn profile_file(&self) -> &Path {
        &self.profile_file
    }

    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    pub fn is_dirty(&self) -> bool {
        self.phase == StorePhase::Dirty
    }

    fn mark_dirty(&mut self) {
        self.phase = StorePhase::Dirty;
    }

    // ── Notification ────────────────────────────────────

    pub fn add_refreshed_profiles_listener<F>(&self, listener: F)
    where
        F: Fn(&ProfileManager) + Send + Sync + 'static,
    {
        let listener: Listener<ProfileManager> = Arc::new(listener);
        self.refreshed_listeners.add(listener);
    }

    pub fn add_user_changed_listener<F>(&self, listener: F)
    where
        F: Fn(&ProfileManager) + Send + Sync + 'static,
    {
        let listener: Listener<ProfileManager> = Arc::new(listener);
        self.user_changed_listeners.add(listener);
    }

    pub fn fire_refresh_event(&self) {
        self.refreshed_listeners.fire(self);
    }

    pub fn fire_user_changed_event(&self) {
        self.user_changed_listeners.fire(self);
    }
}
