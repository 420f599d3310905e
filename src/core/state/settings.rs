use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::fs::{create_dir_safe, write_text_atomic};

const APP_DIR_NAME: &str = "launcher-profiles";
const SETTINGS_FILE: &str = "launcher_install.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstallDirRecord {
    installation_dir: PathBuf,
}

/// Remembers which directory the launcher installs the game into.
#[derive(Debug, Clone)]
pub struct InstallDirSettings {
    settings_path: PathBuf,
}

impl InstallDirSettings {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
        }
    }

    /// Settings file in the per-user data directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(APP_DIR_NAME).join(SETTINGS_FILE))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// The stored installation directory, or `default_dir` persisted as the
    /// new setting when nothing usable is stored. The directory is created.
    pub fn load_or_init(&self, default_dir: &Path) -> LauncherResult<PathBuf> {
        let dir = match self.read_stored()? {
            Some(dir) => dir,
            None => {
                self.store(default_dir)?;
                default_dir.to_path_buf()
            }
        };

        create_dir_safe(&dir)?;
        Ok(dir)
    }

    /// Persist a new installation directory. Content of the previous one is
    /// left in place.
    pub fn change_dir(&self, dir: &Path) -> LauncherResult<PathBuf> {
        self.store(dir)?;
        create_dir_safe(dir)?;
        info!("Installation directory set to {:?}", dir);
        Ok(dir.to_path_buf())
    }

    fn read_stored(&self) -> LauncherResult<Option<PathBuf>> {
        if !self.settings_path.is_file() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.settings_path).map_err(|source| {
            LauncherError::Io {
                path: self.settings_path.clone(),
                source,
            }
        })?;

        match serde_json::from_str::<InstallDirRecord>(&raw) {
            Ok(record) => Ok(Some(record.installation_dir)),
            Err(e) => {
                warn!("Ignoring unreadable install settings {:?}: {}", self.settings_path, e);
                Ok(None)
            }
        }
    }

    fn store(&self, dir: &Path) -> LauncherResult<()> {
        let record = InstallDirRecord {
            installation_dir: dir.to_path_buf(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        write_text_atomic(&self.settings_path, &json)
    }
}
