use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::core::profile::document::PROFILE_FILE_NAME;

/// Everything a `ProfileManager` needs from its host launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Directory holding `launcher_profiles.json`.
    pub working_directory: PathBuf,
    /// Proxy URL handed to network collaborators; unused by the store itself.
    pub proxy: Option<String>,
    /// Launcher-wide identity. Generated when absent.
    pub client_token: Option<Uuid>,
}

impl LauncherConfig {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
            proxy: None,
            client_token: None,
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_client_token(mut self, token: Uuid) -> Self {
        self.client_token = Some(token);
        self
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn profile_file(&self) -> PathBuf {
        self.working_directory.join(PROFILE_FILE_NAME)
    }
}

/// Conventional game directory for the current platform.
pub fn default_working_directory() -> PathBuf {
    if cfg!(target_os = "windows") {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("minecraft")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    }
}
