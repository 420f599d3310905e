use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Window size override for a launch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// What the launcher window does while the game runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LauncherVisibility {
    #[serde(rename = "close launcher when game starts")]
    CloseLauncher,
    #[serde(rename = "hide launcher and re-open when game closes")]
    HideLauncher,
    #[serde(rename = "keep the launcher open")]
    KeepLauncherOpen,
}

/// A named launch configuration, persisted under `profiles.<name>`.
///
/// Launch overrides are not interpreted by the store. Fields written by other
/// launcher versions are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_version_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_release_types: Option<Vec<String>>,
    /// Player identifier hint from older files. Folded into the store's
    /// selected user on decode and never written back.
    #[serde(
        default,
        rename = "playerUUID",
        skip_serializing_if = "Option::is_none"
    )]
    pub player_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_hopper_crash_service: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launcher_visibility_on_game_close: Option<LauncherVisibility>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
