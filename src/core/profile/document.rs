// ─── Profile Document ───
// Wire form of `launcher_profiles.json` and the defaulting applied when it is
// read back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::model::Profile;
use crate::core::auth::AuthenticationDatabase;

pub const PROFILE_FILE_NAME: &str = "launcher_profiles.json";

/// Format stamp written into every saved document.
pub const FORMAT_NAME: &str = "1.5.2";
pub const FORMAT_NUMBER: u32 = 17;

/// `launcherVersion` block of the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LauncherVersion {
    pub name: String,
    pub format: u32,
}

impl LauncherVersion {
    pub fn current() -> Self {
        Self {
            name: FORMAT_NAME.into(),
            format: FORMAT_NUMBER,
        }
    }
}

/// Normalised contents of a profile document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDocument {
    pub profiles: HashMap<String, Profile>,
    pub selected_profile: Option<String>,
    pub selected_user: Option<String>,
    pub client_token: Uuid,
    pub authentication_database: AuthenticationDatabase,
}

/// Result of decoding, with facts about what the file itself contained.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub document: ProfileDocument,
    /// Whether `clientToken` was present rather than generated.
    pub client_token_on_disk: bool,
    pub launcher_version: Option<LauncherVersion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfileDocument {
    profiles: Option<HashMap<String, Profile>>,
    selected_profile: Option<String>,
    selected_user: Option<String>,
    client_token: Option<Uuid>,
    authentication_database: Option<AuthenticationDatabase>,
    launcher_version: Option<LauncherVersion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodedDocument<'a> {
    profiles: &'a HashMap<String, Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_profile: Option<&'a str>,
    client_token: Uuid,
    authentication_database: &'a AuthenticationDatabase,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_user: Option<&'a str>,
    launcher_version: LauncherVersion,
}

impl ProfileDocument {
    pub fn empty(client_token: Uuid) -> Self {
        Self {
            profiles: HashMap::new(),
            selected_profile: None,
            selected_user: None,
            client_token,
            authentication_database: AuthenticationDatabase::new(),
        }
    }

    /// Parse a document, filling in whatever it lacks.
    ///
    /// Missing profiles, selection and auth records default to empty; a
    /// missing client token is generated. A missing `selectedUser` is taken
    /// from the selected profile's `playerUUID`, else from any known user.
    /// Every profile's `playerUUID` is cleared afterwards.
    pub fn decode(raw: &str) -> serde_json::Result<DecodedDocument> {
        let raw: RawProfileDocument = serde_json::from_str(raw)?;

        let mut profiles = raw.profiles.unwrap_or_default();
        for (key, profile) in profiles.iter_mut() {
            if profile.name.is_empty() {
                profile.name = key.clone();
            }
        }

        let client_token_on_disk = raw.client_token.is_some();
        let client_token = raw.client_token.unwrap_or_else(Uuid::new_v4);
        let authentication_database = raw.authentication_database.unwrap_or_default();
        let selected_profile = raw.selected_profile;

        let selected_user = match raw.selected_user {
            Some(user) => Some(user),
            None => {
                let hinted = selected_profile
                    .as_ref()
                    .and_then(|name| profiles.get(name))
                    .and_then(|profile| profile.player_uuid.clone());
                match hinted {
                    Some(user) => {
                        debug!("Selected user taken from profile player hint");
                        Some(user)
                    }
                    None => authentication_database.known_uuids().next().map(str::to_string),
                }
            }
        };

        for profile in profiles.values_mut() {
            profile.player_uuid = None;
        }

        Ok(DecodedDocument {
            document: ProfileDocument {
                profiles,
                selected_profile,
                selected_user,
                client_token,
                authentication_database,
            },
            client_token_on_disk,
            launcher_version: raw.launcher_version,
        })
    }

    /// Pretty JSON stamped with the current format version.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&EncodedDocument {
            profiles: &self.profiles,
            selected_profile: self.selected_profile.as_deref(),
            client_token: self.client_token,
            authentication_database: &self.authentication_database,
            selected_user: self.selected_user.as_deref(),
            launcher_version: LauncherVersion::current(),
        })
    }
}
