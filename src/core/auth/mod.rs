use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Cached session material for one user.
///
/// Only the identity fields are interpreted; everything else written by a
/// login collaborator is carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoredCredentials {
    pub fn new(username: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            uuid: Some(uuid.into()),
            ..Self::default()
        }
    }
}

/// User identifier → cached credentials.
///
/// Lookup order of `known_uuids` follows the underlying hash map and is not
/// stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AuthenticationDatabase {
    entries: HashMap<String, StoredCredentials>,
}

impl AuthenticationDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn known_uuids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.entries.contains_key(uuid)
    }

    pub fn get(&self, uuid: &str) -> Option<&StoredCredentials> {
        self.entries.get(uuid)
    }

    /// Find a user by login name or display name.
    pub fn by_name(&self, name: &str) -> Option<(&str, &StoredCredentials)> {
        self.entries
            .iter()
            .find(|(_, creds)| {
                creds.username.as_deref() == Some(name)
                    || creds.display_name.as_deref() == Some(name)
            })
            .map(|(uuid, creds)| (uuid.as_str(), creds))
    }

    /// Register or replace the credentials of a user.
    pub fn register(
        &mut self,
        uuid: impl Into<String>,
        credentials: StoredCredentials,
    ) -> Option<StoredCredentials> {
        self.entries.insert(uuid.into(), credentials)
    }

    pub fn remove(&mut self, uuid: &str) -> Option<StoredCredentials> {
        self.entries.remove(uuid)
    }
}
