// ─── Shared Store ───
// Serialised access to a profile manager from async code. File work runs on
// the blocking pool while the store's lock is held.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::manager::{LoadOutcome, ProfileManager};
use crate::core::error::{LauncherError, LauncherResult};

pub type SharedProfileManager = Arc<Mutex<ProfileManager>>;

pub fn share(manager: ProfileManager) -> SharedProfileManager {
    Arc::new(Mutex::new(manager))
}

pub async fn load_shared(store: &SharedProfileManager) -> LauncherResult<LoadOutcome> {
    let mut guard = Arc::clone(store).lock_owned().await;
    tokio::task::spawn_blocking(move || guard.load())
        .await
        .map_err(|e| LauncherError::Other(format!("Task join error: {}", e)))?
}

pub async fn save_shared(store: &SharedProfileManager) -> LauncherResult<()> {
    let mut guard = Arc::clone(store).lock_owned().await;
    tokio::task::spawn_blocking(move || guard.save())
        .await
        .map_err(|e| LauncherError::Other(format!("Task join error: {}", e)))?
}
