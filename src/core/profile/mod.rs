pub mod document;
pub mod events;
pub mod manager;
pub mod model;
pub mod shared;

pub use document::{DecodedDocument, LauncherVersion, ProfileDocument, PROFILE_FILE_NAME};
pub use events::{Listener, ListenerList};
pub use manager::{LoadOutcome, ProfileManager, StorePhase, DEFAULT_PROFILE_NAME};
pub use model::{LauncherVisibility, Profile, Resolution};
pub use shared::{load_shared, save_shared, share, SharedProfileManager};
