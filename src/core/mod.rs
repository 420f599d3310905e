// ─── Launcher Profiles Core ───
// Persistent profile store and library descriptor model.
//
// Architecture:
//   core/
//     version/  OS facts, compatibility rules, library descriptors
//     profile/  Profile model, document codec, store, change events
//     auth/     Authentication records keyed by user id
//     state/    Launcher config + install directory settings
//     hopper/   Crash report messages (transport supplied by host)
//     fs        Atomic file writes

pub mod auth;
pub mod error;
pub mod fs;
pub mod hopper;
pub mod profile;
pub mod state;
pub mod version;
