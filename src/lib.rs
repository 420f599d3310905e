mod commands;
pub mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use crate::core::error::{LauncherError, LauncherResult};
pub use crate::core::profile::{LoadOutcome, Profile, ProfileManager, DEFAULT_PROFILE_NAME};
pub use crate::core::state::LauncherConfig;
pub use crate::core::version::{CompatibilityRule, LibraryDescriptor, OperatingSystem};

use crate::commands::Cli;

pub async fn run() -> LauncherResult<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,launcher_profiles=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("launcher-profiles starting: {:?}", cli);
    commands::execute(cli).await
}
