pub mod config;
pub mod settings;

pub use config::{default_working_directory, LauncherConfig};
pub use settings::InstallDirSettings;
