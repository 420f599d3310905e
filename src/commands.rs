use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::profile::{load_shared, save_shared, share, ProfileManager};
use crate::core::state::{default_working_directory, InstallDirSettings, LauncherConfig};
use crate::core::version::LibraryDescriptor;

/// Inspect and edit launcher profiles.
#[derive(Debug, Parser)]
#[command(name = "launcher-profiles", version)]
pub struct Cli {
    /// Game directory holding `launcher_profiles.json`. Defaults to the
    /// stored installation directory.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List profiles, marking the selected one.
    Profiles,
    /// Select a profile and save.
    Select { name: String },
    /// Select a user by id, or clear the selection when omitted.
    User { id: Option<String> },
    /// Describe a library descriptor read from a JSON file.
    Library { file: PathBuf },
    /// Change the stored installation directory.
    InstallDir { path: PathBuf },
}

pub async fn execute(cli: Cli) -> LauncherResult<()> {
    match cli.command {
        Command::Library { file } => describe_library(&file),
        Command::InstallDir { path } => {
            let dir = InstallDirSettings::default_location().change_dir(&path)?;
            println!("Installation directory: {}", dir.display());
            Ok(())
        }
        Command::Profiles => {
            let store = share(ProfileManager::new(resolve_config(cli.dir)?));
            load_shared(&store).await?;

            let mut manager = store.lock().await;
            let selected = manager.current_profile().name.clone();
            let mut names: Vec<&String> = manager.profiles().keys().collect();
            names.sort();
            for name in names {
                let marker = if *name == selected { "*" } else { " " };
                println!("{} {}", marker, name);
            }
            if let Some(user) = manager.selected_user() {
                println!("selected user: {}", user);
            }
            Ok(())
        }
        Command::Select { name } => {
            let store = share(ProfileManager::new(resolve_config(cli.dir)?));
            load_shared(&store).await?;
            {
                let mut manager = store.lock().await;
                if manager.profile(&name).is_none() {
                    return Err(LauncherError::ProfileNotFound(name));
                }
                manager.set_selected_profile(name.as_str());
            }
            save_shared(&store).await?;
            info!("Selected profile '{}'", name);
            Ok(())
        }
        Command::User { id } => {
            let store = share(ProfileManager::new(resolve_config(cli.dir)?));
            load_shared(&store).await?;
            store.lock().await.set_selected_user(id);
            save_shared(&store).await
        }
    }
}

fn resolve_config(dir: Option<PathBuf>) -> LauncherResult<LauncherConfig> {
    let working_directory = match dir {
        Some(dir) => dir,
        None => InstallDirSettings::default_location().load_or_init(&default_working_directory())?,
    };
    Ok(LauncherConfig::new(working_directory))
}

fn describe_library(file: &Path) -> LauncherResult<()> {
    let raw = std::fs::read_to_string(file).map_err(|source| LauncherError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    let library: LibraryDescriptor = serde_json::from_str(&raw)?;

    println!("name:      {}", library);
    println!("path:      {}", library.artifact_path(None)?);
    println!("url:       {}", library.download_url());
    println!("applies:   {}", library.applies_to_current_environment());
    if let Some(classifier) = library.native_classifier_for_current_os() {
        println!("native:    {}", library.artifact_path(Some(classifier.as_str()))?);
    }
    if let Some(extract) = library.extract_rules() {
        println!("exclude:   {}", extract.exclude.join(", "));
    }
    Ok(())
}
