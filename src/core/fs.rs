use std::path::Path;

use uuid::Uuid;

use crate::core::error::{LauncherError, LauncherResult};

/// Writes text using a temp file + rename so readers never observe partial data.
pub fn write_text_atomic(path: &Path, content: &str) -> LauncherResult<()> {
    if path.as_os_str().is_empty() {
        return Err(LauncherError::InvalidArgument(
            "destination path cannot be empty".into(),
        ));
    }
    if path.is_dir() {
        return Err(LauncherError::InvalidArgument(format!(
            "destination path {:?} is a directory",
            path
        )));
    }

    let parent_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    create_dir_safe(parent_dir)?;

    let temp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document"),
        std::process::id(),
        Uuid::new_v4().simple()
    );
    let temp_path = parent_dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|source| LauncherError::Io {
        path: temp_path.clone(),
        source,
    })?;

    if let Err(source) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(LauncherError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

pub fn create_dir_safe(path: &Path) -> LauncherResult<()> {
    std::fs::create_dir_all(path).map_err(|source| LauncherError::Io {
        path: path.to_path_buf(),
        source,
    })
}
