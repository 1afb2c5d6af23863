// src/utils/io.rs
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Get the application data directory, falling back to `./data`
pub fn get_app_data_dir() -> PathBuf {
    match directories::ProjectDirs::from("com", "passtool", "passtool") {
        Some(proj_dirs) => proj_dirs.data_dir().to_path_buf(),
        None => {
            log::warn!("Could not determine data directory, using ./data");
            PathBuf::from("./data")
        }
    }
}

// Directory a file lives in; "" for bare file names means the working directory
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Create the parent directory of `path` if it doesn't exist
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let parent = parent_dir(path);
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Replace the contents of `path` with `contents`.
///
/// Writes to a temp file in the same directory and renames it over the target,
/// so readers see either the old or the new file, never a partial one.
pub fn write_replace(path: &Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent_dir(path))?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
