use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::constants::WAV_EXTENSION;

/// True when the path ends in `.wav`, ignoring case.
pub fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(WAV_EXTENSION))
        .unwrap_or(false)
}

/// Fails unless the path names a regular file that can be opened for reading.
pub fn ensure_readable_file(path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        ));
    }
    fs::File::open(path)?;
    Ok(())
}

/// True when writing `output` would overwrite `input`, however either path
/// is spelled. The output does not have to exist yet.
pub fn is_same_file(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), resolve_output(output)) {
        (Ok(input), Some(output)) => input == output,
        _ => input == output,
    }
}

/// Canonical form of a path that may not exist: its canonical parent
/// joined with its file name.
fn resolve_output(path: &Path) -> Option<PathBuf> {
    if let Ok(existing) = fs::canonicalize(path) {
        return Some(existing);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|dir| dir.join(name))
}
