//! Small helpers shared by both pipelines.

use std::fs::{self, Permissions};
use std::io;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;

/// Write `path` through a staging file in the same directory, renamed into
/// place only after `fill` succeeds. A failed write leaves no file at `path`.
///
/// The staging file takes the mode of the file it replaces, or the mode a
/// plain `File::create` would give a new file.
pub fn write_atomically<F, E>(path: &Path, fill: F) -> Result<(), E>
where
    F: FnOnce(&NamedTempFile) -> Result<(), E>,
    E: From<io::Error>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".").suffix(".part");
    if let Some(mode) = existing.clone().or_else(new_file_permissions) {
        builder.permissions(mode);
    }
    let staged = builder.tempfile_in(dir)?;

    fill(&staged)?;
    if let Some(mode) = existing {
        // Exact mode of the replaced file, not the umask-filtered one.
        staged.as_file().set_permissions(mode)?;
    }
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    // Filtered by the umask at open time, same as `File::create`.
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Compact run time for the closing summary: `850ms`, `4.2s`, `3m07s`, `1h02m05s`.
pub fn elapsed_label(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    match (hours, minutes) {
        (0, 0) if total == 0 => format!("{}ms", elapsed.as_millis()),
        (0, 0) => format!("{:.1}s", elapsed.as_secs_f64()),
        (0, _) => format!("{}m{:02}s", minutes, seconds),
        _ => format!("{}h{:02}m{:02}s", hours, minutes, seconds),
    }
}
