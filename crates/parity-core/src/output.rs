//! Writing reports and the CI script to disk.
//!
//! Parent directories are created on demand. Any failure is returned as an
//! [`OutputError`] and the run stops. Commands that produce several files
//! go through [`write_all`], which removes its earlier files on failure.

use crate::error::OutputError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Mode applied to generated shell scripts
pub const SCRIPT_MODE: u32 = 0o755;

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                OutputError::CreateDirFailed(parent.display().to_string(), e.to_string())
            })?;
        }
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), OutputError> {
    let write_failed = |e: std::io::Error| OutputError::WriteFailed(path.display().to_string(), e.to_string());
    let mut f = fs::File::create(path).map_err(write_failed)?;
    f.write_all(content.as_bytes()).map_err(write_failed)?;
    f.flush().map_err(write_failed)?;
    Ok(())
}

/// Write a markdown report, replacing any previous one.
pub fn write_report(path: &Path, content: &str) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    write_file(path, content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote report");
    Ok(())
}

/// Write a script and mark it executable.
pub fn write_executable(path: &Path, content: &str) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    write_file(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE)).map_err(|e| {
            OutputError::PermissionsFailed(path.display().to_string(), e.to_string())
        })?;
    }

    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote executable script");
    Ok(())
}

/// One file produced by a command.
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    pub path: &'a Path,
    pub content: &'a str,
    /// Written with [`write_executable`] instead of [`write_report`]
    pub executable: bool,
}

impl<'a> Artifact<'a> {
    pub fn report(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            content,
            executable: false,
        }
    }

    pub fn script(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            content,
            executable: true,
        }
    }

    fn write(&self) -> Result<(), OutputError> {
        if self.executable {
            write_executable(self.path, self.content)
        } else {
            write_report(self.path, self.content)
        }
    }
}

/// Write every artifact in order, or none of them: when one write fails,
/// the files already written by this call are removed before the error is
/// returned.
pub fn write_all(artifacts: &[Artifact<'_>]) -> Result<(), OutputError> {
    for (done, artifact) in artifacts.iter().enumerate() {
        if let Err(err) = artifact.write() {
            for written in &artifacts[..done] {
                if let Err(rm) = fs::remove_file(written.path) {
                    tracing::warn!(path = %written.path.display(), error = %rm, "Failed to roll back output");
                } else {
                    tracing::debug!(path = %written.path.display(), "Rolled back output");
                }
            }
            return Err(err);
        }
    }
    Ok(())
}
