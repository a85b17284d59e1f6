#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// Fixture source tree rooted in a temporary directory; removed on drop.
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("failed to create source tree")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    // Writes `root/<rel>` with placeholder contents, creating parents.
    pub fn file(&self, rel: &str) -> Result<PathBuf> {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, format!("contents of {rel}"))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn dir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.root().join(rel);
        fs::create_dir_all(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
pub fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)?;
    Ok(())
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        anyhow::bail!(
            "{:?} exited with {:?}\nstdout:\n{}\nstderr:\n{}",
            cmd.get_program(),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

// Clears the configuration variables so the host environment cannot leak
// into a spawned binary.
pub fn isolated(bin: &str) -> Command {
    let mut cmd = Command::new(bin);
    cmd.env_remove("CASCADE_SOURCE_ROOT")
        .env_remove("CASCADE_CATALOG_PATH")
        .env_remove("CASCADE_STORE_ROOT")
        .env_remove("RUST_LOG");
    cmd
}
