use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::{debug, info};

use crate::assets::{content_digest, summary_digest, summary_text};
use crate::config::{parent_dir, EmitterConfig};

pub const CREATED_MESSAGE: &str = "✅ All 4 documents created successfully!";
pub const SAVED_MESSAGE: &str = "✅ Summary saved!";

/// Prints the package summary and saves an identical copy to disk
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitterConfig,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Write the summary to `out`, persist it, then write the confirmation lines.
    ///
    /// The file is replaced through a temp file in the same directory, so a
    /// failed run leaves the previous target (or nothing) in place.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        self.config.validate()?;

        let text = summary_text();
        writeln!(out, "{}", text).context("Failed to print summary")?;
        out.flush().context("Failed to flush summary output")?;

        self.persist(text)?;
        self.verify(text)?;

        writeln!(out).context("Failed to print confirmation")?;
        writeln!(out, "{}", CREATED_MESSAGE).context("Failed to print confirmation")?;
        writeln!(out, "{}", SAVED_MESSAGE).context("Failed to print confirmation")?;
        out.flush().context("Failed to flush confirmation output")?;

        Ok(())
    }

    /// Path the summary lands at. A symlinked target resolves to the file it names.
    fn resolve_target(&self) -> Result<PathBuf> {
        let path = self.output_path();
        let is_link = fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link {
            return Ok(path.to_path_buf());
        }

        match fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            // Dangling link: create the file it points at
            Err(_) => {
                let link = fs::read_link(path)
                    .with_context(|| format!("Failed to read symlink: {}", path.display()))?;
                Ok(self.config.output_dir().join(link))
            }
        }
    }

    fn persist(&self, text: &str) -> Result<()> {
        let path = self.resolve_target()?;
        let dir = parent_dir(&path);
        debug!(path = %path.display(), dir = %dir.display(), "saving summary");

        // An existing target keeps its mode; a new one gets 0666 minus the umask
        let existing = fs::metadata(&path).ok().map(|meta| meta.permissions());
        let mut builder = Builder::new();
        builder.prefix(".summary");
        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            if existing.is_none() {
                builder.permissions(Permissions::from_mode(0o666));
            }
        }

        // Dropping the guard on any early return removes the temp file
        let mut temp = builder
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;

        temp.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write summary to: {}", temp.path().display()))?;
        temp.flush()
            .with_context(|| format!("Failed to flush summary to: {}", temp.path().display()))?;

        if let Some(permissions) = existing {
            temp.as_file()
                .set_permissions(permissions)
                .with_context(|| {
                    format!(
                        "Failed to set permissions on: {}",
                        temp.path().display()
                    )
                })?;
        }

        temp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to sync summary to: {}", temp.path().display()))?;

        temp.persist(&path)
            .with_context(|| format!("Failed to save summary file: {}", path.display()))?;

        info!(path = %path.display(), bytes = text.len(), "summary saved");
        Ok(())
    }

    fn verify(&self, text: &str) -> Result<()> {
        let path = self.output_path();
        let written = fs::read(path)
            .with_context(|| format!("Failed to read back summary file: {}", path.display()))?;

        let expected = summary_digest();
        let actual = content_digest(&written);
        debug!(%expected, %actual, "verifying saved summary");

        if actual != expected || written.len() != text.len() {
            anyhow::bail!(
                "Saved summary does not match: {} (expected {}, found {})",
                path.display(),
                expected,
                actual
            );
        }

        Ok(())
    }
}
