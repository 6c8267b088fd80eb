use anyhow::Result;
use std::path::{Path, PathBuf};

/// File the summary is saved to, relative to the current directory
pub const DEFAULT_OUTPUT_FILE: &str = "COMPLETE_PACKAGE_SUMMARY.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    pub output_path: PathBuf,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl EmitterConfig {
    /// Build a config from an optional `--output` value, falling back to the default file
    pub fn with_output(output: Option<&str>) -> Self {
        match output {
            Some(path) => Self {
                output_path: Self::expand_tilde(path),
            },
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_path.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }

        if self.output_path.is_dir() {
            anyhow::bail!(
                "Output path is a directory: {}",
                self.output_path.display()
            );
        }

        Ok(())
    }

    /// Directory the output file lives in
    pub fn output_dir(&self) -> &Path {
        parent_dir(&self.output_path)
    }

    pub fn expand_tilde(path: &str) -> PathBuf {
        if let Some(stripped) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(path)
    }
}

/// Directory holding `path`. A bare file name resolves to the current directory.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = EmitterConfig::default();
        assert_eq!(config.output_path, PathBuf::from("COMPLETE_PACKAGE_SUMMARY.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_output_override() {
        let config = EmitterConfig::with_output(Some("/tmp/summary.txt"));
        assert_eq!(config.output_path, PathBuf::from("/tmp/summary.txt"));

        let config = EmitterConfig::with_output(None);
        assert_eq!(config, EmitterConfig::default());
    }

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().unwrap();
        let expanded = EmitterConfig::expand_tilde("~/test");
        assert_eq!(expanded, home.join("test"));

        let no_tilde = EmitterConfig::expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_output_dir() {
        let config = EmitterConfig::default();
        assert_eq!(config.output_dir(), Path::new("."));

        let config = EmitterConfig::with_output(Some("out/summary.txt"));
        assert_eq!(config.output_dir(), Path::new("out"));
    }

    #[test]
    fn test_invalid_config_validation() {
        let config = EmitterConfig {
            output_path: PathBuf::new(),
        };
        assert!(config.validate().is_err());

        let temp_dir = TempDir::new().unwrap();
        let config = EmitterConfig {
            output_path: temp_dir.path().to_path_buf(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }
}
