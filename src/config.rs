use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Number of programs drawn from the NST corpus when no size is given.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// File stem suffix that marks Norwegian subtitle files in the NST export.
pub const DEFAULT_LANGUAGE_SUFFIX: &str = "TTV";

/// Central configuration, passed explicitly to every store and loader.
///
/// The binary fills it from environment variables (a .env file is loaded
/// first via dotenvy). Library callers usually start from [`Config::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base directory that every relative artifact folder is resolved against.
    pub root_path: PathBuf,
    /// Directory holding the per-program NST CSV export.
    pub nst_path: PathBuf,
    pub sample_size: usize,
    /// Corpus files are kept only when their stem ends with this suffix.
    pub language_suffix: String,
}

impl Config {
    /// Configuration rooted at `root_path`, with the NST export expected at
    /// `<root>/../AMG-Data/NST/NST_csv`.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        let nst_path = root_path.join("..").join("AMG-Data").join("NST").join("NST_csv");
        Self {
            root_path,
            nst_path,
            sample_size: DEFAULT_SAMPLE_SIZE,
            language_suffix: DEFAULT_LANGUAGE_SUFFIX.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Everything has a default: the root is the current directory.
    pub fn load() -> Result<Self> {
        let root_path = match env::var("NSTMINE_ROOT") {
            Ok(root) => PathBuf::from(root),
            Err(_) => env::current_dir().context("Failed to resolve the current directory")?,
        };

        let mut config = Self::new(root_path);

        if let Ok(nst_path) = env::var("NSTMINE_NST_PATH") {
            config.nst_path = PathBuf::from(nst_path);
        }
        if let Ok(size) = env::var("NSTMINE_SAMPLE_SIZE") {
            config.sample_size = size
                .parse()
                .with_context(|| format!("NSTMINE_SAMPLE_SIZE must be an integer, got '{size}'"))?;
        }
        if let Ok(suffix) = env::var("NSTMINE_LANGUAGE_SUFFIX") {
            config.language_suffix = suffix;
        }

        Ok(config)
    }

    /// Resolve a folder relative to the root.
    pub fn folder(&self, relative_folder: &str) -> PathBuf {
        self.root_path.join(relative_folder)
    }

    /// Path of the flat text export for a bulk sample of `sample_size` programs.
    pub fn bulk_sample_path(&self, sample_size: usize) -> PathBuf {
        self.root_path
            .join("nst_sample")
            .join(format!("nst_{sample_size}_text.csv"))
    }

    /// Check that the NST export directory exists.
    /// Call this before any operation that scans the corpus.
    pub fn require_nst(&self) -> Result<()> {
        if !self.nst_path.is_dir() {
            anyhow::bail!(
                "NST files not found in {}\n\
                 Set NSTMINE_NST_PATH to the directory holding the NST CSV export.",
                self.nst_path.display()
            );
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_nst_path_from_root() {
        let config = Config::new("/work/project");
        assert_eq!(
            config.nst_path,
            PathBuf::from("/work/project/../AMG-Data/NST/NST_csv")
        );
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(config.language_suffix, "TTV");
    }

    #[test]
    fn bulk_sample_path_embeds_size() {
        let config = Config::new("/r");
        assert_eq!(
            config.bulk_sample_path(250),
            PathBuf::from("/r/nst_sample/nst_250_text.csv")
        );
    }
}
