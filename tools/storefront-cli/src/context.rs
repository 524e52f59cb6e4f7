//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::checkout::Locale;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the config was read from: `--config`, or the nearest match.
    pub config_path: Option<PathBuf>,
    /// Language for checkout messages.
    pub locale: Locale,
}

impl Context {
    /// Load context from config file.
    ///
    /// `locale` overrides the language set in the config.
    pub fn load(config_path: Option<&str>, locale: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            let found = find_config_file(&cwd);
            let config = found
                .as_deref()
                .and_then(|path| CliConfig::load(path.to_str()?).ok())
                .unwrap_or_default();
            (config, found)
        };

        let locale = locale
            .map(Locale::from_code)
            .unwrap_or_else(|| config.locale());

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            locale,
        })
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
