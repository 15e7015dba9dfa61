use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use wraptrail_core::LevelConfig;

/// Level parameters shared by every subcommand.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct LevelArgs {
    /// TOML file providing level parameters; flags override its values.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
    /// Number of grid columns.
    #[arg(long)]
    pub(crate) width: Option<u32>,
    /// Number of grid rows.
    #[arg(long)]
    pub(crate) height: Option<u32>,
    /// Desired number of path steps.
    #[arg(long = "length")]
    pub(crate) target_length: Option<u32>,
    /// Number of walks attempted before keeping the longest.
    #[arg(long)]
    pub(crate) attempts: Option<u32>,
    /// Seed for reproducible levels.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

impl LevelArgs {
    /// Loads the configuration file, if any, and applies flag overrides.
    pub(crate) fn resolve(&self) -> Result<LevelConfig> {
        let base = match &self.config {
            Some(path) => {
                let contents = fs::read_to_string(path).with_context(|| {
                    format!("failed to read level config at {}", path.display())
                })?;
                parse_config(&contents).with_context(|| {
                    format!("failed to parse level config at {}", path.display())
                })?
            }
            None => LevelConfig::default(),
        };

        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, config: LevelConfig) -> LevelConfig {
        LevelConfig {
            width: self.width.unwrap_or(config.width),
            height: self.height.unwrap_or(config.height),
            target_length: self.target_length.unwrap_or(config.target_length),
            attempts: self.attempts.unwrap_or(config.attempts),
            seed: self.seed.or(config.seed),
        }
    }
}

fn parse_config(contents: &str) -> Result<LevelConfig> {
    toml::from_str(contents).context("failed to parse level config toml contents")
}
