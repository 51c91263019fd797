//! Settings file and command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use carryquiz_core::model::{Configuration, OperationType};

/// Contents of `carryquiz.toml`. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Digits per operand.
    #[serde(default = "default_max_digits")]
    pub max_digits: u32,
    /// Problems per batch.
    #[serde(default = "default_num_problems")]
    pub num_problems: usize,
    /// `add`, `subtract` or `mixed`.
    #[serde(default)]
    pub operation: OperationType,
    /// Only keep problems that need a carry or borrow.
    #[serde(default)]
    pub force_carry: bool,
    /// Say right away whether each answer was correct.
    #[serde(default = "default_true")]
    pub feedback: bool,
    /// Show right/wrong marks and the running score while reviewing.
    #[serde(default = "default_true")]
    pub show_results_in_review: bool,
}

fn default_max_digits() -> u32 {
    2
}
fn default_num_problems() -> usize {
    10
}
fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            max_digits: default_max_digits(),
            num_problems: default_num_problems(),
            operation: OperationType::default(),
            force_carry: false,
            feedback: true,
            show_results_in_review: true,
        }
    }
}

/// Flags shared by every command that generates problems.
#[derive(Debug, Clone, Default, Args)]
pub struct QuizArgs {
    /// Maximum digits per operand (1-5 is sensible)
    #[arg(long)]
    pub digits: Option<u32>,

    /// Number of problems
    #[arg(long)]
    pub problems: Option<usize>,

    /// Operation: add, subtract, mixed
    #[arg(long)]
    pub operation: Option<OperationType>,

    /// Only generate problems that need a carry or borrow
    #[arg(long)]
    pub force_carry: bool,

    /// Seed for reproducible problems
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl QuizArgs {
    /// Load the config file and apply the flags on top of it.
    pub fn resolve(&self) -> Result<QuizConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(digits) = self.digits {
            config.max_digits = digits;
        }
        if let Some(problems) = self.problems {
            config.num_problems = problems;
        }
        if let Some(operation) = self.operation {
            config.operation = operation;
        }
        if self.force_carry {
            config.force_carry = true;
        }
        Ok(config)
    }
}

impl QuizConfig {
    /// The validated session configuration.
    pub fn configuration(&self) -> Result<Configuration> {
        let configuration = Configuration {
            max_digits: self.max_digits,
            num_problems: self.num_problems,
            operation_type: self.operation,
            force_carry: self.force_carry,
        };
        configuration.validate()?;
        Ok(configuration)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `carryquiz.toml` in the current directory
/// 2. `~/.config/carryquiz/config.toml`
///
/// With nothing found the defaults apply.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("carryquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("carryquiz"))
}
