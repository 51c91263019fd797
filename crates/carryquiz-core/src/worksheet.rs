//! Worksheets: a generated batch with the settings that produced it.
//!
//! A worksheet can be written out as JSON, filled in by hand (setting each
//! problem's `user_answer`) and read back for grading.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generator::generate;
use crate::model::{Configuration, Operator, Problem};
use crate::scoring::BatchSummary;
use crate::source::NumberSource;

/// A batch of problems plus how it was made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    /// When the batch was generated.
    pub generated_at: DateTime<Utc>,
    /// Settings used for generation.
    pub config: Configuration,
    /// Seed of the random generator, if one was given.
    #[serde(default)]
    pub seed: Option<u64>,
    /// The problems, answers possibly filled in.
    pub problems: Vec<Problem>,
}

impl Worksheet {
    /// Generate a fresh worksheet.
    pub fn generate<S: NumberSource + ?Sized>(
        config: Configuration,
        seed: Option<u64>,
        source: &mut S,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            config,
            seed,
            problems: generate(&config, source),
        }
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_problems(&self.problems)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize worksheet")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let worksheet: Worksheet =
            serde_json::from_str(json).context("failed to parse worksheet JSON")?;
        worksheet.check()?;
        Ok(worksheet)
    }

    /// Save the worksheet as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write worksheet to {}", path.display()))?;
        Ok(())
    }

    /// Load a worksheet from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read worksheet from {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("invalid worksheet: {}", path.display()))
    }

    /// Reject hand-edited files whose answers no longer match their operands.
    fn check(&self) -> Result<()> {
        for p in &self.problems {
            let expected = match p.operator {
                Operator::Add => p.operand1.checked_add(p.operand2),
                Operator::Subtract => p.operand1.checked_sub(p.operand2),
            };
            anyhow::ensure!(
                expected == Some(p.correct_answer()),
                "problem {} ({}) has correct_answer {}",
                p.id,
                p.expression(),
                p.correct_answer()
            );
        }
        Ok(())
    }
}
