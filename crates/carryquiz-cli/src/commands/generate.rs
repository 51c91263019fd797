//! The `carryquiz generate` command.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};

use carryquiz_core::worksheet::Worksheet;

use crate::commands::rng_from_seed;
use crate::config::QuizArgs;

pub fn execute(args: QuizArgs, format: String, output: Option<PathBuf>) -> Result<()> {
    let configuration = args.resolve()?.configuration()?;
    let mut rng = rng_from_seed(args.seed);
    let worksheet = Worksheet::generate(configuration, args.seed, &mut rng);
    tracing::info!(
        problems = worksheet.problems.len(),
        seed = ?args.seed,
        "generated worksheet"
    );

    let rendered = match format.as_str() {
        "json" => worksheet.to_json()?,
        "text" => render_text(&worksheet)?,
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Worksheet saved to: {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Printable worksheet: one problem per line with a blank to fill in.
fn render_text(worksheet: &Worksheet) -> Result<String, fmt::Error> {
    let config = &worksheet.config;
    let digits = config.max_digits as usize;
    let blank = "_".repeat(config.answer_width());

    let mut out = String::new();
    writeln!(
        out,
        "Worksheet: {} problems, up to {} digits, {}{}",
        worksheet.problems.len(),
        config.max_digits,
        config.operation_type,
        if config.force_carry {
            ", carry/borrow"
        } else {
            ""
        }
    )?;
    if let Some(seed) = worksheet.seed {
        writeln!(out, "Seed: {seed}")?;
    }
    writeln!(out)?;
    for p in &worksheet.problems {
        writeln!(
            out,
            "{:>3}. {:>digits$} {} {:>digits$} = {blank}",
            p.id + 1,
            p.operand1,
            p.operator,
            p.operand2
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carryquiz_core::model::{Configuration, OperationType};
    use carryquiz_core::source::ScriptedSource;

    #[test]
    fn text_layout() {
        let config = Configuration {
            max_digits: 2,
            num_problems: 2,
            operation_type: OperationType::Subtract,
            force_carry: true,
        };
        let worksheet = Worksheet::generate(config, Some(3), &mut ScriptedSource::new(vec![38, 62]));
        let text = render_text(&worksheet).unwrap();
        assert!(text.starts_with(
            "Worksheet: 2 problems, up to 2 digits, subtract, carry/borrow\nSeed: 3\n\n"
        ));
        assert!(text.contains("  1. 62 - 38 = ___\n"), "{text}");
        assert!(text.contains("  2. 62 - 38 = ___\n"), "{text}");
    }

    #[test]
    fn single_digit_operands_are_right_aligned() {
        let config = Configuration {
            max_digits: 1,
            num_problems: 1,
            operation_type: OperationType::Add,
            force_carry: false,
        };
        let worksheet = Worksheet::generate(config, None, &mut ScriptedSource::new(vec![7, 5]));
        let text = render_text(&worksheet).unwrap();
        assert!(!text.contains("Seed"));
        assert!(text.contains("  1. 7 + 5 = __\n"), "{text}");
    }
}
