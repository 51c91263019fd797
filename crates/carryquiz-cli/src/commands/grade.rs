//! The `carryquiz grade` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use carryquiz_core::scoring::{is_correct, BatchSummary};
use carryquiz_core::worksheet::Worksheet;

/// Grading outcome of a worksheet, as printed with `--format json`.
#[derive(Debug, Serialize)]
struct GradeReport {
    score: String,
    message: &'static str,
    summary: BatchSummary,
    problems: Vec<GradedProblem>,
}

#[derive(Debug, Serialize)]
struct GradedProblem {
    id: usize,
    expression: String,
    user_answer: Option<String>,
    correct_answer: u64,
    correct: bool,
    marked_for_review: bool,
}

impl GradeReport {
    fn new(worksheet: &Worksheet) -> Self {
        let summary = worksheet.summary();
        Self {
            score: summary.score(),
            message: summary.encouragement().message(),
            summary,
            problems: worksheet
                .problems
                .iter()
                .map(|p| GradedProblem {
                    id: p.id,
                    expression: p.expression(),
                    user_answer: p.user_answer.clone(),
                    correct_answer: p.correct_answer(),
                    correct: is_correct(p),
                    marked_for_review: p.marked_for_review,
                })
                .collect(),
        }
    }
}

pub fn execute(worksheet_path: PathBuf, format: String) -> Result<()> {
    let worksheet = Worksheet::load_json(&worksheet_path)?;
    let report = GradeReport::new(&worksheet);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_table(&report),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
    Ok(())
}

fn print_table(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Problem", "Answer", "Expected", "Result"]);

    for p in &report.problems {
        let answer = p
            .user_answer
            .as_deref()
            .map(|a| a.chars().filter(|c| !c.is_whitespace()).collect::<String>())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "-".to_string());
        let mark = if p.marked_for_review { " *" } else { "" };
        table.add_row(vec![
            Cell::new(format!("{}{mark}", p.id + 1)),
            Cell::new(&p.expression),
            Cell::new(answer),
            Cell::new(p.correct_answer),
            Cell::new(if p.correct { "OK" } else { "WRONG" }),
        ]);
    }

    println!("{table}");
    println!(
        "\nScore: {} / 10 ({} of {} correct, {} answered)",
        report.score,
        report.summary.correct_count,
        report.summary.total_count,
        report.summary.answered_count
    );
    println!("{}", report.message);
}
