//! The `carryquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("carryquiz.toml");
    if path.exists() {
        println!("carryquiz.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created carryquiz.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit carryquiz.toml to pick digits, problem count and operation");
    println!("  2. Run: carryquiz practice");
    println!("  3. Or print a worksheet: carryquiz generate --format json --output sheet.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# carryquiz configuration

# Maximum digits per operand.
max_digits = 2

# Problems per round.
num_problems = 10

# "add", "subtract" or "mixed".
operation = "mixed"

# Only keep problems that need a carry (addition) or a borrow (subtraction).
force_carry = false

# Say right away whether each answer was correct.
feedback = true

# Show right/wrong marks and the running score on the review screen.
show_results_in_review = true
"#;
