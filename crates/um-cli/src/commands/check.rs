use std::path::Path;

use colored::Colorize;
use um_content::lint_character;

pub fn run(content: Option<&Path>) -> miette::Result<()> {
    let library = super::load_library(content)?;

    let mut warnings = 0;
    for character in library.characters() {
        for issue in lint_character(character) {
            eprintln!("  {}", issue.to_string().yellow());
            warnings += 1;
        }
    }

    let scenarios: usize = library
        .characters()
        .iter()
        .map(|c| c.scenarios().len() + usize::from(c.overwhelm_scenario().is_some()))
        .sum();

    if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" }
        );
    }
    println!("  All checks passed.");
    println!("  {} characters, {} scenarios", library.len(), scenarios);

    Ok(())
}
