use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use miette::IntoDiagnostic;
use um_core::Attribute;
use um_engine::{EngineConfig, simulate};

pub fn run(
    content: Option<&Path>,
    name: &str,
    config: &EngineConfig,
    runs: usize,
    seed: u64,
    json: bool,
) -> miette::Result<()> {
    let character = super::load_character(content, name)?;
    let report = simulate(&character, config, runs, seed).into_diagnostic()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).into_diagnostic()?
        );
        return Ok(());
    }

    println!(
        "  {} '{}' {}",
        "Simulation".bold(),
        report.character,
        format!("({runs} runs, seed={seed})").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Attribute", "Mean", "Min", "Max"]);
    for attribute in Attribute::ALL {
        table.add_row(vec![
            attribute.to_string(),
            format!("{:.1}", report.mean.get(&attribute).copied().unwrap_or_default()),
            report.min.get(&attribute).copied().unwrap_or_default().to_string(),
            report.max.get(&attribute).copied().unwrap_or_default().to_string(),
        ]);
    }
    println!("{table}");
    println!();

    println!(
        "  Overwhelmed in {} of {} runs ({:.1} interludes per run)",
        report.overwhelmed_runs, report.runs, report.mean_overwhelm
    );
    if !report.grades.is_empty() {
        let grades: Vec<String> = report
            .grades
            .iter()
            .map(|(grade, count)| format!("{grade}: {count}"))
            .collect();
        println!("  Reputation grades: {}", grades.join(", "));
    }

    Ok(())
}
