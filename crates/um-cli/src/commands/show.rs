use std::path::Path;

use colored::Colorize;
use um_engine::EngineConfig;

pub fn run(content: Option<&Path>, name: &str, config: &EngineConfig) -> miette::Result<()> {
    let character = super::load_character(content, name)?;

    println!(
        "  {} {}",
        character.name().bold(),
        format!("({}, {})", character.age(), character.gender()).dimmed()
    );
    println!();
    if !character.bio().is_empty() {
        println!("  {}", character.bio());
        println!();
    }

    let threshold = character
        .overwhelm_threshold()
        .unwrap_or(config.overwhelm_threshold);
    println!("  start:     {}", character.start());
    println!("  threshold: {threshold}");
    println!("  icon:      {}", character.icon());
    println!();

    if character.scenarios().is_empty() {
        println!("  {}", "(no storyline yet)".dimmed());
        return Ok(());
    }

    println!("  {}", "Storyline".bold().underline());
    for (i, scenario) in character.scenarios().iter().enumerate() {
        println!(
            "  {:>2}. {} {}",
            i + 1,
            format!("[{}]", scenario.theme()).dimmed(),
            super::truncate(scenario.exposition(), 70)
        );
        for response in scenario.responses() {
            let gated = if response.condition().is_always() {
                String::new()
            } else {
                " (conditional)".dimmed().to_string()
            };
            println!("        - {}{gated}", response.button_text());
        }
    }

    if let Some(interlude) = character.overwhelm_scenario() {
        println!();
        println!("  {}", "Overwhelm interlude".bold().underline());
        println!("      {}", super::truncate(interlude.exposition(), 70));
        for response in interlude.responses() {
            println!("        - {}", response.button_text());
        }
    }

    Ok(())
}
