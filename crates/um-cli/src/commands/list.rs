use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(content: Option<&Path>) -> miette::Result<()> {
    let library = super::load_library(content)?;

    if library.is_empty() {
        println!("  No characters found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Age", "Gender", "Scenarios", "Bio"]);

    for character in library.characters() {
        let scenarios = match character.overwhelm_scenario() {
            Some(_) => format!("{} + interlude", character.scenarios().len()),
            None => character.scenarios().len().to_string(),
        };
        let bio = if character.bio().is_empty() {
            "—".to_string()
        } else {
            super::truncate(character.bio(), 60)
        };
        table.add_row(vec![
            character.name().to_string(),
            character.age().to_string(),
            character.gender().to_string(),
            scenarios,
            bio,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} characters", library.len());

    Ok(())
}
