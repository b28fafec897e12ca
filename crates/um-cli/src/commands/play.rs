use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use miette::IntoDiagnostic;
use um_engine::{EngineConfig, StoryEngine, StoryState};

pub fn run(content: Option<&Path>, name: &str, config: EngineConfig) -> miette::Result<()> {
    let character = super::load_character(content, name)?;
    let mut engine = StoryEngine::new(config);
    engine.select_character(character).into_diagnostic()?;

    if let Some(character) = engine.character() {
        println!("  {} {}", "Playing".bold(), character.name());
        println!("  Type a response number, or 'quit' to exit.\n");
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        match engine.state() {
            StoryState::NotStarted => break,
            StoryState::Ended => {
                if let Some(summary) = engine.summary() {
                    println!("  {}", "The End".bold());
                    for text in summary.to_string().lines() {
                        println!("  {text}");
                    }
                }
                break;
            }
            StoryState::ShowingResult(_) => {
                if let Some(result) = engine.shown_result() {
                    println!("  {}\n", result.exposition);
                    if let Some(info) = result.info {
                        println!("  {} {}\n", "info:".cyan().bold(), info.cyan());
                    }
                }
                print!("  {} ", "[enter to continue]".dimmed());
            }
            StoryState::AwaitingChoice(_) | StoryState::Overwhelmed(_) => {
                if let Some(view) = engine.scenario_view() {
                    if view.overwhelm {
                        println!("  {}", "You are overwhelmed.".red().bold());
                    } else {
                        println!("  {}", format!("Scenario {}", view.index + 1).bold());
                    }
                    println!("  {}\n", view.exposition);
                    for (i, response) in view.responses.iter().enumerate() {
                        match &response.availability.reason {
                            None => println!("  {}. {}", i + 1, response.label),
                            Some(reason) => println!(
                                "  {}",
                                format!("{}. {} ({reason})", i + 1, response.label).dimmed()
                            ),
                        }
                    }
                }
                if let Some(store) = engine.attributes() {
                    println!("\n  {}", super::hud(store));
                }
                print!("> ");
            }
        }
        io::stdout().flush().into_diagnostic()?;

        line.clear();
        if reader.read_line(&mut line).into_diagnostic()? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }
        println!();

        let outcome = if engine.state().accepts_choice() {
            match input.parse::<usize>() {
                Ok(n) if n > 0 => engine.choose_index(n - 1),
                _ => {
                    println!("  {}\n", "Enter a response number.".yellow());
                    continue;
                }
            }
        } else {
            engine.continue_from_result()
        };

        if let Err(e) = outcome {
            println!("  {}\n", e.to_string().yellow());
        }
    }

    Ok(())
}
