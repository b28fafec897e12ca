use std::path::Path;

use colored::Colorize;
use miette::{IntoDiagnostic, miette};
use serde_json::json;
use tracing::warn;
use um_engine::{EngineConfig, StoryEngine, StoryState};

pub fn run(
    content: Option<&Path>,
    name: &str,
    config: EngineConfig,
    choices: &[usize],
    json: bool,
    markdown: bool,
) -> miette::Result<()> {
    let character = super::load_character(content, name)?;
    let mut engine = StoryEngine::new(config.with_history(true));
    engine.select_character(character).into_diagnostic()?;

    let mut remaining = choices.iter().copied();
    let mut step = 0;

    while !engine.is_ended() {
        if matches!(engine.state(), StoryState::ShowingResult(_)) {
            engine.continue_from_result().into_diagnostic()?;
            continue;
        }

        let (index, overwhelm) = engine
            .scenario_view()
            .map(|view| (view.index, view.overwhelm))
            .unwrap_or_default();
        let choice = remaining.next().ok_or_else(|| {
            miette!(
                "ran out of choices at scenario {} after {step} choices",
                index + 1
            )
        })?;
        if choice == 0 {
            return Err(miette!("response numbers start at 1"));
        }
        engine.choose_index(choice - 1).into_diagnostic()?;
        step += 1;

        if !json && !markdown {
            let label = engine
                .history()
                .and_then(|h| h.choices().last().map(|s| s.to_string()))
                .unwrap_or_default();
            let place = if overwhelm {
                "overwhelmed".red().to_string()
            } else {
                format!("scenario {}", index + 1)
            };
            if let Some(store) = engine.attributes() {
                println!("  {place}: {label}");
                println!("    {}", super::hud(store));
            }
        }
    }

    let unused = remaining.count();
    if unused > 0 {
        warn!(unused, "story ended before all choices were used");
    }

    let summary = engine
        .summary()
        .ok_or_else(|| miette!("no run to summarize"))?;

    if json {
        let output = json!({
            "summary": summary,
            "history": engine.history(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else if markdown {
        if let Some(history) = engine.history() {
            print!("{}", history.export_markdown(&summary.character));
        }
    } else {
        println!();
        for line in summary.to_string().lines() {
            println!("  {line}");
        }
    }

    Ok(())
}
