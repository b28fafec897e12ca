pub mod check;
pub mod list;
pub mod play;
pub mod run;
pub mod show;
pub mod simulate;

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use miette::IntoDiagnostic;
use um_content::{HookRegistry, Library};
use um_core::{AttributeStore, Character};
use um_engine::ReputationGrade;

/// Load the library from a content file, or the built-in characters.
fn load_library(content: Option<&Path>) -> miette::Result<Library> {
    match content {
        Some(path) => Library::from_file(path, &HookRegistry::new()).into_diagnostic(),
        None => Library::builtin().into_diagnostic(),
    }
}

/// Load the library and resolve a character by name.
fn load_character(content: Option<&Path>, name: &str) -> miette::Result<Arc<Character>> {
    load_library(content)?.resolve(name).into_diagnostic()
}

/// One-line attribute display for the play HUD and run output.
fn hud(store: &AttributeStore) -> String {
    let grade = ReputationGrade::from_reputation(store.reputation());
    format!(
        "{} {} | {} {} ({}) | {} {}",
        "stress".dimmed(),
        store.stress(),
        "reputation".dimmed(),
        grade.to_string().bold(),
        store.reputation(),
        "performance".dimmed(),
        store.performance()
    )
}

/// Shorten text to `max` characters, adding an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 10), "abcdefg...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }
}
