//! The set of playable characters and name lookup.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use strsim::jaro_winkler;
use tracing::info;
use um_core::{Character, CharacterId};

use crate::build::{load_characters, load_file};
use crate::error::{LoadError, LoadResult};
use crate::hooks::HookRegistry;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Minimum similarity score for suggestions.
const SUGGEST_THRESHOLD: f64 = 0.6;

const BUILTIN: &str = include_str!("../content/characters.json");

/// An ordered collection of characters with unique names.
#[derive(Debug, Clone, Default)]
pub struct Library {
    characters: Vec<Arc<Character>>,
}

impl Library {
    /// Create a library, rejecting duplicate names (case-insensitive).
    pub fn new(characters: Vec<Character>) -> LoadResult<Self> {
        let mut seen = HashSet::new();
        for character in &characters {
            if !seen.insert(character.name().to_lowercase()) {
                return Err(LoadError::DuplicateCharacter(character.name().to_string()));
            }
        }
        Ok(Self {
            characters: characters.into_iter().map(Arc::new).collect(),
        })
    }

    /// The characters that ship with the game.
    pub fn builtin() -> LoadResult<Self> {
        let library = Self::new(load_characters(BUILTIN, &HookRegistry::new())?)?;
        info!(characters = library.len(), "loaded built-in library");
        Ok(library)
    }

    /// Load a library from a content file.
    pub fn from_file(path: &Path, hooks: &HookRegistry) -> LoadResult<Self> {
        let library = Self::new(load_file(path, hooks)?)?;
        info!(path = %path.display(), characters = library.len(), "loaded library");
        Ok(library)
    }

    /// All characters in authored order.
    pub fn characters(&self) -> &[Arc<Character>] {
        &self.characters
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if the library has no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Look up a character by ID.
    pub fn get(&self, id: CharacterId) -> Option<&Arc<Character>> {
        self.characters.iter().find(|c| c.id() == id)
    }

    /// Find a character by name: exact (case-insensitive) first, then the
    /// closest fuzzy match.
    pub fn find(&self, name: &str) -> Option<&Arc<Character>> {
        let name_lower = name.trim().to_lowercase();
        if let Some(exact) = self
            .characters
            .iter()
            .find(|c| c.name().to_lowercase() == name_lower)
        {
            return Some(exact);
        }

        self.characters
            .iter()
            .map(|c| (c, jaro_winkler(&name_lower, &c.name().to_lowercase())))
            .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(c, _)| c)
    }

    /// Like [`find`](Self::find), but reports close names on failure.
    pub fn resolve(&self, name: &str) -> LoadResult<Arc<Character>> {
        self.find(name)
            .cloned()
            .ok_or_else(|| LoadError::CharacterNotFound {
                name: name.to_string(),
                suggestions: self.suggest(name, 3),
            })
    }

    /// Suggest character names that start with, contain, or resemble the
    /// partial input.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<String> {
        let partial_lower = partial.trim().to_lowercase();
        let mut suggestions: Vec<(String, f64)> = self
            .characters
            .iter()
            .filter_map(|c| {
                let name_lower = c.name().to_lowercase();
                let score = if name_lower.starts_with(&partial_lower) {
                    2.0
                } else if name_lower.contains(&partial_lower) {
                    1.0
                } else {
                    jaro_winkler(&partial_lower, &name_lower)
                };
                (score >= SUGGEST_THRESHOLD).then(|| (c.name().to_string(), score))
            })
            .collect();

        suggestions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        suggestions
            .into_iter()
            .take(limit)
            .map(|(name, _)| name)
            .collect()
    }
}
