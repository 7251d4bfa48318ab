//! Core data model types for whosthat.
//!
//! These are the types the loader, the question generator, and the game
//! controller pass between each other.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Number of options shown for every question.
pub const OPTION_COUNT: usize = 4;

/// A single creature in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name, also the answer the player must pick.
    pub name: String,
    /// Artwork shown once the question is answered.
    pub image_url: String,
    /// Artwork shown while the question is pending.
    pub silhouette_url: String,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        image_url: impl Into<String>,
        silhouette_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
            silhouette_url: silhouette_url.into(),
        }
    }

    /// True when the record was missing its artwork and was normalized to
    /// empty URLs.
    pub fn is_degraded(&self) -> bool {
        self.image_url.is_empty() || self.silhouette_url.is_empty()
    }
}

/// The loaded pool of entries questions are drawn from. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    distinct_names: usize,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let distinct_names = entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<HashSet<_>>()
            .len();
        Self {
            entries,
            distinct_names,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct names. Question generation needs at least
    /// [`OPTION_COUNT`].
    pub fn distinct_names(&self) -> usize {
        self.distinct_names
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The entry whose name is the correct answer.
    pub target: CatalogEntry,
    /// Display order of the options. Contains `target.name` exactly once.
    pub options: [String; OPTION_COUNT],
    /// The answer the player picked, once answered.
    #[serde(default)]
    pub selected: Option<String>,
}

impl Question {
    pub fn new(target: CatalogEntry, options: [String; OPTION_COUNT]) -> Self {
        Self {
            target,
            options,
            selected: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// `Some(true)` for a correct answer, `None` while pending.
    pub fn is_correct(&self) -> Option<bool> {
        self.selected.as_ref().map(|s| *s == self.target.name)
    }

    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|o| o == choice)
    }

    /// The silhouette while pending, the full artwork once answered.
    pub fn display_image(&self) -> &str {
        if self.is_answered() {
            &self.target.image_url
        } else {
            &self.target.silhouette_url
        }
    }

    /// Feedback for the recorded answer, `None` while pending.
    pub fn feedback(&self) -> Option<Feedback<'_>> {
        self.is_correct().map(|correct| Feedback {
            correct,
            answer: &self.target.name,
        })
    }

    pub(crate) fn record(&mut self, choice: &str) {
        self.selected = Some(choice.to_string());
    }
}

/// Shown after the player answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub correct: bool,
    pub answer: &'a str,
}

impl std::fmt::Display for Feedback<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.correct { "Correct!" } else { "Wrong!" };
        write!(f, "{verdict} It was {}.", self.answer)
    }
}
