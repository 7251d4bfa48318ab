//! Error types for catalog loading and game transitions.
//!
//! `SourceError` is defined here rather than in `whosthat-sources` so the
//! catalog loader can wrap it without depending on any concrete source.

use thiserror::Error;

use crate::game::Phase;

/// Errors a catalog source can report for a single record.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no record for this id.
    #[error("no entry with id {0}")]
    NotFound(u32),

    /// The source answered with an error status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded as a record.
    #[error("failed to decode entry {id}: {message}")]
    Decode { id: u32, message: String },

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

/// A batch load failed. The catalog is all-or-nothing, so one failed record
/// fails the whole batch.
#[derive(Debug, Error)]
#[error("failed to load catalog: {cause}")]
pub struct LoadError {
    #[source]
    pub cause: SourceError,
}

impl From<SourceError> for LoadError {
    fn from(cause: SourceError) -> Self {
        Self { cause }
    }
}

/// Errors returned by the question generator and the game controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    /// Fewer than four distinct names, so distractors cannot be drawn.
    #[error("catalog has {distinct} distinct entries, at least {required} are needed")]
    InsufficientCatalog { distinct: usize, required: usize },

    /// The catalog is still loading or failed to load.
    #[error("catalog is not available: {0}")]
    CatalogUnavailable(String),

    /// The action is not allowed in the current state.
    #[error("cannot {action} while {phase}")]
    InvalidTransition { action: Action, phase: Phase },

    /// The submitted answer is not one of the question's options.
    #[error("'{0}' is not one of the options")]
    UnknownOption(String),
}

/// Inbound operations on the game controller, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    SubmitAnswer,
    NextQuestion,
    Finish,
    ConfirmFinish,
    CancelFinish,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Start => "start",
            Action::SubmitAnswer => "submit an answer",
            Action::NextQuestion => "move to the next question",
            Action::Finish => "finish",
            Action::ConfirmFinish => "confirm finishing",
            Action::CancelFinish => "cancel finishing",
        };
        f.write_str(name)
    }
}
