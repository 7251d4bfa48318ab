//! whosthat-core — catalog loading, question generation, and game state.
//!
//! This crate defines the data model, the `CatalogSource` seam, and the game
//! controller that the sources and the CLI build on.

pub mod catalog;
pub mod error;
pub mod game;
pub mod generator;
pub mod model;
pub mod scoring;
pub mod traits;

pub use catalog::{load_catalog, normalize_entry, DEFAULT_BATCH_SIZE};
pub use error::{Action, GameError, LoadError, SourceError};
pub use game::{CatalogStatus, FinishOutcome, Game, GameSession, PendingAction, Phase, Tally};
pub use generator::generate;
pub use model::{Catalog, CatalogEntry, Feedback, Question, OPTION_COUNT};
pub use scoring::{percentage, GameResults};
pub use traits::CatalogSource;
