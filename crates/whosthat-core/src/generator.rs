//! Question generation.
//!
//! Targets are drawn with replacement, so a creature can come up again later
//! in the same game. Distractors are drawn by rejection until four distinct
//! names are held, and the display order is a uniform shuffle.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::model::{Catalog, CatalogEntry, Question, OPTION_COUNT};

/// Generate one question from `catalog`.
///
/// Fails with [`GameError::InsufficientCatalog`] when the catalog holds fewer
/// than [`OPTION_COUNT`] distinct names, since the distractor draw could
/// never finish.
pub fn generate<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<Question, GameError> {
    let distinct = catalog.distinct_names();
    if distinct < OPTION_COUNT {
        return Err(GameError::InsufficientCatalog {
            distinct,
            required: OPTION_COUNT,
        });
    }

    let entries = catalog.entries();
    let target = pick(entries, rng).clone();

    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    options.push(target.name.clone());
    while options.len() < OPTION_COUNT {
        let candidate = &pick(entries, rng).name;
        if !options.contains(candidate) {
            options.push(candidate.clone());
        }
    }

    options.shuffle(rng);

    let options: [String; OPTION_COUNT] = options
        .try_into()
        .map_err(|_| GameError::InsufficientCatalog {
            distinct,
            required: OPTION_COUNT,
        })?;

    tracing::debug!(answer = %target.name, ?options, "generated question");
    Ok(Question::new(target, options))
}

// Callers guarantee `entries` is non-empty.
fn pick<'a, R: Rng + ?Sized>(entries: &'a [CatalogEntry], rng: &mut R) -> &'a CatalogEntry {
    &entries[rng.gen_range(0..entries.len())]
}
