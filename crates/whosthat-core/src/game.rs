//! The game state machine.
//!
//! One [`Game`] controller owns the catalog status, the [`GameSession`], and
//! the random source. Every inbound operation is a method on the controller;
//! invalid calls return [`GameError`] and leave the session untouched.
//!
//! ```text
//!            start                 finish (answered) / confirm_finish
//!   Idle ───────────► Running ─────────────────────────────────► Finished
//!                      │   ▲                                        │
//!     finish (pending) │   │ cancel_finish                          │ start
//!                      ▼   │                                        │
//!                 ConfirmFinish pending                     Running ◄┘
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Action, GameError, LoadError};
use crate::generator::generate;
use crate::model::{Catalog, Question};
use crate::scoring::GameResults;

/// Lifecycle stage of a game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Running => write!(f, "running"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// An action that is waiting on the player before it takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    /// `finish` was requested with an unanswered question.
    ConfirmFinish,
}

/// Counters for the current game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub questions_answered: u32,
}

impl Tally {
    /// One point per correct answer.
    pub fn score(&self) -> u32 {
        self.correct_answers
    }

    fn check_invariants(&self) {
        debug_assert!(self.correct_answers <= self.total_questions);
        debug_assert!(self.questions_answered <= self.total_questions);
        debug_assert!(self.correct_answers <= self.questions_answered);
    }
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: Phase,
    pub tally: Tally,
    pub current_question: Option<Question>,
    pub pending: Option<PendingAction>,
}

impl GameSession {
    pub fn score(&self) -> u32 {
        self.tally.score()
    }

    /// True while the current question is waiting for an answer.
    pub fn is_awaiting_answer(&self) -> bool {
        self.phase == Phase::Running
            && self.pending.is_none()
            && self
                .current_question
                .as_ref()
                .is_some_and(|q| !q.is_answered())
    }

    /// True when `next_question` would be accepted.
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Running
            && self.pending.is_none()
            && self
                .current_question
                .as_ref()
                .is_some_and(Question::is_answered)
    }

    pub fn is_confirming_finish(&self) -> bool {
        self.pending == Some(PendingAction::ConfirmFinish)
    }

    /// Final results, once finished.
    pub fn results(&self) -> Option<GameResults> {
        (self.phase == Phase::Finished).then(|| GameResults::from_tally(&self.tally))
    }
}

/// Where the catalog load stands. Gates the whole game surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready(Catalog),
    /// The load failed. Terminal for this session.
    Failed(String),
}

/// Result of a `finish` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishOutcome {
    Finished(GameResults),
    /// The current question is unanswered; call `confirm_finish` or
    /// `cancel_finish`.
    ConfirmationRequired,
}

/// The game controller.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    catalog: CatalogStatus,
    session: GameSession,
    rng: R,
}

impl Game<StdRng> {
    /// A game waiting for its catalog, with an OS-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A game with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            catalog: CatalogStatus::Loading,
            session: GameSession::default(),
            rng,
        }
    }

    /// Builder shortcut for a game whose catalog is already loaded.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = CatalogStatus::Ready(catalog);
        self
    }

    /// Record the outcome of the catalog load.
    pub fn set_catalog(&mut self, result: Result<Catalog, LoadError>) {
        self.catalog = match result {
            Ok(catalog) => {
                tracing::debug!(entries = catalog.len(), "catalog ready");
                CatalogStatus::Ready(catalog)
            }
            Err(e) => {
                tracing::error!("catalog unavailable: {e}");
                CatalogStatus::Failed(e.to_string())
            }
        };
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.catalog {
            CatalogStatus::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Start a fresh game from `Idle` or `Finished`.
    pub fn start(&mut self) -> Result<&Question, GameError> {
        if self.session.phase == Phase::Running {
            return Err(self.invalid(Action::Start));
        }
        let catalog = match &self.catalog {
            CatalogStatus::Ready(catalog) => catalog,
            CatalogStatus::Loading => {
                return Err(GameError::CatalogUnavailable("still loading".into()))
            }
            CatalogStatus::Failed(reason) => {
                return Err(GameError::CatalogUnavailable(reason.clone()))
            }
        };

        let question = generate(catalog, &mut self.rng)?;
        self.session = GameSession {
            phase: Phase::Running,
            tally: Tally {
                total_questions: 1,
                ..Tally::default()
            },
            current_question: None,
            pending: None,
        };
        tracing::debug!("game started");
        let question: &Question = self.session.current_question.insert(question);
        Ok(question)
    }

    /// Record an answer for the pending question.
    pub fn submit_answer(&mut self, choice: &str) -> Result<&Question, GameError> {
        if !self.session.is_awaiting_answer() {
            return Err(self.invalid(Action::SubmitAnswer));
        }
        let phase = self.session.phase;
        let Some(question) = self.session.current_question.as_mut() else {
            return Err(GameError::InvalidTransition {
                action: Action::SubmitAnswer,
                phase,
            });
        };
        if !question.has_option(choice) {
            return Err(GameError::UnknownOption(choice.to_string()));
        }

        question.record(choice);
        let correct = question.is_correct() == Some(true);
        let tally = &mut self.session.tally;
        if correct {
            tally.correct_answers += 1;
        }
        tally.questions_answered += 1;
        tally.check_invariants();
        tracing::debug!(correct, score = tally.score(), "answer recorded");

        Ok(&*question)
    }

    /// Replace the answered question with a new one.
    pub fn next_question(&mut self) -> Result<&Question, GameError> {
        if !self.session.can_advance() {
            return Err(self.invalid(Action::NextQuestion));
        }
        let CatalogStatus::Ready(catalog) = &self.catalog else {
            return Err(self.invalid(Action::NextQuestion));
        };

        let question = generate(catalog, &mut self.rng)?;
        let tally = &mut self.session.tally;
        tally.total_questions += 1;
        tally.check_invariants();
        tracing::debug!(total = tally.total_questions, "next question");

        let question: &Question = self.session.current_question.insert(question);
        Ok(question)
    }

    /// Request the end of the game.
    ///
    /// With the current question answered this finishes immediately;
    /// otherwise it asks for confirmation and the phase stays `Running`.
    pub fn finish(&mut self) -> Result<FinishOutcome, GameError> {
        if self.session.phase != Phase::Running {
            return Err(self.invalid(Action::Finish));
        }
        let answered = self
            .session
            .current_question
            .as_ref()
            .map_or(true, Question::is_answered);

        if answered {
            return Ok(FinishOutcome::Finished(self.complete()));
        }

        self.session.pending = Some(PendingAction::ConfirmFinish);
        tracing::debug!("finish requested with an unanswered question");
        Ok(FinishOutcome::ConfirmationRequired)
    }

    /// Finish despite the unanswered question.
    pub fn confirm_finish(&mut self) -> Result<GameResults, GameError> {
        if !self.session.is_confirming_finish() {
            return Err(self.invalid(Action::ConfirmFinish));
        }
        Ok(self.complete())
    }

    /// Drop the finish request and keep playing.
    pub fn cancel_finish(&mut self) -> Result<(), GameError> {
        if !self.session.is_confirming_finish() {
            return Err(self.invalid(Action::CancelFinish));
        }
        self.session.pending = None;
        tracing::debug!("finish cancelled");
        Ok(())
    }

    fn complete(&mut self) -> GameResults {
        self.session.phase = Phase::Finished;
        self.session.pending = None;
        let results = GameResults::from_tally(&self.session.tally);
        tracing::info!(
            score = results.final_score,
            total = results.total_questions,
            percentage = %results.percentage,
            "game finished"
        );
        results
    }

    fn invalid(&self, action: Action) -> GameError {
        GameError::InvalidTransition {
            action,
            phase: self.session.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::SourceError;
    use crate::model::CatalogEntry;

    fn catalog(n: usize) -> Catalog {
        Catalog::new(
            (1..=n)
                .map(|i| {
                    let url = format!("https://img/{i}.png");
                    CatalogEntry::new(format!("mon-{i}"), url.clone(), url)
                })
                .collect(),
        )
    }

    fn ready_game() -> Game {
        Game::seeded(5).with_catalog(catalog(50))
    }

    fn wrong_option(game: &Game) -> String {
        let question = game.session().current_question.as_ref().unwrap();
        question
            .options
            .iter()
            .find(|o| **o != question.target.name)
            .cloned()
            .unwrap()
    }

    fn right_option(game: &Game) -> String {
        game.session()
            .current_question
            .as_ref()
            .unwrap()
            .target
            .name
            .clone()
    }

    #[test]
    fn new_game_is_idle_and_loading() {
        let game = Game::seeded(1);
        assert_eq!(game.session().phase, Phase::Idle);
        assert_eq!(*game.catalog_status(), CatalogStatus::Loading);
        assert!(game.catalog().is_none());
    }

    #[test]
    fn start_requires_a_catalog() {
        let mut game = Game::seeded(1);
        let err = game.start().unwrap_err();
        assert!(matches!(err, GameError::CatalogUnavailable(_)));
        assert_eq!(game.session().phase, Phase::Idle);
    }

    #[test]
    fn failed_load_keeps_idle_and_rejects_start() {
        let mut game = Game::seeded(1);
        game.set_catalog(Err(LoadError::from(SourceError::Network("offline".into()))));

        assert!(matches!(game.catalog_status(), CatalogStatus::Failed(_)));
        assert!(game.catalog().is_none());
        assert!(matches!(
            game.start().unwrap_err(),
            GameError::CatalogUnavailable(_)
        ));
        assert_eq!(*game.session(), GameSession::default());
    }

    #[test]
    fn start_with_small_catalog_fails_fast() {
        let mut game = Game::seeded(1).with_catalog(catalog(3));
        assert!(matches!(
            game.start().unwrap_err(),
            GameError::InsufficientCatalog { distinct: 3, .. }
        ));
        assert_eq!(game.session().phase, Phase::Idle);
    }

    #[test]
    fn start_issues_first_question() {
        let mut game = ready_game();
        game.start().unwrap();

        let session = game.session();
        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.tally.total_questions, 1);
        assert_eq!(session.score(), 0);
        assert!(session.is_awaiting_answer());
        assert!(!session.can_advance());
    }

    #[test]
    fn correct_answer_scores() {
        let mut game = ready_game();
        game.start().unwrap();
        let answer = right_option(&game);

        let question = game.submit_answer(&answer).unwrap();
        assert_eq!(question.is_correct(), Some(true));

        let session = game.session();
        assert_eq!(session.score(), 1);
        assert_eq!(session.tally.correct_answers, 1);
        assert_eq!(session.tally.questions_answered, 1);
        assert_eq!(session.phase, Phase::Running);
        assert!(session.can_advance());
    }

    #[test]
    fn wrong_answer_counts_but_does_not_score() {
        let mut game = ready_game();
        game.start().unwrap();
        let answer = wrong_option(&game);

        game.submit_answer(&answer).unwrap();
        let session = game.session();
        assert_eq!(session.score(), 0);
        assert_eq!(session.tally.questions_answered, 1);
        assert_eq!(
            session.current_question.as_ref().unwrap().selected.as_deref(),
            Some(answer.as_str())
        );
    }

    #[test]
    fn answer_twice_is_rejected() {
        let mut game = ready_game();
        game.start().unwrap();
        let answer = right_option(&game);
        game.submit_answer(&answer).unwrap();

        let before = game.session().clone();
        let err = game.submit_answer(&answer).unwrap_err();
        assert!(matches!(err, GameError::InvalidTransition { .. }));
        assert_eq!(*game.session(), before);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut game = ready_game();
        game.start().unwrap();
        let err = game.submit_answer("missingno").unwrap_err();
        assert_eq!(err, GameError::UnknownOption("missingno".into()));
        assert!(game.session().is_awaiting_answer());
    }

    #[test]
    fn submit_while_idle_is_rejected() {
        let mut game = ready_game();
        let err = game.submit_answer("mon-1").unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidTransition {
                action: Action::SubmitAnswer,
                phase: Phase::Idle
            }
        );
    }

    #[test]
    fn next_requires_an_answer() {
        let mut game = ready_game();
        game.start().unwrap();
        assert!(matches!(
            game.next_question().unwrap_err(),
            GameError::InvalidTransition {
                action: Action::NextQuestion,
                ..
            }
        ));
        assert_eq!(game.session().tally.total_questions, 1);
    }

    #[test]
    fn next_question_increments_total() {
        let mut game = ready_game();
        game.start().unwrap();
        let answer = wrong_option(&game);
        game.submit_answer(&answer).unwrap();

        let question = game.next_question().unwrap();
        assert!(!question.is_answered());
        assert_eq!(game.session().tally.total_questions, 2);
        assert!(game.session().is_awaiting_answer());
    }

    #[test]
    fn finish_answered_goes_straight_to_finished() {
        let mut game = ready_game();
        game.start().unwrap();
        let answer = right_option(&game);
        game.submit_answer(&answer).unwrap();

        let results = match game.finish().unwrap() {
            FinishOutcome::Finished(results) => results,
            other => panic!("expected Finished, got {other:?}"),
        };
        assert_eq!(results.percentage, "100.00");
        assert_eq!(game.session().phase, Phase::Finished);
        assert_eq!(game.session().results(), Some(results));
    }

    #[test]
    fn finish_unanswered_needs_confirmation() {
        let mut game = ready_game();
        game.start().unwrap();

        assert_eq!(game.finish().unwrap(), FinishOutcome::ConfirmationRequired);
        assert_eq!(game.session().phase, Phase::Running);
        assert!(game.session().is_confirming_finish());
        assert!(!game.session().is_awaiting_answer());

        let results = game.confirm_finish().unwrap();
        assert_eq!(game.session().phase, Phase::Finished);
        assert_eq!(game.session().pending, None);
        assert_eq!(results.total_questions, 1);
        assert_eq!(results.percentage, "0.00");
    }

    #[test]
    fn cancel_finish_changes_nothing_else() {
        let mut game = ready_game();
        game.start().unwrap();
        let before = game.session().clone();

        game.finish().unwrap();
        game.cancel_finish().unwrap();

        assert_eq!(*game.session(), before);
        assert!(game.session().is_awaiting_answer());
    }

    #[test]
    fn answering_is_blocked_while_confirming() {
        let mut game = ready_game();
        game.start().unwrap();
        game.finish().unwrap();

        let answer = right_option(&game);
        assert!(matches!(
            game.submit_answer(&answer).unwrap_err(),
            GameError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn confirm_and_cancel_need_a_pending_request() {
        let mut game = ready_game();
        game.start().unwrap();
        assert!(game.confirm_finish().is_err());
        assert!(game.cancel_finish().is_err());
        assert_eq!(game.session().phase, Phase::Running);
    }

    #[test]
    fn finish_outside_running_is_rejected() {
        let mut game = ready_game();
        assert!(game.finish().is_err());

        game.start().unwrap();
        let answer = right_option(&game);
        game.submit_answer(&answer).unwrap();
        game.finish().unwrap();
        assert!(matches!(
            game.finish().unwrap_err(),
            GameError::InvalidTransition {
                phase: Phase::Finished,
                ..
            }
        ));
    }

    #[test]
    fn start_while_running_is_rejected() {
        let mut game = ready_game();
        game.start().unwrap();
        assert!(matches!(
            game.start().unwrap_err(),
            GameError::InvalidTransition {
                action: Action::Start,
                phase: Phase::Running
            }
        ));
    }

    #[test]
    fn restart_resets_counters() {
        let mut game = ready_game();
        game.start().unwrap();
        for _ in 0..5 {
            let answer = right_option(&game);
            game.submit_answer(&answer).unwrap();
            game.next_question().unwrap();
        }
        game.finish().unwrap();
        game.confirm_finish().unwrap();
        assert_eq!(game.session().tally.total_questions, 6);

        game.start().unwrap();
        let session = game.session();
        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.tally.total_questions, 1);
        assert_eq!(session.tally.correct_answers, 0);
        assert_eq!(session.tally.questions_answered, 0);
        assert_eq!(session.score(), 0);
    }
}
