//! The `whosthat play` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use comfy_table::{Cell, Table};
use rand::Rng;

use whosthat_core::{
    CatalogStatus, FinishOutcome, Game, GameError, GameResults, GameSession, Phase, Question,
};

use super::{fetch_catalog, resolve_config, LOAD_FAILED_MESSAGE};
use crate::CatalogArgs;

pub async fn execute(args: CatalogArgs, seed: Option<u64>) -> Result<()> {
    let config = resolve_config(&args)?;
    let seed = seed.or(config.seed);
    tracing::debug!(?seed, batch_size = config.batch_size, source = ?config.source, "play");
    let mut game = match seed {
        Some(seed) => Game::seeded(seed),
        None => Game::new(),
    };

    println!("Loading your Pokémon...");
    game.set_catalog(fetch_catalog(&config).await?);
    if let CatalogStatus::Failed(_) = game.catalog_status() {
        anyhow::bail!(LOAD_FAILED_MESSAGE);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut game, stdin.lock(), stdout.lock())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drive a game from line-based input until `quit` or end of input.
pub fn run<R: Rng, I: BufRead, W: Write>(game: &mut Game<R>, input: I, mut out: W) -> Result<()> {
    let loaded = game.catalog().map_or(0, |catalog| catalog.len());
    writeln!(out, "Who's That Pokémon?")?;
    writeln!(
        out,
        "{loaded} Pokémon loaded. Type 'start' to play or 'help' for commands."
    )?;

    for line in input.lines() {
        let line = line?;
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        if handle(game, raw, &mut out)? == Flow::Quit {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

fn handle<R: Rng, W: Write>(game: &mut Game<R>, raw: &str, out: &mut W) -> Result<Flow> {
    let command = raw.to_lowercase();

    if command == "quit" || command == "exit" {
        writeln!(out, "Goodbye!")?;
        return Ok(Flow::Quit);
    }

    if game.session().is_confirming_finish() {
        match command.as_str() {
            "y" | "yes" => {
                let results = game.confirm_finish()?;
                print_results(out, &results)?;
            }
            "n" | "no" => {
                game.cancel_finish()?;
                writeln!(out, "Back to the game.")?;
                show_question(game.session(), out)?;
            }
            _ => writeln!(out, "Finish anyway? (y/n)")?,
        }
        return Ok(Flow::Continue);
    }

    // Option names win over command words while a question is open.
    if names_an_option(game.session(), raw) {
        answer(game, raw, out)?;
        return Ok(Flow::Continue);
    }

    match command.as_str() {
        "help" => print_help(out)?,
        "score" => {
            let session = game.session();
            writeln!(
                out,
                "Score: {} ({} of {} answered)",
                session.score(),
                session.tally.questions_answered,
                session.tally.total_questions
            )?;
        }
        "start" => match game.start().map(|_| ()) {
            Ok(()) => show_question(game.session(), out)?,
            Err(e) => writeln!(out, "Cannot start: {e}")?,
        },
        "next" => match game.next_question().map(|_| ()) {
            Ok(()) => show_question(game.session(), out)?,
            Err(e) => writeln!(out, "{}", explain(game.session(), &e))?,
        },
        "finish" => match game.finish() {
            Ok(FinishOutcome::Finished(results)) => print_results(out, &results)?,
            Ok(FinishOutcome::ConfirmationRequired) => writeln!(
                out,
                "You haven't answered this one yet. Finish anyway? (y/n)"
            )?,
            Err(e) => writeln!(out, "{}", explain(game.session(), &e))?,
        },
        _ => answer(game, raw, out)?,
    }
    Ok(Flow::Continue)
}

fn answer<R: Rng, W: Write>(game: &mut Game<R>, raw: &str, out: &mut W) -> Result<()> {
    if !game.session().is_awaiting_answer() {
        writeln!(
            out,
            "Unknown command '{raw}'. Type 'help' for the list of commands."
        )?;
        return Ok(());
    }

    let choice = game
        .session()
        .current_question
        .as_ref()
        .and_then(|question| resolve_choice(question, raw));
    let Some(choice) = choice else {
        writeln!(out, "'{raw}' is not one of the options.")?;
        return Ok(());
    };

    match game.submit_answer(&choice) {
        Ok(question) => {
            if let Some(feedback) = question.feedback() {
                writeln!(out, "{feedback}")?;
            }
            writeln!(out, "Image: {}", artwork(question.display_image()))?;
            writeln!(
                out,
                "Type 'next' for another Pokémon or 'finish' to see your results."
            )?;
        }
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

fn names_an_option(session: &GameSession, raw: &str) -> bool {
    session.is_awaiting_answer()
        && session
            .current_question
            .as_ref()
            .is_some_and(|q| q.options.iter().any(|o| o.eq_ignore_ascii_case(raw)))
}

/// Map an option number (`1`-`4`) or a case-insensitive name to the option.
fn resolve_choice(question: &Question, raw: &str) -> Option<String> {
    if let Ok(n) = raw.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| question.options.get(i))
            .cloned();
    }
    question
        .options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(raw))
        .cloned()
}

fn explain(session: &GameSession, err: &GameError) -> String {
    match session.phase {
        Phase::Running if session.is_awaiting_answer() => {
            "Answer the current question first.".to_string()
        }
        Phase::Running => err.to_string(),
        Phase::Idle | Phase::Finished => "No game in progress. Type 'start' to play.".to_string(),
    }
}

fn artwork(url: &str) -> &str {
    if url.is_empty() {
        "(no artwork)"
    } else {
        url
    }
}

fn show_question<W: Write>(session: &GameSession, out: &mut W) -> Result<()> {
    let Some(question) = &session.current_question else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(
        out,
        "Question {} | Score: {}",
        session.tally.total_questions,
        session.score()
    )?;
    writeln!(out, "Who's that Pokémon? {}", artwork(question.display_image()))?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}) {option}", i + 1)?;
    }
    Ok(())
}

fn print_results<W: Write>(out: &mut W, results: &GameResults) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Final Score", "Correct Answers", "Percentage"]);
    table.add_row(vec![
        Cell::new(results.final_score),
        Cell::new(format!(
            "{} / {}",
            results.correct_answers, results.total_questions
        )),
        Cell::new(format!("{}%", results.percentage)),
    ]);

    writeln!(out, "\nGame over!\n{table}")?;
    writeln!(out, "Type 'start' to play again or 'quit' to leave.")?;
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  start        -> start a new game")?;
    writeln!(out, "  1-4 | <name> -> answer the current question")?;
    writeln!(out, "                  (a name matching an option is an answer, not a command)")?;
    writeln!(out, "  next         -> next Pokémon (after answering)")?;
    writeln!(out, "  finish       -> end the game and show results")?;
    writeln!(out, "  score        -> show the current score")?;
    writeln!(out, "  quit         -> exit")?;
    Ok(())
}
