/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;

use primerook::{Game, MoveOutcome, PieceKind, Square};

/// Play prime-rook chess in the terminal.
#[derive(Debug, Parser)]
struct Cli {
    /// Moves to apply before handing over control, like `e2e4` or `a7a8q`.
    #[arg(required = false)]
    moves: Vec<String>,

    /// If set, exit after replaying the provided moves instead of prompting.
    #[arg(short, long, default_value = "false")]
    replay: bool,
}

/// Parses `e2e4` or `a7a8q` into squares plus an optional promotion choice.
fn parse_move(input: &str) -> Result<(Square, Square, Option<PieceKind>)> {
    if !input.is_ascii() || !(4..=5).contains(&input.len()) {
        bail!("Expected a move like e2e4 or a7a8q, got {input:?}");
    }
    let from = Square::from_uci(&input[0..2])?;
    let to = Square::from_uci(&input[2..4])?;
    let promotion = match input.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => bail!("Promotion choice in {input:?} must be one of q, r, b, n"),
    };
    Ok((from, to, promotion))
}

/// Submits one move, resolving a promotion inline if a choice was supplied.
fn submit(game: &mut Game, input: &str) -> Result<MoveOutcome> {
    let (from, to, promotion) = parse_move(input)?;
    let outcome = game.submit_move(from, to)?;

    if outcome.pending_promotion() {
        if let Some(kind) = promotion {
            return game.resolve_promotion(kind);
        }
    }
    Ok(outcome)
}

fn report(outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::Applied { terminal: Some(r) } => println!("{}", r.to_string().green().bold()),
        MoveOutcome::Applied { terminal: None } => {}
        MoveOutcome::AwaitingPromotion => {
            println!("{}", "append a promotion choice, like a7a8q".yellow())
        }
        MoveOutcome::Rejected(reason) => println!("{}", reason.to_string().red()),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let mut game = Game::new();
    for input in &args.moves {
        let outcome = submit(&mut game, input)?;
        if !outcome.applied() {
            println!("{input}: {}", outcome.to_string().red());
            break;
        }
    }

    println!("{game}\n");
    if args.replay {
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        if game.is_game_over() {
            break;
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let input = line?.trim().to_string();

        match input.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => game.reset(),
            _ => match submit(&mut game, &input) {
                Ok(outcome) => report(outcome),
                Err(err) => println!("{}", err.to_string().red()),
            },
        }
        println!("{game}\n");
    }

    Ok(())
}
