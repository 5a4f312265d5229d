//! Play command - Interactive game against a learning agent

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, Session},
    cli::{
        config::{AgentArgs, PlayerArg},
        output::{describe_status, format_number, render_board},
    },
    pipeline::TrainingConfig,
    ports::MovePolicy,
    tictactoe::{MoveRejection, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the agent in the terminal", allow_negative_numbers = true)]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Start from a previously saved agent
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Self-play episodes to run before the first game
    #[arg(long, default_value_t = 0)]
    pub pretrain: usize,

    /// Token the human plays
    #[arg(long, value_enum, default_value = "x")]
    pub human: PlayerArg,

    /// Which token makes the first move
    #[arg(long, value_enum)]
    pub first_player: Option<PlayerArg>,

    /// Save the agent here on exit
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let resolved = args.agent.resolve()?;
    let training = TrainingConfig {
        first_player: args
            .first_player
            .map_or(resolved.training.first_player, Player::from),
        ..resolved.training
    };

    let app = App::new();
    let agent = match &args.load {
        Some(path) => app
            .load_agent(path)
            .with_context(|| format!("Failed to load agent from {}", path.display()))?,
        None => app.create_agent(resolved.agent)?,
    };
    let mut session = Session::new(agent, Player::from(args.human), training);

    if args.pretrain > 0 {
        let result = session.train_agent(args.pretrain, Vec::new())?;
        println!("Pre-trained for {} episodes.", format_number(result.episodes));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_interactive(&mut session, stdin.lock(), stdout.lock())?;

    if let Some(path) = &args.output {
        app.save_agent(session.agent(), path)
            .with_context(|| format!("Failed to save agent to {}", path.display()))?;
        println!("✓ Agent saved to: {}", path.display());
    }
    Ok(())
}

/// Drive a session from line-based input until `quit` or end of input.
///
/// Accepted commands: a cell number `0`-`8`, `new`, `forget`, `train N`,
/// `help` and `quit`.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(
        out,
        "You are {}. Enter a cell number (0-8), or 'help'.",
        session.human()
    )?;
    open_game(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "quit" | "q" | "exit" => break,
            "help" | "?" => print_help(&mut out)?,
            "new" => {
                session.reset_game();
                open_game(session, &mut out)?;
            }
            "forget" => {
                session.reset_learning();
                writeln!(out, "The agent has forgotten everything it learned.")?;
            }
            "train" => {
                let episodes = match words.next().map(str::parse::<usize>) {
                    Some(Ok(n)) => n,
                    _ => {
                        writeln!(out, "Usage: train <episodes>")?;
                        continue;
                    }
                };
                let result = session.train_agent(episodes, Vec::new())?;
                writeln!(
                    out,
                    "Trained {} episodes ({} games played, ε={:.4}).",
                    format_number(result.episodes),
                    result.games_played,
                    result.final_epsilon
                )?;
                open_game(session, &mut out)?;
            }
            other => match other.parse::<usize>() {
                Ok(cell) => play_cell(session, cell, &mut out)?,
                Err(_) => writeln!(out, "Unknown command '{other}'. Type 'help'.")?,
            },
        }
    }
    Ok(())
}

fn play_cell<W: Write>(session: &mut Session, cell: usize, out: &mut W) -> Result<()> {
    let report = session.make_move(cell)?;
    if let Some(rejection) = report.rejection {
        let reason = match rejection {
            MoveRejection::GameOver => "the game is over; type 'new' to start again",
            MoveRejection::OutOfBounds => "cells are numbered 0 to 8",
            MoveRejection::Occupied => "that cell is taken",
            MoveRejection::OutOfTurn => "it is not your turn",
        };
        writeln!(out, "Move rejected: {reason}.")?;
        return Ok(());
    }

    if let Some(reply) = report.reply {
        writeln!(out, "{} plays {reply}.", session.agent().name())?;
    }
    write!(out, "{}", render_board(session.board()))?;
    if report.status.is_terminal() {
        writeln!(
            out,
            "{} Type 'new' to play again.",
            describe_status(report.status, session.first_player(), session.human())
        )?;
    }
    Ok(())
}

fn open_game<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    if let Some(cell) = session.agent_move()? {
        writeln!(out, "{} opens at {cell}.", session.agent().name())?;
    }
    write!(out, "{}", render_board(session.board()))?;
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "  0-8        play that cell")?;
    writeln!(out, "  new        start a new game")?;
    writeln!(out, "  train N    run N self-play episodes")?;
    writeln!(out, "  forget     reset everything the agent learned")?;
    writeln!(out, "  quit       leave")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AgentConfig;

    fn session(human: Player, first: Player) -> Session {
        let agent = App::new()
            .create_agent(AgentConfig::default().with_seed(3))
            .unwrap();
        let training = TrainingConfig {
            first_player: first,
            ..TrainingConfig::default()
        };
        Session::new(agent, human, training)
    }

    fn transcript(session: &mut Session, input: &str) -> String {
        let mut out = Vec::new();
        run_interactive(session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn human_move_gets_a_reply() {
        let mut session = session(Player::X, Player::X);
        let output = transcript(&mut session, "4\nquit\n");
        assert!(output.contains("plays"));
        assert_eq!(session.board().occupied_count(), 2);
    }

    #[test]
    fn agent_opens_when_it_moves_first() {
        let mut session = session(Player::O, Player::X);
        let output = transcript(&mut session, "");
        assert!(output.contains("opens at"));
        assert_eq!(session.board().occupied_count(), 1);
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut session = session(Player::X, Player::X);
        let output = transcript(&mut session, "4\n4\n");
        assert!(output.contains("that cell is taken"));
        assert_eq!(session.board().occupied_count(), 2);
    }

    #[test]
    fn train_command_counts_games_and_clears_board() {
        let mut session = session(Player::X, Player::X);
        let output = transcript(&mut session, "4\ntrain 5\n");
        assert!(output.contains("Trained 5 episodes (5 games played"));
        assert_eq!(session.agent().games_played(), 5);
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn bad_input_is_reported() {
        let mut session = session(Player::X, Player::X);
        let output = transcript(&mut session, "banana\ntrain\n9\n");
        assert!(output.contains("Unknown command 'banana'"));
        assert!(output.contains("Usage: train <episodes>"));
        assert!(output.contains("cells are numbered 0 to 8"));
    }
}
