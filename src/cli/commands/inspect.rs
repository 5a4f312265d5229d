//! Inspect command - Show what a saved agent has learned about a position

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::output::{format_number, print_kv, print_section, render_board, render_values},
    ports::MovePolicy,
    q_learning::ValueStore,
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Show learned action values for a board position")]
pub struct InspectArgs {
    /// Path to a saved agent
    pub agent: PathBuf,

    /// Board as nine characters of X, O and '.' (row-major)
    #[arg(long, short = 'b', default_value = ".........")]
    pub board: String,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let app = App::new();
    let mut agent = app
        .load_agent(&args.agent)
        .with_context(|| format!("Failed to load agent from {}", args.agent.display()))?;
    let board = BoardState::from_string(&args.board)
        .with_context(|| format!("Invalid board '{}'", args.board))?;

    print_section("Agent");
    print_kv("Name", agent.name());
    print_kv("Games played", &agent.games_played().to_string());
    print_kv("Epsilon", &format!("{:.4}", agent.epsilon()));
    let stored = match agent.store() {
        ValueStore::Single(table) => format_number(table.len()),
        ValueStore::Double { first, second, .. } => {
            format!("{} / {}", format_number(first.len()), format_number(second.len()))
        }
    };
    print_kv("States stored", &stored);

    print_section(&format!("Position (key {}, {} to move)", board.key(), board.to_move));
    print!("{}", render_board(&board));

    if board.is_terminal() {
        println!("\nThe position is terminal; there is nothing to choose.");
        return Ok(());
    }

    println!("\nAction values:");
    print!("{}", render_values(&board, &agent.action_values(&board)));
    let best = agent.greedy_move(&board)?;
    print_kv("Greedy move", &best.to_string());
    Ok(())
}
