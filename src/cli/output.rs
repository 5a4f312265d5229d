//! Output formatting for CLI

use std::fmt::Write;

use crate::{
    tictactoe::{BoardState, Cell, GameStatus, Player},
    types::ActionValues,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Render the board as a grid; empty cells show their index.
pub fn render_board(board: &BoardState) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let pos = row * 3 + col;
                match board.get(pos) {
                    Cell::Empty => pos.to_string(),
                    cell => cell.to_char().to_string(),
                }
            })
            .collect();
        let _ = writeln!(out, " {} ", cells.join(" | "));
        if row < 2 {
            let _ = writeln!(out, "---+---+---");
        }
    }
    out
}

/// Render action values as a grid; occupied cells show the marker.
pub fn render_values(board: &BoardState, values: &ActionValues) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let pos = row * 3 + col;
                match board.get(pos) {
                    Cell::Empty => format!("{:>7.3}", values[pos]),
                    cell => format!("{:>7}", cell.to_char()),
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

/// Human-readable end-of-game message from the human player's perspective
pub fn describe_status(status: GameStatus, first_player: Player, human: Player) -> &'static str {
    match status.winner(first_player) {
        Some(winner) if winner == human => "You win!",
        Some(_) => "The agent wins.",
        None if status == GameStatus::Draw => "Draw.",
        None => "Game in progress.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(10_000), "10,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn board_shows_markers_and_free_indices() {
        let board = BoardState::from_string("X...O....").unwrap();
        let rendered = render_board(&board);
        assert!(rendered.starts_with(" X | 1 | 2 \n"));
        assert!(rendered.contains(" 3 | O | 5 "));
    }

    #[test]
    fn status_is_described_for_the_human() {
        assert_eq!(
            describe_status(GameStatus::WonByFirstMover, Player::X, Player::X),
            "You win!"
        );
        assert_eq!(
            describe_status(GameStatus::WonByFirstMover, Player::O, Player::X),
            "The agent wins."
        );
        assert_eq!(describe_status(GameStatus::Draw, Player::X, Player::O), "Draw.");
    }
}
