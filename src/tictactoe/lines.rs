//! Winning line detection for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Win predicate over a cell array
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        Self::completed_line(cells, player).is_some()
    }

    /// First line fully occupied by the player, if any
    pub fn completed_line(cells: &[Cell; 9], player: Player) -> Option<[usize; 3]> {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .find(|line| line.iter().all(|&idx| cells[idx] == target))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYERS: [Player; 2] = [Player::X, Player::O];

    #[test]
    fn every_line_wins_for_its_marker_only() {
        for line in WINNING_LINES {
            for player in PLAYERS {
                let mut cells = [Cell::Empty; 9];
                for idx in line {
                    cells[idx] = player.to_cell();
                }
                assert!(LineAnalyzer::has_won(&cells, player), "{line:?}");
                assert!(!LineAnalyzer::has_won(&cells, player.opponent()));
                assert_eq!(LineAnalyzer::completed_line(&cells, player), Some(line));
            }
        }
    }

    #[test]
    fn partial_and_mixed_lines_do_not_win() {
        for line in WINNING_LINES {
            for player in PLAYERS {
                // two markers and an empty cell
                let mut cells = [Cell::Empty; 9];
                cells[line[0]] = player.to_cell();
                cells[line[1]] = player.to_cell();
                assert!(!LineAnalyzer::has_won(&cells, player));

                // two markers and an opponent marker
                cells[line[2]] = player.opponent().to_cell();
                assert!(!LineAnalyzer::has_won(&cells, player));
                assert!(!LineAnalyzer::has_won(&cells, player.opponent()));
            }
        }
    }

    #[test]
    fn empty_board_never_wins() {
        let cells = [Cell::Empty; 9];
        for player in PLAYERS {
            assert!(!LineAnalyzer::has_won(&cells, player));
        }
    }

    #[test]
    fn full_board_without_line() {
        // XOX / XOO / OXX
        let cells = [
            Cell::X,
            Cell::O,
            Cell::X,
            Cell::X,
            Cell::O,
            Cell::O,
            Cell::O,
            Cell::X,
            Cell::X,
        ];
        for player in PLAYERS {
            assert!(!LineAnalyzer::has_won(&cells, player));
        }
    }
}
