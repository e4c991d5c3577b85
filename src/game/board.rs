use serde::{Serialize, Serializer};
use std::fmt;

/// Number of rows and columns on the board
pub const BOARD_SIZE: usize = 3;

/// Every line that wins the game: rows, then columns, then both diagonals
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// One of the two roles a seated connection plays. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Player {
    #[default]
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single square of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Player),
}

impl Cell {
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Taken(player) => player.symbol(),
        }
    }
}

// Clients expect "" for an empty square, not null
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Derived classification of a board. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// 3x3 grid indexed by `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when the coordinates fall outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Writes `player` into an empty cell. Returns false, leaving the board
    /// untouched, if the cell is out of range or already taken.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) if *cell == Cell::Empty => {
                *cell = Cell::Taken(player);
                true
            }
            _ => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| *cell != Cell::Empty)
    }

    /// Returns the owner of the first uniform line, checking all eight
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|[a, b, c]| {
            match (self.cells[a.0][a.1], self.cells[b.0][b.1], self.cells[c.0][c.1]) {
                (Cell::Taken(p), Cell::Taken(q), Cell::Taken(r)) if p == q && q == r => Some(p),
                _ => None,
            }
        })
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(player) => Outcome::Win(player),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn board_from(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                match ch {
                    'X' => assert!(board.place(r, c, Player::X)),
                    'O' => assert!(board.place(r, c, Player::O)),
                    _ => {}
                }
            }
        }
        board
    }

    #[test]
    fn empty_board_is_in_progress() {
        assert_eq!(Board::new().outcome(), Outcome::InProgress);
    }

    #[test_case(["XXX", "...", "..."] ; "top row")]
    #[test_case(["...", "XXX", "..."] ; "middle row")]
    #[test_case(["...", "...", "XXX"] ; "bottom row")]
    #[test_case(["X..", "X..", "X.."] ; "left column")]
    #[test_case([".X.", ".X.", ".X."] ; "middle column")]
    #[test_case(["..X", "..X", "..X"] ; "right column")]
    #[test_case(["X..", ".X.", "..X"] ; "main diagonal")]
    #[test_case(["..X", ".X.", "X.."] ; "anti diagonal")]
    fn every_line_wins(rows: [&str; 3]) {
        assert_eq!(board_from(rows).outcome(), Outcome::Win(Player::X));
    }

    #[test_case(["OOO", "XX.", "X.."] ; "row with noise")]
    #[test_case(["OXX", "OX.", "O.."] ; "column with noise")]
    #[test_case(["XXO", "XOX", "OXX"] ; "full board anti diagonal")]
    fn win_holds_regardless_of_other_cells(rows: [&str; 3]) {
        assert_eq!(board_from(rows).outcome(), Outcome::Win(Player::O));
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let board = board_from(["XOX", "XOO", "OXX"]);
        assert!(board.is_full());
        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn full_board_with_line_is_win_not_draw() {
        let board = board_from(["XXX", "OOX", "XOO"]);
        assert_eq!(board.outcome(), Outcome::Win(Player::X));
    }

    #[test]
    fn place_rejects_taken_and_out_of_range() {
        let mut board = Board::new();
        assert!(board.place(1, 1, Player::X));
        assert!(!board.place(1, 1, Player::O));
        assert!(!board.place(3, 0, Player::O));
        assert!(!board.place(0, 3, Player::O));
        assert_eq!(board.get(1, 1), Some(Cell::Taken(Player::X)));
        assert_eq!(board.get(3, 3), None);
    }

    #[test]
    fn board_serializes_as_nested_symbols() {
        let board = board_from(["X..", ".O.", "..."]);
        let json = serde_json::to_value(board).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["X", "", ""], ["", "O", ""], ["", "", ""]])
        );
    }
}
