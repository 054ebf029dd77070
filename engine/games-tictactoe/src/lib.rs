//! TicTacToe reference implementation of the game contract
//!
//! This crate provides a complete 3x3 TicTacToe game implementing the
//! `mcts-core` `GameState` trait, demonstrating how to plug a game into the
//! search engine. X is the self side: rollout scores are X's win
//! probability.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::{Place, TicTacToe, X};
//! use mcts_core::GameState;
//!
//! let state = TicTacToe::new();
//! let next = state.apply(&Place::new(1, 1, X)).expect("center is legal");
//! assert_eq!(next.cell(1, 1), X);
//! ```

use std::cell::RefCell;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use mcts_core::GameState;

/// Mark of the first player; the self side.
pub const X: u8 = 1;
/// Mark of the second player.
pub const O: u8 = 2;
/// Winner value for a drawn game.
pub const DRAW: u8 = 3;

/// Winning positions (rows, columns, diagonals).
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

thread_local! {
    static PLAYOUT_RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_entropy());
}

fn other(player: u8) -> u8 {
    if player == X {
        O
    } else {
        X
    }
}

fn mark(player: u8) -> char {
    match player {
        X => 'x',
        O => 'o',
        _ => '.',
    }
}

/// A placement move: board coordinates plus the mark being placed.
///
/// The player is part of the move's value so that a caller-supplied enemy
/// move matches the engine's stored edge exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Place {
    row: u8,
    col: u8,
    player: u8,
}

impl Place {
    pub fn new(row: u8, col: u8, player: u8) -> Self {
        Self { row, col, player }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn player(&self) -> u8 {
        self.player
    }

    fn index(&self) -> usize {
        self.row as usize * 3 + self.col as usize
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.row, self.col, mark(self.player))
    }
}

/// TicTacToe game state
///
/// Represents the complete state of a game: the board, the player to move,
/// and the winner once the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Player to move: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl TicTacToe {
    /// Create an empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: X,
            winner: 0,
        }
    }

    /// Create a state from an arbitrary board position.
    ///
    /// The winner is derived from the board; no move-parity validation is
    /// performed, so test positions can be set up freely.
    pub fn with_board(board: [u8; 9], current_player: u8) -> Self {
        Self {
            board,
            current_player,
            winner: Self::check_winner(&board),
        }
    }

    /// The mark at `(row, col)`: 0, `X` or `O`.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.board[row * 3 + col]
    }

    /// Number of cells holding `player`'s mark.
    pub fn marks(&self, player: u8) -> usize {
        self.board.iter().filter(|&&cell| cell == player).count()
    }

    /// Winner: 0 while ongoing, `X`, `O`, or `DRAW`.
    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Player to move.
    pub fn current_player(&self) -> u8 {
        self.current_player
    }

    /// Check for a winner on the board.
    fn check_winner(board: &[u8; 9]) -> u8 {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a];
            }
        }

        if board.iter().all(|&cell| cell != 0) {
            return DRAW;
        }

        0
    }

    fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&pos| self.board[pos] == 0).collect()
    }

    /// Successor after the current player marks `pos`. Callers guarantee
    /// `pos` is empty and the game is live.
    fn advanced(&self, pos: usize) -> Self {
        let mut next = *self;
        next.board[pos] = self.current_player;
        next.winner = Self::check_winner(&next.board);
        if next.winner == 0 {
            next.current_player = other(self.current_player);
        }
        next
    }

    /// Whether marking `pos` with `player` would complete a line.
    fn would_win(&self, pos: usize, player: u8) -> bool {
        let mut board = self.board;
        board[pos] = player;
        Self::check_winner(&board) == player
    }

    /// Terminal score from X's point of view.
    fn terminal_score(&self) -> f64 {
        match self.winner {
            w if w == X => 1.0,
            DRAW => 0.5,
            _ => 0.0,
        }
    }

    /// Move ordering for guided playouts: win, block, center, corner, edge.
    fn heuristic_choice(&self) -> usize {
        let empties = self.empty_cells();
        let me = self.current_player;
        let opponent = other(me);

        if let Some(&pos) = empties.iter().find(|&&pos| self.would_win(pos, me)) {
            return pos;
        }
        if let Some(&pos) = empties.iter().find(|&&pos| self.would_win(pos, opponent)) {
            return pos;
        }
        if empties.contains(&CENTER) {
            return CENTER;
        }
        if let Some(&pos) = empties.iter().find(|&&pos| CORNERS.contains(&pos)) {
            return pos;
        }
        empties[0]
    }

    /// Lines that `player` could still complete (no opposing mark on them).
    fn open_lines(&self, player: u8) -> u32 {
        let opponent = other(player);
        LINES
            .iter()
            .filter(|line| line.iter().all(|&pos| self.board[pos] != opponent))
            .count() as u32
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, " {}", mark(self.cell(row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for TicTacToe {
    type Move = Place;

    fn legal_moves(&self) -> Vec<Place> {
        if self.winner != 0 {
            return Vec::new();
        }
        self.empty_cells()
            .into_iter()
            .map(|pos| Place::new((pos / 3) as u8, (pos % 3) as u8, self.current_player))
            .collect()
    }

    fn apply(&self, mv: &Place) -> Option<Self> {
        if self.winner != 0
            || mv.player != self.current_player
            || mv.row >= 3
            || mv.col >= 3
            || self.board[mv.index()] != 0
        {
            return None;
        }
        Some(self.advanced(mv.index()))
    }

    fn is_terminal(&self) -> bool {
        self.winner != 0
    }

    fn self_side_to_move(&self) -> bool {
        self.current_player == X
    }

    fn rollout(&self) -> f64 {
        if self.is_terminal() {
            return self.terminal_score();
        }
        let mut state = *self;
        PLAYOUT_RNG.with(|rng| {
            let mut rng = rng.borrow_mut();
            while !state.is_terminal() {
                let empties = state.empty_cells();
                let pos = empties[rng.gen_range(0..empties.len())];
                state = state.advanced(pos);
            }
        });
        state.terminal_score()
    }

    fn heuristic_rollout(&self) -> f64 {
        if self.is_terminal() {
            return self.terminal_score();
        }
        let mut state = *self;
        while !state.is_terminal() {
            state = state.advanced(state.heuristic_choice());
        }
        state.terminal_score()
    }

    fn evaluate_move(&self, mv: &Place) -> f64 {
        let pos = mv.index();
        if self.would_win(pos, self.current_player) {
            return 1.0;
        }
        if self.would_win(pos, other(self.current_player)) {
            return 0.8;
        }
        if pos == CENTER {
            return 0.6;
        }
        if CORNERS.contains(&pos) {
            return 0.4;
        }
        0.2
    }

    fn evaluate_position(&self) -> f64 {
        if self.is_terminal() {
            return self.terminal_score();
        }
        let x_lines = self.open_lines(X) as f64;
        let o_lines = self.open_lines(O) as f64;
        if x_lines + o_lines == 0.0 {
            return 0.5;
        }
        x_lines / (x_lines + o_lines)
    }
}
