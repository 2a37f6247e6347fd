//! Falling-block puzzle game. The engine (`tetromino`, `grid`, `bag`,
//! `game`) is backend-free; `input`, `render`, `audio` and `frame` adapt it
//! to a macroquad window and a rodio output.

pub mod audio;
pub mod bag;
pub mod config;
pub mod frame;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod tetromino;

pub use bag::PieceBag;
pub use game::{Action, GameEvent, GameSession, PlayState};
pub use grid::{Cell, Grid, COLS, ROWS};
pub use tetromino::{Piece, PieceKind, ALL_KINDS};
