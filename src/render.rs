use std::path::Path;

use anyhow::{anyhow, Result};
use macroquad::prelude::*;

use crate::game::{GameSession, PlayState};
use crate::grid::{COLS, ROWS};
use crate::tetromino::{Piece, PieceKind};

pub const CELL_SIZE: f32 = 30.0;
const BOARD_MARGIN: f32 = 4.0;
const CELL_GAP: f32 = 2.0;
const PANEL_WIDTH: f32 = 200.0;
const FONT_SIZE: u16 = 36;

pub const WINDOW_WIDTH: i32 = (COLS as f32 * CELL_SIZE + PANEL_WIDTH) as i32;
pub const WINDOW_HEIGHT: i32 = (ROWS as f32 * CELL_SIZE + BOARD_MARGIN) as i32;

const BACKGROUND: Color = Color::new(29.0 / 255.0, 29.0 / 255.0, 27.0 / 255.0, 1.0);
const PANEL_BOX: Color = Color::new(80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0, 1.0);

// Panel layout: text anchors are top-left corners, boxes are (x, y, w, h).
const SCORE_LABEL_POS: (f32, f32) = (365.0, 15.0);
const SCORE_BOX: (f32, f32, f32, f32) = (315.0, 55.0, 170.0, 60.0);
const SCORE_VALUE_POS: (f32, f32) = (365.0, 65.0);
const NEXT_LABEL_POS: (f32, f32) = (370.0, 175.0);
const NEXT_BOX: (f32, f32, f32, f32) = (315.0, 215.0, 170.0, 180.0);
const STATUS_POS: (f32, f32) = (330.0, 450.0);

/// Index 0 is the empty cell, 1..=7 follow `PieceKind` ids.
pub const PALETTE: [Color; 8] = [
    Color::new(80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0, 1.0),
    Color::new(47.0 / 255.0, 230.0 / 255.0, 23.0 / 255.0, 1.0),
    Color::new(232.0 / 255.0, 18.0 / 255.0, 18.0 / 255.0, 1.0),
    Color::new(226.0 / 255.0, 116.0 / 255.0, 17.0 / 255.0, 1.0),
    Color::new(237.0 / 255.0, 234.0 / 255.0, 4.0 / 255.0, 1.0),
    Color::new(166.0 / 255.0, 0.0, 247.0 / 255.0, 1.0),
    Color::new(21.0 / 255.0, 204.0 / 255.0, 209.0 / 255.0, 1.0),
    Color::new(13.0 / 255.0, 64.0 / 255.0, 216.0 / 255.0, 1.0),
];

pub fn color_of(cell: Option<PieceKind>) -> Color {
    PALETTE[cell.map_or(0, |kind| usize::from(kind.id()))]
}

/// Screen rectangle of a grid cell with the given pixel origin.
pub fn cell_rect(row: i32, col: i32, origin: Vec2) -> Rect {
    Rect::new(
        col as f32 * CELL_SIZE + origin.x,
        row as f32 * CELL_SIZE + origin.y,
        CELL_SIZE - CELL_GAP,
        CELL_SIZE - CELL_GAP,
    )
}

/// Where the preview piece is anchored so it sits inside the next box.
pub fn preview_origin(kind: PieceKind) -> Vec2 {
    match kind {
        PieceKind::I => vec2(255.0, 290.0),
        PieceKind::O => vec2(255.0, 280.0),
        _ => vec2(275.0, 270.0),
    }
}

pub fn status_text(session: &GameSession) -> Option<&'static str> {
    match session.state() {
        PlayState::Playing => None,
        PlayState::Paused => Some("Game Paused"),
        PlayState::GameOver => Some("Game Over"),
    }
}

/// Read-only view of a session. Holds the optional custom font.
pub struct Renderer {
    font: Option<Font>,
}

impl Renderer {
    /// A missing font falls back to the built-in one.
    pub async fn load(font_path: &Path) -> Self {
        let font = match load_font(font_path).await {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("{err:#}, using built-in font");
                None
            }
        };
        Renderer { font }
    }

    pub fn draw(&self, session: &GameSession) {
        clear_background(BACKGROUND);

        let board_origin = vec2(BOARD_MARGIN, BOARD_MARGIN);
        for (row, cells) in session.grid().rows().iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                fill(cell_rect(row as i32, col as i32, board_origin), color_of(cell));
            }
        }
        draw_piece(session.current(), board_origin);

        self.text("Score", SCORE_LABEL_POS);
        fill_box(SCORE_BOX);
        self.text(&session.score().to_string(), SCORE_VALUE_POS);

        self.text("Next", NEXT_LABEL_POS);
        fill_box(NEXT_BOX);
        // The preview keeps its spawn offset; the origins account for it.
        let next = session.next_piece();
        draw_piece(next, preview_origin(next.kind));

        if let Some(status) = status_text(session) {
            self.text(status, STATUS_POS);
        }
    }

    /// `top_left` is the top edge of the text, not its baseline.
    fn text(&self, text: &str, (x, y): (f32, f32)) {
        let dims = measure_text(text, self.font.as_ref(), FONT_SIZE, 1.0);
        draw_text_ex(
            text,
            x,
            y + dims.offset_y,
            TextParams {
                font: self.font.as_ref(),
                font_size: FONT_SIZE,
                color: WHITE,
                ..Default::default()
            },
        );
    }
}

async fn load_font(path: &Path) -> Result<Font> {
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("font path {} is not valid UTF-8", path.display()))?;
    load_ttf_font(path_str)
        .await
        .map_err(|err| anyhow!("loading font {path_str}: {err:?}"))
}

fn fill(rect: Rect, color: Color) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
}

fn fill_box((x, y, w, h): (f32, f32, f32, f32)) {
    draw_rectangle(x, y, w, h, PANEL_BOX);
}

fn draw_piece(piece: &Piece, origin: Vec2) {
    let color = color_of(Some(piece.kind));
    for (row, col) in piece.cells() {
        fill(cell_rect(row, col, origin), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fits_board_and_panel() {
        assert_eq!(WINDOW_WIDTH, 500);
        assert_eq!(WINDOW_HEIGHT, 544);
    }

    #[test]
    fn empty_cells_use_grey() {
        assert_eq!(color_of(None), PALETTE[0]);
        assert_eq!(color_of(Some(PieceKind::Z)), PALETTE[7]);
    }

    #[test]
    fn cell_rect_leaves_a_gap() {
        let rect = cell_rect(2, 3, vec2(BOARD_MARGIN, BOARD_MARGIN));
        assert_eq!(rect, Rect::new(94.0, 64.0, 28.0, 28.0));
    }

    #[test]
    fn status_follows_state() {
        let mut session = GameSession::with_seed(5);
        assert_eq!(status_text(&session), None);
        session.handle_press(Some(crate::game::Action::TogglePause));
        assert_eq!(status_text(&session), Some("Game Paused"));
        session.handle_press(Some(crate::game::Action::TogglePause));

        // Spawn cell taken, current piece resting on the floor.
        session.set_next(PieceKind::O);
        session.grid_mut().set(0, 4, Some(PieceKind::L));
        *session.current_mut() = Piece::new(PieceKind::O);
        session.current_mut().move_by(16, 0);
        assert!(!session.step_down());
        assert_eq!(status_text(&session), Some("Game Over"));
    }
}
