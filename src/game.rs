use crate::bag::PieceBag;
use crate::grid::{Grid, ROWS};
use crate::tetromino::{Piece, PieceKind};

/// Simulated seconds between gravity steps.
pub const GRAVITY_INTERVAL: f32 = 0.5;

/// Points per soft-drop step.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Discrete player commands, already decoupled from keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    TogglePause,
    Rotate,
    MoveLeft,
    MoveRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
    GameOver,
}

/// Side effects the frontend reacts to (sounds, logs).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Rotated,
    PauseToggled { paused: bool },
    Locked(PieceKind),
    RowCleared(usize),
    GameOver { score: u32 },
    Restarted,
}

pub fn score_for_lines(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1 => 100,
        2 => 300,
        _ => 500,
    }
}

pub fn is_outside_bounds(piece: &Piece) -> bool {
    piece
        .cells()
        .iter()
        .any(|&(row, col)| !Grid::in_bounds(row, col))
}

/// Every cell in bounds and unoccupied. Bounds are checked first.
pub fn fits(grid: &Grid, piece: &Piece) -> bool {
    !is_outside_bounds(piece) && piece.cells().iter().all(|&(row, col)| grid.is_empty(row, col))
}

/// Rotates in place if the new state is legal. Returns whether it stuck.
pub fn try_rotate(grid: &Grid, piece: &mut Piece) -> bool {
    piece.rotate();
    if !fits(grid, piece) {
        piece.undo_rotate();
        return false;
    }
    true
}

pub fn try_move(grid: &Grid, piece: &mut Piece, rows: i32, cols: i32) -> bool {
    piece.move_by(rows, cols);
    if !fits(grid, piece) {
        piece.move_by(-rows, -cols);
        return false;
    }
    true
}

/// Single bottom-up pass: full rows are emptied, every other row drops by
/// the number of full rows found beneath it so far. Calls `on_clear` with
/// each cleared row index. Returns the number of rows cleared.
pub fn clear_full_lines(grid: &mut Grid, mut on_clear: impl FnMut(usize)) -> usize {
    let mut cleared = 0;
    for row in (0..ROWS).rev() {
        if grid.is_row_full(row) {
            grid.clear_row(row);
            cleared += 1;
            on_clear(row);
        } else if cleared > 0 {
            grid.shift_row_down(row, cleared);
        }
    }
    cleared
}

/// The whole mutable state of one run of the game.
pub struct GameSession {
    grid: Grid,
    current: Piece,
    next: Piece,
    bag: PieceBag,
    score: u32,
    paused: bool,
    game_over: bool,
    gravity_timer: f32,
    events: Vec<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::from_bag(PieceBag::new())
    }

    /// Deterministic piece order.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_bag(PieceBag::seeded(seed))
    }

    fn from_bag(mut bag: PieceBag) -> Self {
        let current = Piece::new(bag.next());
        let next = Piece::new(bag.next());
        GameSession {
            grid: Grid::new(),
            current,
            next,
            bag,
            score: 0,
            paused: false,
            game_over: false,
            gravity_timer: 0.0,
            events: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct access for board setups.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Piece {
        &mut self.current
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Replaces the piece waiting to spawn.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = Piece::new(kind);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn state(&self) -> PlayState {
        if self.game_over {
            PlayState::GameOver
        } else if self.paused {
            PlayState::Paused
        } else {
            PlayState::Playing
        }
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Applies one key-down or button-down. A press while the game is over
    /// restarts first; the mapped action (if any) then runs as usual.
    pub fn handle_press(&mut self, action: Option<Action>) {
        if self.game_over {
            self.reset();
        }
        let Some(action) = action else { return };
        match action {
            Action::TogglePause => {
                self.paused = !self.paused;
                log::debug!("pause toggled: {}", self.paused);
                self.events.push(GameEvent::PauseToggled {
                    paused: self.paused,
                });
            }
            Action::Rotate => {
                try_rotate(&self.grid, &mut self.current);
                self.events.push(GameEvent::Rotated);
            }
            Action::MoveLeft => {
                try_move(&self.grid, &mut self.current, 0, -1);
            }
            Action::MoveRight => {
                try_move(&self.grid, &mut self.current, 0, 1);
            }
        }
    }

    /// Per-frame physics. Does nothing while paused or over.
    pub fn update(&mut self, dt: f32, soft_drop_held: bool) {
        if self.paused {
            return;
        }
        if !self.game_over && soft_drop_held {
            self.score += SOFT_DROP_POINTS;
            self.step_down();
        }
        if !self.game_over && self.gravity_elapsed(dt) {
            self.step_down();
        }
    }

    fn gravity_elapsed(&mut self, dt: f32) -> bool {
        self.gravity_timer += dt;
        if self.gravity_timer >= GRAVITY_INTERVAL {
            self.gravity_timer = 0.0;
            return true;
        }
        false
    }

    /// Moves the current piece one row down, or locks it where it is when
    /// that is not possible. Returns whether the piece moved.
    pub fn step_down(&mut self) -> bool {
        if try_move(&self.grid, &mut self.current, 1, 0) {
            return true;
        }
        self.lock_and_advance();
        false
    }

    /// Writes the current piece into the grid, promotes the next piece,
    /// clears full rows and scores them. Returns the number of rows cleared.
    pub fn lock_and_advance(&mut self) -> usize {
        let locked = self.current;
        self.grid.lock_cells(&locked.cells(), locked.kind);
        self.events.push(GameEvent::Locked(locked.kind));

        self.current = self.next;
        // Spawn is checked before rows clear.
        let topped_out = !fits(&self.grid, &self.current);
        if topped_out {
            self.game_over = true;
        }
        self.next = Piece::new(self.bag.next());

        let events = &mut self.events;
        let cleared = clear_full_lines(&mut self.grid, |row| {
            events.push(GameEvent::RowCleared(row));
        });
        if cleared > 0 {
            log::debug!("cleared {cleared} rows");
        }
        self.score += score_for_lines(cleared);
        if topped_out {
            log::info!(
                "game over, final score {}, {} cells filled",
                self.score,
                self.grid.occupied_count()
            );
            self.events.push(GameEvent::GameOver { score: self.score });
        }
        cleared
    }

    /// Fresh board, zero score, two new pieces.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.game_over = false;
        self.score = 0;
        self.gravity_timer = 0.0;
        self.current = Piece::new(self.bag.next());
        self.next = Piece::new(self.bag.next());
        log::info!("restarted");
        self.events.push(GameEvent::Restarted);
    }
}
