/// The seven shapes. The discriminant is the id written into the grid and
/// doubles as the palette index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    L = 1,
    J = 2,
    I = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

pub const ALL_KINDS: [PieceKind; 7] = [
    PieceKind::L,
    PieceKind::J,
    PieceKind::I,
    PieceKind::O,
    PieceKind::S,
    PieceKind::T,
    PieceKind::Z,
];

/// Four cells, each `[row, col]` relative to the piece offset.
pub type Cells = [[i32; 2]; 4];

const L_ROTATIONS: [Cells; 4] = [
    [[0, 2], [1, 0], [1, 1], [1, 2]],
    [[0, 1], [1, 1], [2, 1], [2, 2]],
    [[1, 0], [1, 1], [1, 2], [2, 0]],
    [[0, 0], [0, 1], [1, 1], [2, 1]],
];

const J_ROTATIONS: [Cells; 4] = [
    [[0, 0], [1, 0], [1, 1], [1, 2]],
    [[0, 1], [0, 2], [1, 1], [2, 1]],
    [[1, 0], [1, 1], [1, 2], [2, 2]],
    [[0, 1], [1, 1], [2, 0], [2, 1]],
];

const I_ROTATIONS: [Cells; 4] = [
    [[1, 0], [1, 1], [1, 2], [1, 3]],
    [[0, 2], [1, 2], [2, 2], [3, 2]],
    [[2, 0], [2, 1], [2, 2], [2, 3]],
    [[0, 1], [1, 1], [2, 1], [3, 1]],
];

// The square never rotates.
const O_ROTATIONS: [Cells; 1] = [[[0, 0], [0, 1], [1, 0], [1, 1]]];

const S_ROTATIONS: [Cells; 4] = [
    [[0, 1], [0, 2], [1, 0], [1, 1]],
    [[0, 1], [1, 1], [1, 2], [2, 2]],
    [[1, 1], [1, 2], [2, 0], [2, 1]],
    [[0, 0], [1, 0], [1, 1], [2, 1]],
];

const T_ROTATIONS: [Cells; 4] = [
    [[0, 1], [1, 0], [1, 1], [1, 2]],
    [[0, 1], [1, 1], [1, 2], [2, 1]],
    [[1, 0], [1, 1], [1, 2], [2, 1]],
    [[0, 1], [1, 0], [1, 1], [2, 1]],
];

const Z_ROTATIONS: [Cells; 4] = [
    [[0, 0], [0, 1], [1, 1], [1, 2]],
    [[0, 2], [1, 1], [1, 2], [2, 1]],
    [[1, 0], [1, 1], [2, 1], [2, 2]],
    [[0, 1], [1, 0], [1, 1], [2, 0]],
];

impl PieceKind {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<PieceKind> {
        ALL_KINDS.get(usize::from(id).checked_sub(1)?).copied()
    }

    pub fn rotations(self) -> &'static [Cells] {
        match self {
            PieceKind::L => &L_ROTATIONS,
            PieceKind::J => &J_ROTATIONS,
            PieceKind::I => &I_ROTATIONS,
            PieceKind::O => &O_ROTATIONS,
            PieceKind::S => &S_ROTATIONS,
            PieceKind::T => &T_ROTATIONS,
            PieceKind::Z => &Z_ROTATIONS,
        }
    }

    pub fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// `(row, col)` that centres the shape horizontally. The long piece
    /// starts one row up so its vertical state fits under row 0.
    pub fn spawn_offset(self) -> (i32, i32) {
        match self {
            PieceKind::I => (-1, 3),
            PieceKind::O => (0, 4),
            _ => (0, 3),
        }
    }
}

/// A shape in play: rotation index plus grid offset. Occupied cells are
/// derived on demand so they never go stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    rotation: usize,
    pub pos: (i32, i32),
}

impl Piece {
    pub fn new(kind: PieceKind) -> Self {
        Self::with_rotation(kind, 0, kind.spawn_offset())
    }

    /// `rotation` wraps modulo the shape's state count.
    pub fn with_rotation(kind: PieceKind, rotation: usize, pos: (i32, i32)) -> Self {
        Piece {
            kind,
            rotation: rotation % kind.rotation_count(),
            pos,
        }
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Absolute `(row, col)` of every occupied cell.
    pub fn cells(&self) -> [(i32, i32); 4] {
        let shape = self.kind.rotations()[self.rotation];
        let (row, col) = self.pos;
        shape.map(|[dr, dc]| (row + dr, col + dc))
    }

    /// Unchecked translation; the caller validates and moves back.
    pub fn move_by(&mut self, rows: i32, cols: i32) {
        self.pos = (self.pos.0 + rows, self.pos.1 + cols);
    }

    /// Unchecked; pair with `undo_rotate` on rejection.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.rotation_count();
    }

    pub fn undo_rotate(&mut self) {
        let count = self.kind.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }
}
