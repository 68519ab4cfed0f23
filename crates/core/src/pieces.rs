//! Pieces module - shape matrices, the piece catalog, and the active piece
//!
//! Shapes are small boolean matrices. Rotation is a plain clockwise matrix
//! rotation (transpose + reverse rows) anchored at the shape origin; there is
//! no rotation system or kick table.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

/// Largest number of cells a shape matrix may hold
pub const MAX_SHAPE_CELLS: usize = 16;

/// Immutable boolean matrix describing a piece footprint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major filled flags
    cells: ArrayVec<bool, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Build a shape from rows of 0/1 flags
    ///
    /// # Panics
    ///
    /// Panics on an empty, ragged, or oversized matrix.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(width > 0 && height > 0, "empty shape");
        assert!(width * height <= MAX_SHAPE_CELLS, "shape too large");

        let mut cells = ArrayVec::new();
        for row in rows {
            assert_eq!(row.len(), width, "ragged shape");
            cells.extend(row.iter().map(|&v| v != 0));
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width() + col]
    }

    /// Offsets `(dx, dy)` of every filled cell relative to the shape origin
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }

    /// Number of filled cells
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rotate 90° clockwise
    ///
    /// Cell `(r, c)` of the result is cell `(h - 1 - c, r)` of the source, so a
    /// `w x h` shape becomes `h x w`.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut cells = ArrayVec::new();
        for r in 0..w {
            for c in 0..h {
                cells.push(self.is_filled(h - 1 - c, r));
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Shape templates in catalog order, paired with their colors
const TEMPLATES: [(PieceKind, &[&[u8]], Color); PieceKind::LEN] = [
    (PieceKind::T, &[&[1, 1, 1], &[0, 1, 0]], Color::RED),
    (PieceKind::I, &[&[1, 1, 1, 1]], Color::GREEN),
    (PieceKind::O, &[&[1, 1], &[1, 1]], Color::BLUE),
    (PieceKind::S, &[&[0, 1, 1], &[1, 1, 0]], Color::YELLOW),
    (PieceKind::Z, &[&[1, 1, 0], &[0, 1, 1]], Color::MAGENTA),
    (PieceKind::L, &[&[1, 1, 1], &[1, 0, 0]], Color::CYAN),
    (PieceKind::J, &[&[1, 1, 1], &[0, 0, 1]], Color::WHITE),
];

/// Get the spawn shape for a piece kind
pub fn template(kind: PieceKind) -> Shape {
    let (_, rows, _) = TEMPLATES[kind.index()];
    Shape::from_rows(rows)
}

/// Get the color associated with a piece kind
pub fn color_of(kind: PieceKind) -> Color {
    TEMPLATES[kind.index()].2
}

/// Pick a catalog entry uniformly at random
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
}

/// Draw a piece uniformly at random from the catalog
///
/// Draws are independent; the same kind may repeat.
pub fn random_piece<R: Rng + ?Sized>(rng: &mut R) -> ActivePiece {
    ActivePiece::new(random_kind(rng))
}

/// Spawn column for a board `cols` wide
///
/// Centers a four-wide footprint, leaning left: 3 on the default 10-wide board.
pub fn spawn_column(cols: usize) -> i32 {
    (cols.saturating_sub(4) / 2) as i32
}

/// The currently falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Create a piece of the given kind at the default spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece of the given kind with its origin at `(x, y)`
    pub fn at(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: template(kind),
            color: color_of(kind),
            x,
            y,
        }
    }

    /// Absolute `(x, y)` of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(template(kind).len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // ###      #.
        // .#.  ->  ##
        //          #.
        let rotated = template(PieceKind::T).rotated_cw();
        assert_eq!(rotated, Shape::from_rows(&[&[0, 1], &[1, 1], &[0, 1]]));
    }

    #[test]
    fn test_rotate_i_swaps_dimensions() {
        let rotated = template(PieceKind::I).rotated_cw();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
        assert_eq!(rotated.len(), 4);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let shape = template(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_random_piece_spawns_at_default_position() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let piece = random_piece(&mut rng);
            assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
            assert_eq!(piece.shape, template(piece.kind));
            assert_eq!(piece.color, color_of(piece.kind));
        }
    }

    #[test]
    fn test_random_piece_reaches_every_kind() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            seen[random_piece(&mut rng).kind.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_spawn_column() {
        assert_eq!(spawn_column(10), SPAWN_X);
        assert_eq!(spawn_column(4), 0);
        assert_eq!(spawn_column(3), 0);
        assert_eq!(spawn_column(12), 4);
    }

    #[test]
    #[should_panic(expected = "empty shape")]
    fn test_empty_shape_is_rejected() {
        Shape::from_rows(&[]);
    }
}
