use crate::piece::{Color, PieceKind};
use crate::square::{NUM_SQUARES, Square};

/// An ordered sequence of candidate origin squares extending from a
/// target in one fixed direction, nearest square first.
pub type Ray = Vec<Square>;

/// Movers the table distinguishes. Color is irrelevant except for pawns,
/// which are the only pieces with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mover {
    WhitePawn,
    BlackPawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Mover {
    fn of(kind: PieceKind, color: Color) -> Self {
        match kind {
            PieceKind::Pawn => match color {
                Color::White => Self::WhitePawn,
                Color::Black => Self::BlackPawn,
            },
            PieceKind::Knight => Self::Knight,
            PieceKind::Bishop => Self::Bishop,
            PieceKind::Rook => Self::Rook,
            PieceKind::Queen => Self::Queen,
            PieceKind::King => Self::King,
        }
    }
}

/// Reachability table: for every square and mover, the squares from which
/// that mover could reach it on an empty board, partitioned into
/// directional rays sorted by increasing distance.
///
/// Derived purely from board geometry, so it is built once and never
/// mutated. Construct it explicitly and share it by reference across
/// boards; it holds no game state.
#[derive(Debug, Clone)]
pub struct ThreatTable {
    // Indexed by [square][mover].
    rays: Vec<[Vec<Ray>; 7]>,
}

impl ThreatTable {
    pub fn new() -> Self {
        let mut rays = Vec::with_capacity(NUM_SQUARES);
        for target in 0..NUM_SQUARES as i32 {
            rays.push([
                pawn_rays(target, Color::White),
                pawn_rays(target, Color::Black),
                knight_rays(target),
                diagonal_rays(target, 7),
                orthogonal_rays(target, 7),
                queen_rays(target),
                king_rays(target),
            ]);
        }
        Self { rays }
    }

    /// All rays from which `kind` of `color` could reach `target`. For
    /// pawns this includes the advance ray followed by the capture rays;
    /// prefer [`Self::pawn_advance`] and [`Self::pawn_captures`] there.
    pub fn rays(&self, target: Square, kind: PieceKind, color: Color) -> &[Ray] {
        &self.rays[target.index()][Mover::of(kind, color) as usize]
    }

    /// Squares a pawn of `color` could advance to `target` from, nearest
    /// first. Empty when no pawn advance can end on `target`.
    pub fn pawn_advance(&self, target: Square, color: Color) -> &Ray {
        &self.rays(target, PieceKind::Pawn, color)[0]
    }

    /// The up-to-two single-square rays a pawn of `color` could capture
    /// on `target` from. Missing rays mean `target` is on a board edge.
    pub fn pawn_captures(&self, target: Square, color: Color) -> &[Ray] {
        &self.rays(target, PieceKind::Pawn, color)[1..]
    }
}

impl Default for ThreatTable {
    fn default() -> Self {
        Self::new()
    }
}

fn square(index: i32) -> Square {
    Square::new(index as u8).expect("ray construction stays on the board")
}

/// Advance ray plus capture rays for a pawn of the given color.
///
/// The advance ray is always stored first, possibly empty: no pawn can
/// reach the first two ranks from its own side's perspective.
fn pawn_rays(target: i32, color: Color) -> Vec<Ray> {
    let row = target / 8;
    // Forward is +8 for white pawns, -8 for black ones. Pawns never stand
    // on the first two ranks from their own side, so those targets are
    // unreachable altogether.
    let (forward, double_row, reachable) = match color {
        Color::White => (8, 3, row >= 2),
        Color::Black => (-8, 4, row <= 5),
    };
    if !reachable {
        return vec![Ray::new()];
    }

    let single = target - forward;
    let mut advance = vec![square(single)];
    // A double advance always lands on the fourth row from the mover's
    // side.
    if row == double_row {
        advance.push(square(single - forward));
    }

    let mut rays = vec![advance];
    // Diagonal capture origins, skipping the board margins to avoid
    // column wraparound.
    if target % 8 != 0 {
        rays.push(vec![square(single - 1)]);
    }
    if target % 8 != 7 {
        rays.push(vec![square(single + 1)]);
    }
    rays
}

/// The single unordered ray of knight origins; there is no distance
/// concept for knights.
fn knight_rays(target: i32) -> Vec<Ray> {
    let row = target / 8;
    let column = target % 8;
    let mut ray = Ray::new();
    for (row_step, column_step) in [
        (2, 1),
        (2, -1),
        (-2, 1),
        (-2, -1),
        (1, 2),
        (1, -2),
        (-1, 2),
        (-1, -2),
    ] {
        let (r, c) = (row + row_step, column + column_step);
        if (0..8).contains(&r) && (0..8).contains(&c) {
            ray.push(square(r * 8 + c));
        }
    }
    vec![ray]
}

/// One ray per diagonal direction, capped at `max_steps` squares. The cap
/// lets the king reuse the slider geometry with single-step rays.
fn diagonal_rays(target: i32, max_steps: i32) -> Vec<Ray> {
    directional_rays(target, &[(1, 1), (1, -1), (-1, 1), (-1, -1)], max_steps)
}

/// One ray per orthogonal direction, capped at `max_steps` squares.
fn orthogonal_rays(target: i32, max_steps: i32) -> Vec<Ray> {
    directional_rays(target, &[(1, 0), (-1, 0), (0, 1), (0, -1)], max_steps)
}

fn queen_rays(target: i32) -> Vec<Ray> {
    let mut rays = diagonal_rays(target, 7);
    rays.extend(orthogonal_rays(target, 7));
    rays
}

fn king_rays(target: i32) -> Vec<Ray> {
    let mut rays = diagonal_rays(target, 1);
    rays.extend(orthogonal_rays(target, 1));
    rays
}

fn directional_rays(target: i32, directions: &[(i32, i32)], max_steps: i32) -> Vec<Ray> {
    let mut rays = Vec::new();
    for &(row_step, column_step) in directions {
        let mut ray = Ray::new();
        let mut row = target / 8 + row_step;
        let mut column = target % 8 + column_step;
        let mut steps = 0;
        while (0..8).contains(&row) && (0..8).contains(&column) && steps < max_steps {
            ray.push(square(row * 8 + column));
            row += row_step;
            column += column_step;
            steps += 1;
        }
        if !ray.is_empty() {
            rays.push(ray);
        }
    }
    rays
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square name")
    }

    fn names(ray: &Ray) -> Vec<String> {
        ray.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn white_pawn_rays_to_e4() {
        let table = ThreatTable::new();
        // Advance from e3 or, being a double step to the fourth rank, e2.
        assert_eq!(names(table.pawn_advance(sq("e4"), Color::White)), ["e3", "e2"]);
        let captures = table.pawn_captures(sq("e4"), Color::White);
        assert_eq!(captures.len(), 2);
        assert_eq!(names(&captures[0]), ["d3"]);
        assert_eq!(names(&captures[1]), ["f3"]);
    }

    #[test]
    fn black_pawn_rays_to_d5() {
        let table = ThreatTable::new();
        assert_eq!(names(table.pawn_advance(sq("d5"), Color::Black)), ["d6", "d7"]);
        let captures = table.pawn_captures(sq("d5"), Color::Black);
        assert_eq!(captures.len(), 2);
        assert_eq!(names(&captures[0]), ["c6"]);
        assert_eq!(names(&captures[1]), ["e6"]);
    }

    #[test]
    fn pawn_rays_empty_on_back_ranks() {
        let table = ThreatTable::new();
        assert!(table.pawn_advance(sq("e1"), Color::White).is_empty());
        assert!(table.pawn_captures(sq("e1"), Color::White).is_empty());
        assert!(table.pawn_advance(sq("h8"), Color::Black).is_empty());
        assert!(table.pawn_captures(sq("h8"), Color::Black).is_empty());
    }

    #[test]
    fn edge_pawn_has_single_capture_ray() {
        let table = ThreatTable::new();
        let captures = table.pawn_captures(sq("a4"), Color::White);
        assert_eq!(captures.len(), 1);
        assert_eq!(names(&captures[0]), ["b3"]);
    }

    #[test]
    fn knight_origins_are_one_unordered_ray() {
        let table = ThreatTable::new();
        let rays = table.rays(sq("e4"), PieceKind::Knight, Color::White);
        assert_eq!(rays.len(), 1);
        assert_eq!(rays[0].len(), 8);

        // Corner targets lose the off-board offsets.
        let corner = table.rays(sq("a1"), PieceKind::Knight, Color::White);
        let mut got = names(&corner[0]);
        got.sort();
        assert_eq!(got, ["b3", "c2"]);
    }

    #[test]
    fn rook_rays_stop_at_board_edge_without_wraparound() {
        let table = ThreatTable::new();
        let rays = table.rays(sq("a1"), PieceKind::Rook, Color::White);
        // Only two directions leave the corner.
        assert_eq!(rays.len(), 2);
        for ray in rays {
            assert_eq!(ray.len(), 7);
            // Every square shares a and/or rank 1 with the corner.
            for s in ray {
                assert!(s.row() == 0 || s.column() == 0);
            }
        }
    }

    #[test]
    fn slider_rays_are_sorted_nearest_first() {
        let table = ThreatTable::new();
        for ray in table.rays(sq("d4"), PieceKind::Queen, Color::White) {
            let distances: Vec<i32> = ray
                .iter()
                .map(|s| {
                    let dr = (s.row() as i32 - 3).abs();
                    let dc = (s.column() as i32 - 3).abs();
                    dr.max(dc)
                })
                .collect();
            let mut sorted = distances.clone();
            sorted.sort();
            assert_eq!(distances, sorted);
        }
    }

    #[test]
    fn king_rays_are_length_capped_at_one() {
        let table = ThreatTable::new();
        let rays = table.rays(sq("d4"), PieceKind::King, Color::White);
        assert_eq!(rays.len(), 8);
        assert!(rays.iter().all(|ray| ray.len() == 1));
    }

    #[test]
    fn bishop_rays_from_center() {
        let table = ThreatTable::new();
        let rays = table.rays(sq("d4"), PieceKind::Bishop, Color::Black);
        assert_eq!(rays.len(), 4);
        let total: usize = rays.iter().map(Vec::len).sum();
        assert_eq!(total, 13);
    }
}
