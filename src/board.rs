use std::fmt::Write as _;

use log::{debug, trace};

use crate::error::ReplayError;
use crate::notation::{CastleSide, Qualifier, San, parse_san};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::{NUM_SQUARES, Square};
use crate::threats::ThreatTable;

/// Per-color, per-side castling availability. Flags only ever go from
/// true to false over the lifetime of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    const ALL: Self = Self {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    const NONE: Self = Self {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const fn any(self) -> bool {
        self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside
    }

    fn revoke_both(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Revoke the single right tied to a rook leaving its home corner.
    /// Keyed by origin index alone; whether the corner still held the
    /// original rook is irrelevant.
    fn revoke_for_rook_origin(&mut self, color: Color, origin: Square) {
        match (color, origin.index()) {
            (Color::White, 7) => self.white_kingside = false,
            (Color::White, 0) => self.white_queenside = false,
            (Color::Black, 63) => self.black_kingside = false,
            (Color::Black, 56) => self.black_queenside = false,
            _ => {}
        }
    }

    /// FEN castling field: `KQkq` subset in that fixed order, `-` if none.
    fn fen_field(self) -> String {
        if !self.any() {
            return "-".to_string();
        }
        let mut field = String::new();
        for (flag, letter) in [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ] {
            if flag {
                field.push(letter);
            }
        }
        field
    }
}

/// A 64-square chess position with the derived state needed to replay
/// algebraic notation: cached king locations (for pin detection and
/// castling), castling-rights flags and the side to move.
///
/// A board is mutated in place, one [`Board::play`] call per move, in the
/// order moves were played. Cloning is a deep value copy, so a clone can
/// branch off (say, to print a diagram per move) without aliasing the
/// running position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
    white_king: Square,
    black_king: Square,
    castling: CastlingRights,
    turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        use PieceKind::*;
        let white = |kind| Some(Piece::new(Color::White, kind));
        let black = |kind| Some(Piece::new(Color::Black, kind));

        let mut squares = [None; NUM_SQUARES];
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (column, &kind) in back_rank.iter().enumerate() {
            squares[column] = white(kind);
            squares[8 + column] = white(Pawn);
            squares[48 + column] = black(Pawn);
            squares[56 + column] = black(kind);
        }

        Self {
            squares,
            white_king: "e1".parse().expect("valid square"),
            black_king: "e8".parse().expect("valid square"),
            castling: CastlingRights::ALL,
            turn: Color::White,
        }
    }
}

impl Board {
    /// The standard initial arrangement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a FEN string.
    ///
    /// Only the placement field is required; the side-to-move and
    /// castling fields are honored when present and any further standard
    /// fields are ignored. Both kings must be present.
    pub fn from_fen(fen: &str) -> Result<Self, ReplayError> {
        let malformed = || ReplayError::MalformedNotation(fen.to_string());
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(malformed)?;

        let mut squares = [None; NUM_SQUARES];
        // FEN lists ranks top-down, so start writing at a8.
        let mut index: usize = 56;
        for c in placement.chars() {
            match c {
                '/' => index = index.checked_sub(16).ok_or_else(malformed)?,
                '1'..='8' => index += c as usize - '0' as usize,
                _ => {
                    let piece = Piece::from_fen_char(c).ok_or_else(malformed)?;
                    if index >= NUM_SQUARES {
                        return Err(malformed());
                    }
                    squares[index] = Some(piece);
                    index += 1;
                }
            }
        }

        let turn = match fields.next() {
            Some("w") | None => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(malformed()),
        };

        let castling = match fields.next() {
            None => CastlingRights::ALL,
            Some(field) => {
                let mut rights = CastlingRights::NONE;
                for c in field.chars() {
                    match c {
                        'K' => rights.white_kingside = true,
                        'Q' => rights.white_queenside = true,
                        'k' => rights.black_kingside = true,
                        'q' => rights.black_queenside = true,
                        '-' => {}
                        _ => return Err(malformed()),
                    }
                }
                rights
            }
        };

        let find_king = |color: Color| {
            squares
                .iter()
                .position(|&p| p == Some(Piece::new(color, PieceKind::King)))
                .and_then(|i| Square::new(i as u8))
                .ok_or_else(malformed)
        };

        Ok(Self {
            squares,
            white_king: find_king(Color::White)?,
            black_king: find_king(Color::Black)?,
            castling,
            turn,
        })
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Cached location of `color`'s king.
    #[inline]
    pub fn king(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    fn set_king(&mut self, color: Color, square: Square) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }

    /// Decode and apply one move played by `color`.
    ///
    /// Convenience over [`parse_san`] + [`Board::play`].
    pub fn play_san(
        &mut self,
        table: &ThreatTable,
        color: Color,
        text: &str,
    ) -> Result<(), ReplayError> {
        let san = parse_san(text)?;
        self.play(table, color, &san)
    }

    /// Apply one decoded move played by `color`, resolving which piece
    /// moved against the current position.
    ///
    /// On error the board is unchanged; on success the side to move has
    /// flipped to `color`'s opponent.
    pub fn play(
        &mut self,
        table: &ThreatTable,
        color: Color,
        san: &San,
    ) -> Result<(), ReplayError> {
        match *san {
            San::Castle(side) => self.castle(color, side),
            San::Normal {
                kind,
                qualifier,
                capture,
                target,
                promotion,
            } => {
                let origin = self.resolve_origin(table, kind, color, target, qualifier, capture)?;
                debug!("{color:?} {kind} {origin} -> {target}");
                self.apply_normal(color, kind, origin, target, capture, promotion);
            }
        }
        self.turn = color.opposite();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Origin resolution
    // ------------------------------------------------------------------

    /// Determine the unique origin square of a move, given everything the
    /// notation states about it.
    ///
    /// Pin-filtering is applied before qualifier-filtering: notation is
    /// never required to disambiguate against a pinned piece, so when
    /// several candidates are found the pinned ones are dropped first. A
    /// sole candidate is accepted even if pinned, since move legality is
    /// trusted.
    fn resolve_origin(
        &self,
        table: &ThreatTable,
        kind: PieceKind,
        color: Color,
        target: Square,
        qualifier: Qualifier,
        capture: bool,
    ) -> Result<Square, ReplayError> {
        let mut pool = self.candidates(table, kind, color, target, capture);
        trace!("{kind} candidates for {target}: {pool:?}");

        // Pawn capture ambiguity is always settled by the mandatory file
        // letter, so pawns never need the pin filter.
        if pool.len() > 1 && kind != PieceKind::Pawn {
            let unpinned: Vec<Square> = pool
                .iter()
                .copied()
                .filter(|&sq| !self.is_pinned(table, sq, target))
                .collect();
            if !unpinned.is_empty() {
                pool = unpinned;
            }
        }

        if !qualifier.is_empty() {
            pool.retain(|&sq| qualifier.matches(sq));
        }

        match pool.len() {
            1 => Ok(pool[0]),
            0 => Err(ReplayError::NoOrigin { kind, target }),
            _ => Err(ReplayError::AmbiguousOrigin {
                kind,
                target,
                candidates: pool,
            }),
        }
    }

    /// Collect every square occupied by a matching piece that could reach
    /// `target`, scanning each precomputed ray nearest-to-farthest.
    ///
    /// A ray stops at its first occupied square: a piece beyond an
    /// occupant cannot reach the target along that ray. Knight rays have
    /// no such blocking, and pawn rays are selected by the capture flag.
    fn candidates(
        &self,
        table: &ThreatTable,
        kind: PieceKind,
        color: Color,
        target: Square,
        capture: bool,
    ) -> Vec<Square> {
        let wanted = Piece::new(color, kind);
        let mut found = Vec::new();

        match kind {
            PieceKind::Pawn if capture => {
                for ray in table.pawn_captures(target, color) {
                    for &sq in ray {
                        if self.piece_at(sq) == Some(wanted) {
                            found.push(sq);
                        }
                    }
                }
            }
            PieceKind::Pawn => {
                for &sq in table.pawn_advance(target, color) {
                    match self.piece_at(sq) {
                        Some(p) if p == wanted => {
                            found.push(sq);
                            break;
                        }
                        // An occupant in front of the pawn blocks the
                        // advance entirely.
                        Some(_) => break,
                        None => {}
                    }
                }
            }
            PieceKind::Knight => {
                for ray in table.rays(target, kind, color) {
                    for &sq in ray {
                        if self.piece_at(sq) == Some(wanted) {
                            found.push(sq);
                        }
                    }
                }
            }
            _ => {
                for ray in table.rays(target, kind, color) {
                    for &sq in ray {
                        match self.piece_at(sq) {
                            Some(p) if p == wanted => {
                                found.push(sq);
                                break;
                            }
                            Some(_) => break,
                            None => {}
                        }
                    }
                }
            }
        }

        found
    }

    // ------------------------------------------------------------------
    // Pin detection
    // ------------------------------------------------------------------

    /// Whether the piece at `location` is pinned against its own king
    /// such that vacating it would expose the king, considering that a
    /// move to `dest` along the pin line itself stays legal.
    ///
    /// No mutation occurs: the rays from the king are walked outward, and
    /// the piece is pinned if the first occupant beyond `location` is an
    /// enemy slider whose geometry matches the ray.
    fn is_pinned(&self, table: &ThreatTable, location: Square, dest: Square) -> bool {
        let Some(piece) = self.piece_at(location) else {
            return false;
        };
        let king = self.king(piece.color);

        self.pinned_along(table, king, location, dest, piece.color, PieceKind::Bishop)
            || self.pinned_along(table, king, location, dest, piece.color, PieceKind::Rook)
    }

    /// Check the pin condition along every `slider`-shaped ray from the
    /// king. Queens attack along both shapes, so each walk also matches
    /// an enemy queen.
    fn pinned_along(
        &self,
        table: &ThreatTable,
        king: Square,
        location: Square,
        dest: Square,
        color: Color,
        slider: PieceKind,
    ) -> bool {
        for ray in table.rays(king, slider, color) {
            let mut behind_location = false;
            let mut dest_on_ray = false;
            for &sq in ray {
                if sq == location {
                    behind_location = true;
                    continue;
                }
                if sq == dest {
                    dest_on_ray = true;
                }
                let Some(occupant) = self.piece_at(sq) else {
                    continue;
                };
                if behind_location
                    && !dest_on_ray
                    && occupant.color != color
                    && (occupant.kind == slider || occupant.kind == PieceKind::Queen)
                {
                    return true;
                }
                // Any other occupant interrupts the ray.
                break;
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Relocate king and rook for a castle by `color` and revoke both of
    /// that side's rights.
    fn castle(&mut self, color: Color, side: CastleSide) {
        let rank = match color {
            Color::White => 0,
            Color::Black => 7 * 8,
        };
        let (king_from, rook_from, king_to, rook_to) = match side {
            CastleSide::King => (4, 7, 6, 5),
            CastleSide::Queen => (4, 0, 2, 3),
        };

        self.squares[rank + king_from] = None;
        self.squares[rank + rook_from] = None;
        self.squares[rank + king_to] = Some(Piece::new(color, PieceKind::King));
        self.squares[rank + rook_to] = Some(Piece::new(color, PieceKind::Rook));

        let king = Square::new((rank + king_to) as u8).expect("castle squares are on the board");
        self.set_king(color, king);
        self.castling.revoke_both(color);
        debug!("{color:?} castles {side:?}side");
    }

    /// Apply a resolved non-castling move. Total: resolution already
    /// succeeded, so there is no failure path left.
    fn apply_normal(
        &mut self,
        color: Color,
        kind: PieceKind,
        origin: Square,
        target: Square,
        capture: bool,
        promotion: Option<PieceKind>,
    ) {
        self.squares[origin.index()] = None;

        if let Some(promoted) = promotion {
            // The pawn never occupies the target, even transiently.
            self.squares[target.index()] = Some(Piece::new(color, promoted));
        } else {
            // A pawn capture landing on an empty square is en passant:
            // the captured pawn sits directly behind the target relative
            // to the mover's direction.
            if kind == PieceKind::Pawn && capture && self.piece_at(target).is_none() {
                let behind = match color {
                    Color::White => target.index() - 8,
                    Color::Black => target.index() + 8,
                };
                self.squares[behind] = None;
            }

            self.squares[target.index()] = Some(Piece::new(color, kind));
            if kind == PieceKind::King {
                self.set_king(color, target);
            }
        }

        match kind {
            PieceKind::King => self.castling.revoke_both(color),
            PieceKind::Rook => self.castling.revoke_for_rook_origin(color, origin),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Render the position as a FEN-style string: the placement field
    /// (rank 8 down to rank 1), the side to move, and the castling
    /// rights.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for row in (0..8).rev() {
            let mut empty_run = 0;
            for column in 0..8 {
                match self.squares[row * 8 + column] {
                    None => empty_run += 1,
                    Some(piece) => {
                        if empty_run > 0 {
                            let _ = write!(fen, "{empty_run}");
                            empty_run = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                }
            }
            if empty_run > 0 {
                let _ = write!(fen, "{empty_run}");
            }
            if row > 0 {
                fen.push('/');
            }
        }

        let _ = write!(fen, " {} {}", self.turn.fen_char(), self.castling.fen_field());
        fen
    }

    /// Render an 8x8 grid with rank and file labels for human
    /// inspection. Purely presentational.
    pub fn diagram(&self) -> String {
        let mut out = String::new();
        out.push_str("╔═══╦═════════════════════════╗\n");
        for row in (0..8).rev() {
            let _ = write!(out, "║ {} ║", row + 1);
            for column in 0..8 {
                match self.squares[row * 8 + column] {
                    Some(piece) => {
                        let _ = write!(out, " {} ", piece.glyph());
                    }
                    None => out.push_str(" · "),
                }
            }
            out.push_str(" ║\n");
        }
        out.push_str("╠═══╬═════════════════════════╣\n");
        out.push_str("║   ║ a  b  c  d  e  f  g  h  ║\n");
        out.push_str("╚═══╩═════════════════════════╝\n");
        out
    }
}
