use std::fmt;

/// Side of a piece or side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// FEN side-to-move field.
    pub const fn fen_char(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

/// Piece kind, colorless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kind denoted by an algebraic-notation piece letter. Pawns have no
    /// letter, so the absent case is handled by the caller.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'P' => Some(Self::Pawn),
            'N' => Some(Self::Knight),
            'B' => Some(Self::Bishop),
            'R' => Some(Self::Rook),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        })
    }
}

/// A colored piece occupying a square. Empty squares are `Option::None`
/// on the board, not a piece variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN placement letter: uppercase for white, lowercase for black.
    pub const fn fen_char(self) -> char {
        let letter = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self { color, kind })
    }

    /// Unicode glyph for diagram rendering.
    pub const fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '\u{2659}',   // ♙
            (Color::White, PieceKind::Knight) => '\u{2658}', // ♘
            (Color::White, PieceKind::Bishop) => '\u{2657}', // ♗
            (Color::White, PieceKind::Rook) => '\u{2656}',   // ♖
            (Color::White, PieceKind::Queen) => '\u{2655}',  // ♕
            (Color::White, PieceKind::King) => '\u{2654}',   // ♔
            (Color::Black, PieceKind::Pawn) => '\u{265F}',   // ♟
            (Color::Black, PieceKind::Knight) => '\u{265E}', // ♞
            (Color::Black, PieceKind::Bishop) => '\u{265D}', // ♝
            (Color::Black, PieceKind::Rook) => '\u{265C}',   // ♜
            (Color::Black, PieceKind::Queen) => '\u{265B}',  // ♛
            (Color::Black, PieceKind::King) => '\u{265A}',   // ♚
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case('K', Color::White, PieceKind::King)]
    #[test_case('q', Color::Black, PieceKind::Queen)]
    #[test_case('P', Color::White, PieceKind::Pawn)]
    #[test_case('n', Color::Black, PieceKind::Knight)]
    fn fen_char_round_trip(c: char, color: Color, kind: PieceKind) {
        let piece = Piece::from_fen_char(c).expect("valid FEN letter");
        assert_eq!(piece, Piece::new(color, kind));
        assert_eq!(piece.fen_char(), c);
    }

    #[test]
    fn rejects_non_piece_char() {
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }

    #[test]
    fn san_letters_cover_all_kinds() {
        assert_eq!(PieceKind::from_letter('N'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_letter('K'), Some(PieceKind::King));
        assert_eq!(PieceKind::from_letter('Z'), None);
        // Lowercase letters are FEN, not SAN.
        assert_eq!(PieceKind::from_letter('n'), None);
    }
}
