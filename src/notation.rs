use std::sync::LazyLock;

use regex::Regex;

use crate::error::ReplayError;
use crate::piece::PieceKind;
use crate::square::Square;

/// Captures the informational groups of a textual move:
///
/// - `castle`: 'O-O' or 'O-O-O'
/// - `piece`: piece letter, absent for pawns
/// - `qual`: disambiguation qualifier (file letter, rank digit, or both)
/// - `capture`: 'x' only if this is a capture
/// - `target`: target square
/// - `promo`: promotion piece after '='
///
/// Check, mate and annotation suffixes are accepted and ignored.
static TEXTUAL_MOVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^
            (?:
                (?P<castle>O-O(?:-O)?)
                |
                (?P<piece>[NBRQK])?
                (?P<qual>[a-h]?[1-8]?)
                (?P<capture>x)?
                (?P<target>[a-h][1-8])
                (?:=(?P<promo>[NBRQ]))?
            )
            [\+\#]?(?:\s*[!?]+)?
        $",
    )
    .expect("move notation regex is valid")
});

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

/// Optional file and/or rank constraint disambiguating among several
/// pieces of the same kind able to reach a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Qualifier {
    /// Zero-based file constraint, 0 = file a.
    pub file: Option<u8>,
    /// Zero-based rank constraint, 0 = rank 1.
    pub rank: Option<u8>,
}

impl Qualifier {
    pub const fn is_empty(self) -> bool {
        self.file.is_none() && self.rank.is_none()
    }

    /// Whether `square` satisfies every constraint present.
    pub fn matches(self, square: Square) -> bool {
        self.file.is_none_or(|file| file == square.column())
            && self.rank.is_none_or(|rank| rank == square.row())
    }

    fn parse(text: &str) -> Self {
        let mut qualifier = Self::default();
        for c in text.chars() {
            match c {
                'a'..='h' => qualifier.file = Some(c as u8 - b'a'),
                '1'..='8' => qualifier.rank = Some(c as u8 - b'1'),
                _ => {}
            }
        }
        qualifier
    }
}

/// A decoded algebraic-notation move, before origin resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum San {
    Castle(CastleSide),
    Normal {
        kind: PieceKind,
        qualifier: Qualifier,
        capture: bool,
        target: Square,
        promotion: Option<PieceKind>,
    },
}

/// Decode a raw move string such as `"Nbd7"`, `"exd6"`, `"e8=Q"` or
/// `"O-O"`.
///
/// Fails with [`ReplayError::MalformedNotation`] when no informational
/// group matches; the error is propagated, never silently ignored.
pub fn parse_san(text: &str) -> Result<San, ReplayError> {
    let captures = TEXTUAL_MOVE
        .captures(text.trim())
        .ok_or_else(|| ReplayError::MalformedNotation(text.to_string()))?;

    if let Some(castle) = captures.name("castle") {
        let side = if castle.as_str() == "O-O" {
            CastleSide::King
        } else {
            CastleSide::Queen
        };
        return Ok(San::Castle(side));
    }

    let kind = captures
        .name("piece")
        .and_then(|m| PieceKind::from_letter(m.as_str().chars().next()?))
        .unwrap_or(PieceKind::Pawn);
    let qualifier = captures
        .name("qual")
        .map(|m| Qualifier::parse(m.as_str()))
        .unwrap_or_default();
    let target: Square = captures["target"].parse()?;
    let promotion = captures
        .name("promo")
        .and_then(|m| PieceKind::from_letter(m.as_str().chars().next()?));

    Ok(San::Normal {
        kind,
        qualifier,
        capture: captures.name("capture").is_some(),
        target,
        promotion,
    })
}
