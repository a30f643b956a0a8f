use thiserror::Error;

use crate::piece::PieceKind;
use crate::square::Square;

/// Errors reported while reconstructing a position from move records.
///
/// Every variant is a recoverable value: a failure on move *n* leaves the
/// board in the state it had before move *n*, and the caller decides
/// whether to abort the game, skip the move, or report a diagnostic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// The move text did not match any recognized algebraic form.
    #[error("malformed notation '{0}'")]
    MalformedNotation(String),

    /// No candidate square satisfies piece kind, occupancy, qualifier and
    /// pin constraints.
    #[error("no {kind} can reach {target}")]
    NoOrigin { kind: PieceKind, target: Square },

    /// More than one candidate survived all filters. Indicates malformed
    /// input or a reachability precomputation bug.
    #[error("more than one {kind} can reach {target}")]
    AmbiguousOrigin {
        kind: PieceKind,
        target: Square,
        candidates: Vec<Square>,
    },

    /// A square index outside 0..64. Unreachable from well-formed notation.
    #[error("square index {0} out of range")]
    InvalidSquare(u8),

    /// An engine error decorated with the move it occurred on, produced by
    /// the replay driver.
    #[error("move {number} '{notation}': {source}")]
    Game {
        number: u32,
        notation: String,
        #[source]
        source: Box<ReplayError>,
    },
}
