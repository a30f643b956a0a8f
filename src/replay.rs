use std::fmt;

use crate::board::Board;
use crate::error::ReplayError;
use crate::piece::Color;
use crate::threats::ThreatTable;

/// A single ply as tokenized from a PGN movetext section: the move
/// number, the side that played it, the raw notation, and the optional
/// elapsed-time and comment annotations.
///
/// The engine consumes these records; it never produces or owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub number: u32,
    pub color: Color,
    pub notation: String,
    /// Elapsed move time in seconds, when the PGN carried `%emt`.
    pub elapsed: Option<f32>,
    pub comment: Option<String>,
}

impl MoveRecord {
    pub fn new(number: u32, color: Color, notation: impl Into<String>) -> Self {
        Self {
            number,
            color,
            notation: notation.into(),
            elapsed: None,
            comment: None,
        }
    }
}

impl fmt::Display for MoveRecord {
    /// `"1. e4"` for white moves, `"1... e5"` for black ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.color {
            Color::White => ".",
            Color::Black => "...",
        };
        write!(f, "{}{} {}", self.number, prefix, self.notation)
    }
}

/// Replay an ordered sequence of move records against `board`.
///
/// Stops at the first failing move: replay is deterministic, so the
/// position before that move is the last trustworthy state and is what
/// the board is left holding. The error carries the move number and raw
/// text for diagnostics.
pub fn replay(
    board: &mut Board,
    table: &ThreatTable,
    moves: &[MoveRecord],
) -> Result<(), ReplayError> {
    for record in moves {
        apply_record(board, table, record)?;
    }
    Ok(())
}

/// Apply one record, decorating any engine error with the move context.
pub fn apply_record(
    board: &mut Board,
    table: &ThreatTable,
    record: &MoveRecord,
) -> Result<(), ReplayError> {
    board
        .play_san(table, record.color, &record.notation)
        .map_err(|source| ReplayError::Game {
            number: record.number,
            notation: record.notation.clone(),
            source: Box::new(source),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Turn a plain SAN listing into numbered records, white first.
    fn records(moves: &[&str]) -> Vec<MoveRecord> {
        moves
            .iter()
            .enumerate()
            .map(|(ply, text)| {
                let color = if ply % 2 == 0 {
                    Color::White
                } else {
                    Color::Black
                };
                MoveRecord::new(ply as u32 / 2 + 1, color, *text)
            })
            .collect()
    }

    #[test]
    fn replays_a_short_opening() {
        let table = ThreatTable::new();
        let mut board = Board::new();

        replay(&mut board, &table, &records(&["e4", "e5", "Nf3"])).expect("legal opening");

        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq"
        );
    }

    #[test]
    fn failure_reports_move_number_and_text() {
        let table = ThreatTable::new();
        let mut board = Board::new();

        let err = replay(&mut board, &table, &records(&["e4", "e5", "Qxf7"])).unwrap_err();

        match err {
            ReplayError::Game {
                number,
                notation,
                source,
            } => {
                assert_eq!(number, 2);
                assert_eq!(notation, "Qxf7");
                assert!(matches!(*source, ReplayError::NoOrigin { .. }));
            }
            other => panic!("expected decorated error, got {other:?}"),
        }

        // The board holds the position before the failing move.
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq"
        );
    }

    #[test]
    fn failure_on_malformed_notation_is_decorated_too() {
        let table = ThreatTable::new();
        let mut board = Board::new();
        let record = MoveRecord::new(7, Color::White, "??");

        let err = apply_record(&mut board, &table, &record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "move 7 '??': malformed notation '??'"
        );
    }

    #[test]
    fn records_display_with_color_prefix() {
        assert_eq!(
            MoveRecord::new(1, Color::White, "e4").to_string(),
            "1. e4"
        );
        assert_eq!(
            MoveRecord::new(1, Color::Black, "e5").to_string(),
            "1... e5"
        );
    }
}
