//! FEN parsing and serialization: `placement side castling enpassant
//! halfmove fullmove`. Lives on `Position` rather than `Board` (the
//! teacher's name) since this crate folds board + position into one type.

use super::castle_bits::{CASTLE_BK, CASTLE_BQ, CASTLE_NONE, CASTLE_WK, CASTLE_WQ};
use super::Position;
use crate::error::EngineError;
use crate::piece::{Color, Piece};
use crate::square::{from_algebraic, to_algebraic, NO_SQUARE};

impl Position {
    pub fn from_fen(text: &str) -> Result<Position, EngineError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(EngineError::InvalidFen(format!(
                "expected 6 fields, found {}",
                fields.len()
            )));
        }
        let [placement, side, castling, ep, halfmove, fullmove] =
            [fields[0], fields[1], fields[2], fields[3], fields[4], fields[5]];

        let mut pos = Position::new_empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 8 - rank_from_top as u8;
            let mut file = 1u8;
            for ch in rank_str.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(EngineError::InvalidFen(format!("bad empty run '{ch}'")));
                    }
                    file += run as u8;
                } else {
                    let piece = Piece::from_char(ch)
                        .ok_or_else(|| EngineError::InvalidFen(format!("bad piece char '{ch}'")))?;
                    if file > 8 {
                        return Err(EngineError::InvalidFen("rank overflows 8 files".to_string()));
                    }
                    let sq = crate::square::square_of(rank, file);
                    pos.set_square(sq, piece);
                    file += 1;
                }
            }
            if file != 9 {
                return Err(EngineError::InvalidFen(format!(
                    "rank {rank} does not sum to 8 files"
                )));
            }
        }

        pos.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(EngineError::InvalidFen(format!("bad side '{side}'"))),
        };

        pos.castling = CASTLE_NONE;
        if castling != "-" {
            for ch in castling.chars() {
                pos.castling |= match ch {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(EngineError::InvalidFen(format!("bad castling char '{ch}'"))),
                };
            }
        }

        pos.ep_square = if ep == "-" {
            NO_SQUARE
        } else {
            from_algebraic(ep)?
        };

        pos.halfmove_clock = halfmove
            .parse()
            .map_err(|_| EngineError::InvalidFen(format!("bad halfmove clock '{halfmove}'")))?;

        pos.fullmove = fullmove
            .parse()
            .map_err(|_| EngineError::InvalidFen(format!("bad fullmove number '{fullmove}'")))?;
        if pos.fullmove == 0 {
            return Err(EngineError::InvalidFen(
                "fullmove counter must be positive".to_string(),
            ));
        }

        pos.ply = 0;
        pos.last_irreversible_ply = 0;
        pos.rebuild_attacker_cache();
        pos.hash = pos.compute_zobrist();
        pos.hash_history = vec![pos.hash];

        pos.validate()?;
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank_from_top in 0..8u8 {
            let rank = 8 - rank_from_top;
            let mut empty_run = 0u8;
            for file in 1..=8u8 {
                let sq = crate::square::square_of(rank, file);
                let piece = self.piece_at(sq);
                if piece.is_empty() {
                    empty_run += 1;
                } else {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece.to_char());
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                placement.push('/');
            }
        }

        let side = if self.side_to_move == Color::White { "w" } else { "b" };

        let mut castling = String::new();
        if self.castling & CASTLE_WK != 0 {
            castling.push('K');
        }
        if self.castling & CASTLE_WQ != 0 {
            castling.push('Q');
        }
        if self.castling & CASTLE_BK != 0 {
            castling.push('k');
        }
        if self.castling & CASTLE_BQ != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = if self.ep_square == NO_SQUARE {
            "-".to_string()
        } else {
            to_algebraic(self.ep_square)
        };

        format!(
            "{placement} {side} {castling} {ep} {} {}",
            self.halfmove_clock, self.fullmove
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn round_trips_the_starting_position() {
        let pos = Position::from_fen(START).unwrap();
        assert_eq!(pos.to_fen(), START);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(Position::from_fen("not a fen").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn castle_rights_round_trip() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }
}
