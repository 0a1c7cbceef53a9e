#[cfg(test)]
mod tests {
    use corvid::board::Position;
    use corvid::moves::movegen::{generate, GenMode};
    use corvid::moves::types::MoveList;

    const FENS: &[&str] = &[
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "rnbqkbnr/ppp1p2P/8/8/3p4/8/PPPP1PPP/RNBQKBNR w KQkq - 0 5",
    ];

    #[test]
    fn make_then_undo_restores_every_field() {
        for &fen in FENS {
            let mut pos = Position::from_fen(fen).unwrap();
            let before = pos.clone();
            let mut moves = MoveList::new();
            generate(&pos, GenMode::Legal, &mut moves);
            for mv in moves {
                pos.make(mv).unwrap();
                pos.undo();
                assert_eq!(pos, before, "make/undo of {mv} did not restore {fen}");
            }
        }
    }

    #[test]
    fn fen_round_trip() {
        for &fen in FENS {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen);
        }
    }

    #[test]
    fn square_mailbox_agrees_with_bitboards() {
        for &fen in FENS {
            let pos = Position::from_fen(fen).unwrap();
            for sq in 0..64i8 {
                let occupied = (pos.occupied() >> sq) & 1 != 0;
                match pos.piece_at(sq) {
                    corvid::piece::Piece::Empty => assert!(!occupied, "square {sq} empty but occupied bit set"),
                    corvid::piece::Piece::Occupied(t, c) => {
                        assert!(occupied);
                        assert_ne!(pos.piece_bb_of(t) & (1u64 << sq), 0);
                        assert_ne!(pos.color_bb_of(c) & (1u64 << sq), 0);
                    }
                }
            }
        }
    }

    #[test]
    fn castling_white_kingside() {
        let mut pos =
            Position::from_fen("rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
                .unwrap();
        pos.make_uci("e1g1").unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
        );
    }

    #[test]
    fn en_passant_capture() {
        let mut pos =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        pos.make_uci("e5f6").unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/ppp1p1pp/5P2/3p4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );
    }

    #[test]
    fn promotion_to_queen() {
        let mut pos =
            Position::from_fen("rnbqkbnr/ppp1p2P/8/8/3p4/8/PPPP1PPP/RNBQKBNR w KQkq - 0 5").unwrap();
        pos.make_uci("h7g8q").unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbQr/ppp1p3/8/8/3p4/8/PPPP1PPP/RNBQKBNR b KQkq - 0 5"
        );
    }
}
