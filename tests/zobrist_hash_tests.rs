#[cfg(test)]
mod tests {
    use corvid::board::Position;

    #[test]
    fn hash_ignores_undo_chain_history() {
        let mut a = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        let reached_directly =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();

        a.make_uci("e2e4").unwrap();
        assert_eq!(a.hash, reached_directly.hash);

        // Detour through a different move sequence back to the same
        // placement/side/castling/ep must produce the identical hash.
        a.undo();
        a.make_uci("g1f3").unwrap();
        a.make_uci("g8f6").unwrap();
        a.undo();
        a.undo();
        a.make_uci("e2e4").unwrap();
        assert_eq!(a.hash, reached_directly.hash);
    }

    #[test]
    fn hash_changes_with_side_to_move() {
        let white_to_move =
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let black_to_move =
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_ne!(white_to_move.hash, black_to_move.hash);
    }

    #[test]
    fn hash_changes_with_castling_rights() {
        let with_rights =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let without_rights =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert_ne!(with_rights.hash, without_rights.hash);
    }

    #[test]
    fn hash_changes_with_en_passant_file() {
        let ep_d6 =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let no_ep =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3")
                .unwrap();
        assert_ne!(ep_d6.hash, no_ep.hash);
    }
}
