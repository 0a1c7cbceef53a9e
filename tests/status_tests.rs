#[cfg(test)]
mod tests {
    use corvid::board::Position;
    use corvid::piece::Color;

    #[test]
    fn checkmate_detection() {
        let pos = Position::from_fen("7k/6Q1/7P/5b2/3K4/8/2p5/2B5 b - - 8 57").unwrap();
        assert!(pos.is_checkmated(Color::Black));
    }

    #[test]
    fn stalemate_detection() {
        let pos = Position::from_fen("8/r6p/5k1K/7P/8/p7/8/8 w - - 1 61").unwrap();
        assert!(pos.is_stalemate(Color::White));
    }

    #[test]
    fn threefold_repetition_is_a_draw() {
        let mut pos =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        for _ in 0..3 {
            pos.make_uci("b1c3").unwrap();
            pos.make_uci("g8f6").unwrap();
            pos.make_uci("c3b1").unwrap();
            pos.make_uci("f6g8").unwrap();
        }
        assert!(pos.is_draw());
    }

    #[test]
    fn non_mate_check_is_not_checkmated() {
        // White king checked by the bishop but can step away.
        let pos = Position::from_fen("7k/8/8/8/8/2b5/8/K7 w - - 0 1").unwrap();
        assert!(pos.king_in_check(Color::White));
        assert!(!pos.is_checkmated(Color::White));
    }
}
