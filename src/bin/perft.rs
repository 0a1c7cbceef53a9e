//! Standalone perft diagnostic. Not a UCI or any other protocol handler —
//! argument parsing and interactive play belong to an external driver;
//! this binary exists purely to exercise the move generator against the
//! node counts in the engine's own test suite.
//!
//! Usage: perft [--fen <FEN>] [--divide] <depth>

use corvid::board::Position;
use corvid::logger;
use corvid::moves::perft::{perft, perft_divide};
use std::env;
use std::time::Instant;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() {
    logger::init_logging("logs/perft.log", "corvid=info");

    let args: Vec<String> = env::args().skip(1).collect();
    let mut fen = START_FEN.to_string();
    let mut divide = false;
    let mut depth = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--fen" => {
                i += 1;
                fen = args.get(i).cloned().unwrap_or_else(|| START_FEN.to_string());
            }
            "--divide" => divide = true,
            other => depth = other.parse::<u32>().ok(),
        }
        i += 1;
    }

    let depth = depth.unwrap_or(4);

    let mut pos = match Position::from_fen(&fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("invalid fen: {err}");
            std::process::exit(1);
        }
    };

    let start = Instant::now();

    if divide {
        let mut total = 0;
        for (mv, count) in perft_divide(&mut pos, depth) {
            println!("{}: {}", mv.to_uci(), count);
            total += count;
        }
        println!("total: {total}");
    } else {
        let nodes = perft(&mut pos, depth);
        println!("nodes: {nodes}");
    }

    println!("elapsed: {:?}", start.elapsed());
}
