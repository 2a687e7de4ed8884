use anyhow::Result;
use chessbot::perft::perft;
use chessbot::{Position, Rules};
use rayon::prelude::*;
use std::time::Instant;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the chess bot's rules layer")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> Result<()> {
    use clap::Parser;
    env_logger::init();
    let args = Args::parse();
    let base = if args.fen == "startpos" {
        Position::startpos()
    } else {
        Position::from_fen(&args.fen)?
    };

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let depth = args.depth;
    let (nodes, dt) = pool.install(|| -> Result<(u64, f64)> {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            perft(&mut base.clone(), depth)?
        } else {
            base.legal_moves()
                .par_iter()
                .map(|&mv| {
                    let mut p = base.clone();
                    p.apply(mv)?;
                    perft(&mut p, depth - 1)
                })
                .sum::<Result<u64, _>>()?
        };
        Ok((nodes, t0.elapsed().as_secs_f64()))
    })?;

    if args.nps {
        let nps = nodes as f64 / dt.max(f64::EPSILON);
        println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nps);
    } else {
        println!("nodes: {nodes}");
    }
    Ok(())
}
