use anyhow::{bail, Context, Result};
use chessbot::game::{engine_move, outcome};
use chessbot::search::eval::Heuristic;
use chessbot::selfplay::{generate_games_with_progress, write_games, SelfPlayParams};
use chessbot::{Position, Rules, SearchParams, Searcher};
use clap::{Args as ClapArgs, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Alpha-beta chess bot", long_about = None)]
struct Cli {
    #[command(flatten)]
    search: SearchArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct SearchArgs {
    /// JSON file with search parameters; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum iterative-deepening depth
    #[arg(long, global = true)]
    depth: Option<u32>,

    /// Time budget per move in milliseconds
    #[arg(long, global = true)]
    movetime: Option<u64>,

    /// Transposition table size in MB (approximate)
    #[arg(long, global = true)]
    hash_mb: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the engine's move for a position
    Bestmove {
        /// FEN string or 'startpos'
        #[arg(long, default_value = "startpos")]
        fen: String,
        /// Moves to play from the start position (UCI), ignored with --fen
        #[arg(long, num_args = 0..)]
        moves: Vec<String>,
    },
    /// Play against the engine on the terminal
    Play {
        /// Your color: 'w' for white, 'b' for black
        #[arg(long, default_value = "w")]
        color: String,
    },
    /// Let the engine play itself and write games as JSON lines
    Selfplay {
        #[arg(long, default_value_t = 10)]
        games: usize,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
        #[arg(long, default_value_t = 2)]
        random_plies: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value = "out/selfplay.jsonl")]
        out: PathBuf,
    },
}

impl SearchArgs {
    fn params(&self) -> Result<SearchParams> {
        let mut p = match &self.config {
            Some(path) => SearchParams::from_json_file(path)?,
            None => SearchParams::default(),
        };
        if let Some(d) = self.depth { p.max_depth = d; }
        if let Some(t) = self.movetime { p.max_time_ms = t; }
        Ok(p)
    }

    fn engine(&self) -> Result<Searcher<Position, Heuristic>> {
        let mut s = Searcher::new(Heuristic, self.params()?);
        if let Some(mb) = self.hash_mb { s.set_tt_capacity_mb(mb); }
        Ok(s)
    }
}

fn bestmove(args: &SearchArgs, fen: &str, moves: &[String]) -> Result<()> {
    let mut pos = if fen == "startpos" {
        Position::set_from_start_and_moves(moves)?
    } else {
        Position::from_fen(fen)?
    };
    let mut engine = args.engine()?;
    let report = engine.think(&mut pos)?;
    match report.best {
        Some(m) => println!(
            "bestmove={} score={} depth={} nodes={} elapsed={:.3}s",
            pos.uci(m),
            report.score.unwrap_or_default(),
            report.depth,
            report.nodes,
            report.elapsed.as_secs_f64()
        ),
        None => println!("bestmove=(none)"),
    }
    Ok(())
}

fn parse_color(color_str: &str) -> Result<bool> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(true),
        "b" | "black" => Ok(false),
        _ => bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn read_human_move(pos: &Position, input: &mut impl BufRead) -> Result<cozy_chess::Move> {
    loop {
        print!("Your move: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 { bail!("input closed"); }
        match pos.parse_move(line.trim()) {
            Ok(m) => return Ok(m),
            Err(_) => println!("Illegal move. Try again (UCI format, e.g. 'e2e4')."),
        }
    }
}

fn play(args: &SearchArgs, color: &str) -> Result<()> {
    let human_white = parse_color(color)?;
    let mut engine = args.engine()?;
    let mut pos = Position::startpos();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    engine.record_position(&pos);

    let result = loop {
        println!("\n{}", pos.diagram());
        if let Some(o) = outcome(&pos) { break o; }
        let human_to_move = pos.side_to_move().is_maximizing() == human_white;
        let mv = if human_to_move {
            read_human_move(&pos, &mut input)?
        } else {
            let m = engine_move(&mut pos, &mut engine)?.context("engine found no move")?;
            println!("Bot move: {}", pos.uci(m));
            m
        };
        pos.apply(mv)?;
        engine.record_position(&pos);
    };
    println!("Game over! {}", result.describe());
    Ok(())
}

fn selfplay(
    args: &SearchArgs,
    games: usize,
    max_plies: usize,
    random_plies: usize,
    seed: u64,
    out: &Path,
) -> Result<()> {
    let params = SelfPlayParams {
        games,
        max_plies,
        random_opening_plies: random_plies,
        seed,
        search: args.params()?,
    };
    let pb = ProgressBar::new(games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);
    let records = generate_games_with_progress(&params, || pb.inc(1))?;
    pb.finish();
    write_games(&records, out).with_context(|| format!("writing {}", out.display()))?;
    let white = records.iter().filter(|g| g.result > 0).count();
    let black = records.iter().filter(|g| g.result < 0).count();
    let other = records.len() - white - black;
    eprintln!(
        "Wrote {} games to {} (white {}, black {}, other {})",
        records.len(),
        out.display(),
        white,
        black,
        other
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match &cli.command {
        Command::Bestmove { fen, moves } => bestmove(&cli.search, fen, moves),
        Command::Play { color } => play(&cli.search, color),
        Command::Selfplay { games, max_plies, random_plies, seed, out } => {
            selfplay(&cli.search, *games, *max_plies, *random_plies, *seed, out)
        }
    }
}
