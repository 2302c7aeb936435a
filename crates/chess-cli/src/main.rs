use anyhow::Context;
use chess_cli::{apply_moves, self_play, start_position, ChessConfig, SearchReport};
use chess_engine::{perft, perft_divide, Searcher};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess engine: best-move search, perft and self-play")]
struct Cli {
    /// Configuration file (defaults to chess.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the best move
    BestMove {
        /// Start position in FEN
        #[arg(long)]
        fen: Option<String>,
        /// Moves to play before searching, in long algebraic notation
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
        /// Search depth in plies
        #[arg(short, long)]
        depth: Option<u32>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Start position in FEN
        #[arg(long)]
        fen: Option<String>,
        /// Depth in plies
        #[arg(short, long, default_value = "3")]
        depth: u32,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Let the engine play against itself
    SelfPlay {
        /// Start position in FEN
        #[arg(long)]
        fen: Option<String>,
        /// Search depth in plies
        #[arg(short, long)]
        depth: Option<u32>,
        /// Stop after this many plies
        #[arg(long)]
        max_plies: Option<u32>,
        /// Print the game as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ChessConfig::load_from(path),
        None => ChessConfig::load(),
    }
    .context("loading configuration")?;

    let level_name = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let level: tracing::Level = level_name
        .parse()
        .with_context(|| format!("invalid log level: {}", level_name))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::BestMove {
            fen,
            moves,
            depth,
            json,
        } => {
            let mut position = start_position(fen.as_deref().or(config.fen.as_deref()))?;
            apply_moves(&mut position, &moves)?;
            let depth = depth.unwrap_or(config.search.depth);

            let started = Instant::now();
            let result = Searcher::new().search(&position, depth);
            tracing::info!(
                depth,
                nodes = result.nodes,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "search complete"
            );

            let report = SearchReport::new(&position, depth, &result);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                match &report.best_move {
                    Some(mv) => println!("bestmove {} score {}", mv, report.score),
                    None => println!("bestmove (none)"),
                }
            }
        }
        Commands::Perft { fen, depth, divide } => {
            let position = start_position(fen.as_deref().or(config.fen.as_deref()))?;
            let started = Instant::now();
            let total = if divide {
                let counts = perft_divide(&position, depth);
                for (mv, nodes) in &counts {
                    println!("{}: {}", mv, nodes);
                }
                counts.iter().map(|(_, nodes)| nodes).sum()
            } else {
                perft(&position, depth)
            };
            tracing::info!(
                depth,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "perft complete"
            );
            println!("Nodes searched: {}", total);
        }
        Commands::SelfPlay {
            fen,
            depth,
            max_plies,
            json,
        } => {
            let position = start_position(fen.as_deref().or(config.fen.as_deref()))?;
            let depth = depth.unwrap_or(config.search.depth);
            let max_plies = max_plies.unwrap_or(config.selfplay.max_plies);

            let report = self_play(position, depth, max_plies);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.moves.join(" "));
                println!("{}", report.result.as_deref().unwrap_or("*"));
                println!("{}", report.final_fen);
            }
        }
    }

    Ok(())
}
