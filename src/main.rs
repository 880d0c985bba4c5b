mod cli;

use anyhow::{Context, Result};
use rookery_core::{Color, Position, generate_legal_moves};
use rookery_engine::Searcher;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let options = cli::parse_args(std::env::args().skip(1))?;
    if options.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    info!(
        depth = options.search.depth,
        strategy = %options.search.strategy,
        plies = options.plies,
        seed = ?options.search.seed,
        pst = options.search.eval.piece_square_tables,
        "rookery starting"
    );

    let mut position = Position::new_game();
    let mut searcher = Searcher::new(options.search);
    println!("{}\n", position.pretty());

    for ply in 0..options.plies {
        let result = searcher.search(&mut position)?;
        let Some(mv) = result.best_move else {
            break;
        };
        position
            .apply_move(mv)
            .with_context(|| format!("engine chose {mv} at ply {ply}"))?;

        let number = ply / 2 + 1;
        let lead = match !position.side_to_move() {
            Color::White => format!("{number}."),
            Color::Black => format!("{number}..."),
        };
        println!("{lead} {} ({mv}) score {} nodes {}", mv.glyph_notation(), result.score, result.nodes);
        debug!(board = %position.pretty(), "position after move");

        if position.is_game_over() {
            break;
        }
    }

    // Records checkmate or stalemate if the last move ended the game.
    generate_legal_moves(&mut position);
    println!("\n{}\n", position.pretty());
    println!("status: {:?}", position.status());
    info!(status = ?position.status(), plies = position.history().len(), "rookery finished");
    Ok(())
}
