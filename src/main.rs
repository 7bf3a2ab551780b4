use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use tile_slide::render::Renderer;
use tile_slide::{logging, Board, PuzzleError, SolvabilityRule, Solver, SolverConfig};

#[derive(Parser, Debug)]
#[command(name = "tile-slide")]
#[command(
    version,
    about = "Solve sliding-tile puzzles with greedy best-first search",
    long_about = None
)]
struct Args {
    /// Initial layout, rows separated by '|', e.g. "1 2 3|4 5 6|7 _ 8"
    #[arg(long, conflicts_with = "scramble")]
    initial: Option<String>,

    /// Goal layout; defaults to the row-major goal for the initial board's size
    #[arg(long)]
    goal: Option<String>,

    /// Scramble the solved board with this many random moves instead of reading --initial
    #[arg(long)]
    scramble: Option<usize>,

    /// Rows of the scrambled board
    #[arg(long, default_value_t = 3)]
    rows: usize,

    /// Columns of the scrambled board
    #[arg(long, default_value_t = 3)]
    cols: usize,

    /// Random seed for --scramble
    #[arg(long)]
    seed: Option<u64>,

    /// Solver configuration file (TOML)
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Give up after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Check solvability with the width-aware parity rule
    #[arg(long)]
    width_aware: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Plain output without colors
    #[arg(long)]
    no_color: bool,
}

fn load_config(args: &Args) -> Result<SolverConfig> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::from_toml(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    if args.width_aware {
        config = config.with_solvability(SolvabilityRule::WidthAware);
    }
    config.validate()?;
    Ok(config)
}

fn initial_board(args: &Args, marker: &str) -> Result<Board> {
    match (&args.initial, args.scramble) {
        (Some(layout), _) => {
            Board::parse_with_marker(layout, marker).context("parsing --initial")
        }
        (None, Some(moves)) => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Ok(Board::scrambled(args.rows, args.cols, moves, &mut rng)?)
        }
        (None, None) => bail!("either --initial or --scramble is required"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logger(args.verbose);

    let config = load_config(&args)?;
    let initial = initial_board(&args, &config.empty_marker)?;
    let goal = match &args.goal {
        Some(layout) => {
            Board::parse_with_marker(layout, &config.empty_marker).context("parsing --goal")?
        }
        None => Board::goal(initial.rows(), initial.cols())?,
    };
    let marker = config.empty_marker.as_str();
    info!(
        "solving {} towards {}",
        initial.layout(marker),
        goal.layout(marker)
    );

    let even_width = initial.cols() % 2 == 0;
    let rule = config.solvability;
    let solution = match Solver::new(config).solve(initial, goal) {
        Ok(solution) => solution,
        Err(err @ PuzzleError::Unsolvable { .. })
            if even_width && rule == SolvabilityRule::InversionParity =>
        {
            return Err(err).context("even-width board; --width-aware may accept it");
        }
        Err(err) => return Err(err.into()),
    };

    let mut stdout = std::io::stdout();
    Renderer::new(!args.no_color).solution(&mut stdout, &solution)?;
    Ok(())
}
