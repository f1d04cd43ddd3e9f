use anyhow::{Context, bail};
use clap::Parser;
use sapper_core::*;
use serde::Serialize;
use web_time::Instant;

/// Generates many no-guess boards and reports how often the validator accepted one.
#[derive(Parser, Debug)]
#[command(name = "genstat", version, about, long_about = None)]
struct Args {
    /// Preset to generate: easy, medium, hard, huge or extreme
    #[arg(short, long, default_value = "easy", conflicts_with_all = ["width", "height", "mines"])]
    difficulty: Difficulty,

    /// Custom board width, requires --height and --mines
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom board height
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Number of boards to generate
    #[arg(short = 'n', long, default_value_t = 100)]
    seeds: u64,

    /// Seed of the first board, the rest follow consecutively
    #[arg(long, default_value_t = 0)]
    first_seed: u64,

    /// Attempts per board before giving up
    #[arg(long, default_value_t = MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    board: Option<BoardConfig>,
    boards: u64,
    verified: u64,
    exhausted: u64,
    total_attempts: u64,
    max_attempts_seen: u32,
    elapsed_ms: u128,
}

impl Summary {
    fn add(&mut self, report: GenerationReport) {
        self.boards += 1;
        if report.verified {
            self.verified += 1;
        } else {
            self.exhausted += 1;
        }
        self.total_attempts += u64::from(report.attempts);
        self.max_attempts_seen = self.max_attempts_seen.max(report.attempts);
    }

    fn acceptance_rate(&self) -> f64 {
        if self.boards == 0 {
            0.0
        } else {
            self.verified as f64 * 100.0 / self.boards as f64
        }
    }

    fn mean_attempts(&self) -> f64 {
        if self.boards == 0 {
            0.0
        } else {
            self.total_attempts as f64 / self.boards as f64
        }
    }
}

fn board_config(args: &Args) -> anyhow::Result<BoardConfig> {
    match (args.width, args.height, args.mines) {
        (Some(width), Some(height), Some(mines)) => BoardConfig::new(width, height, mines)
            .with_context(|| format!("invalid board {width}x{height} with {mines} mines")),
        (None, None, None) => Ok(args.difficulty.config()),
        _ => bail!("--width, --height and --mines must be given together"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = board_config(&args)?;
    let start = (config.width / 2, config.height / 2);

    let mut summary = Summary {
        board: Some(config),
        ..Summary::default()
    };
    let timer = Instant::now();

    for seed in args.first_seed..args.first_seed.saturating_add(args.seeds) {
        let mut grid = Grid::new(config.size());
        let report = NoGuessMinefieldGenerator::new(seed)
            .with_max_attempts(args.max_attempts)
            .generate(&mut grid, start, config.mines)
            .with_context(|| format!("generation failed for seed {seed}"))?;
        summary.add(report);
    }
    summary.elapsed_ms = timer.elapsed().as_millis();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}x{} with {} mines, first click {:?}",
            config.width, config.height, config.mines, start
        );
        println!(
            "verified {}/{} ({:.1}%), exhausted {}",
            summary.verified,
            summary.boards,
            summary.acceptance_rate(),
            summary.exhausted
        );
        println!(
            "attempts: mean {:.2}, max {}",
            summary.mean_attempts(),
            summary.max_attempts_seen
        );
        println!("elapsed: {} ms", summary.elapsed_ms);
    }

    Ok(())
}
