//! Populate command: derive a volume plan, confirm, and run the generation
//! pipeline against a fresh schema.

use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::orchestrator::Orchestrator;
use crate::plan;
use crate::report;
use crate::store::Store;

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  streamfill populate --preset quick-dev --db dev.duckdb --yes
  streamfill populate --preset performance --db bench.duckdb --progress
  streamfill populate --preset functional --seed 7 --no-jitter --yes")]
pub struct PopulateArgs {
    /// Volume preset to use (see `streamfill list`)
    #[arg(short, long, default_value = "performance")]
    pub preset: String,

    /// Database file to create or reuse (in-memory when omitted)
    #[arg(long, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// RNG seed; runs with the same seed and plan produce the same data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Derive exact counts instead of applying the ±10% variation
    #[arg(long)]
    pub no_jitter: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Show per-group progress bars
    #[arg(long)]
    pub progress: bool,
}

pub fn execute(args: PopulateArgs) -> Result<()> {
    let spec = plan::preset(&args.preset)?;
    let seed = args.seed.unwrap_or_else(|| rand::random());

    let plan = if args.no_jitter {
        spec.derive_exact()?
    } else {
        use rand::SeedableRng;
        let mut jitter_rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        spec.derive_jittered(&mut jitter_rng)?
    };

    report::print_volume_report(&plan);

    if !args.yes && !confirm("Proceed with population? [y/N] ")? {
        println!("Aborted.");
        return Ok(());
    }

    let store = Store::open(args.db.as_deref())?;
    store.create_schema()?;
    store.truncate_all()?;

    let mut orchestrator = Orchestrator::new(seed, args.progress);
    let timings = orchestrator.run(&store, &plan)?;

    report::print_timing_summary(&timings);
    report::print_table_counts(&store)?;
    println!("\nDone (seed {seed}).");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
