use anyhow::{Context, Result};
use clap::Parser;
use jiff::tz::TimeZone;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug, info};

use sensorlog::{generate, output, store};

#[derive(Parser)]
#[command(
    name = "sensorlog",
    about = "Write synthetic sensor readings to a binary file",
    version
)]
struct Cli {
    /// Number of records to generate
    #[arg(value_parser = parse_count)]
    count: usize,

    /// Destination file (created or truncated)
    file: PathBuf,

    /// Print the record at this index after writing
    #[arg(long, value_name = "INDEX", allow_negative_numbers = true)]
    show: Option<i64>,

    /// Seed the generator instead of using the clock
    #[arg(long)]
    seed: Option<u64>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_count(s: &str) -> Result<usize, String> {
    let count: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if count == 0 {
        return Err("count must be a positive number".to_string());
    }
    if count > generate::MAX_COUNT {
        return Err(format!("count must be at most {}", generate::MAX_COUNT));
    }
    Ok(count)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => {
            debug!(seed, "seeded generator from --seed");
            StdRng::seed_from_u64(seed)
        }
        None => generate::clock_seeded_rng(),
    };

    let records =
        generate::generate(cli.count, &mut rng).context("failed to generate records")?;
    store::write_all(&cli.file, &records)?;
    info!(path = %cli.file.display(), records = records.len(), "store written");

    if let Some(index) = cli.show {
        let record = store::read_at(&cli.file, index)?;
        let mut out = BufWriter::new(io::stdout().lock());
        output::write_record(&mut out, &record, &TimeZone::system())
            .context("failed to write to stdout")?;
        out.flush()?;
    }

    Ok(())
}
