//! Imports a points file with a chosen reader strategy and reports
//! throughput.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fastline::{DEFAULT_BUFFER_CAPACITY, ImportOptions, ImportStats, ReaderOptions, StrategyKind};

mod memory;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Points file, one `metric timestamp value [tag=value ...]` per line.
    /// Files ending in `.gz` are decompressed on the fly.
    path: PathBuf,

    /// Size in bytes of the reader's input buffer.
    #[arg(long, default_value_t = DEFAULT_BUFFER_CAPACITY)]
    buffer_size: usize,

    /// Refill threshold in bytes. Defaults to a tenth of the buffer size.
    #[arg(long)]
    low_water_mark: Option<usize>,

    /// Number of times to import the file.
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Reader strategy: fast, buffered, split or mmap.
    #[arg(long, default_value_t = StrategyKind::Fast)]
    reader: StrategyKind,

    /// Report resident memory after each run.
    #[arg(long)]
    memory: bool,

    /// Log progress every this many points, 0 to disable.
    #[arg(long, default_value_t = ImportOptions::default().progress_interval)]
    progress_interval: u64,
}

impl Cli {
    fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            buffer_capacity: self.buffer_size,
            low_water_mark: self.low_water_mark.unwrap_or(self.buffer_size / 10),
            ..Default::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let reader_options = cli.reader_options();
    reader_options
        .validate()
        .context("invalid buffer settings")?;
    let import_options = ImportOptions {
        progress_interval: cli.progress_interval,
    };

    log::info!(
        "importing {} with the {} reader ({} byte buffer)",
        cli.path.display(),
        cli.reader,
        reader_options.buffer_capacity
    );

    let mut total = ImportStats::default();
    for run in 1..=cli.repeat {
        let stats = fastline::import_file(cli.reader, &cli.path, reader_options, &import_options)
            .with_context(|| format!("failed to import {}", cli.path.display()))?;
        log::info!("run {run}/{}: {stats}", cli.repeat);
        if cli.memory {
            match memory::resident_kb() {
                Some(kb) => log::info!("resident memory: {kb} kB"),
                None => log::info!("resident memory: unavailable"),
            }
        }
        total += stats;
    }

    println!("Total: {} data points, {} words", total.points, total.words);
    Ok(())
}
