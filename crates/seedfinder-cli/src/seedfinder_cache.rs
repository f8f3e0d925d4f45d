//! Seed cache CLI
//!
//! Usage: seedfinder_cache <command> [options]
//!
//! Commands:
//!   build   Scan every 32-bit IV seed and write a cache file
//!   info    Print the header and seed count of a cache file
//!
//! Example:
//!   seedfinder_cache build --pattern flawless --max-frame 8 --dir caches
//!   seedfinder_cache info caches/flawless_normal_8.sfcache

use clap::{Parser, Subcommand, ValueEnum};
use seedfinder_core::app::cache_builder::CacheBuilder;
use seedfinder_core::constants::DEFAULT_CACHE_WINDOW;
use seedfinder_core::domain::cache_format::{CacheKind, IvPattern};
use seedfinder_core::infra::cache_io::read_cache;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seedfinder_cache", version, about = "Gen 5 IV seed cache tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan every IV seed and write a cache file
    Build {
        #[arg(long, value_enum)]
        pattern: PatternArg,
        /// Roamer IV order
        #[arg(long)]
        roamer: bool,
        /// Last IV frame a hit may sit on
        #[arg(long, default_value_t = DEFAULT_CACHE_WINDOW)]
        max_frame: u32,
        /// Output directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the header and seed count of a cache file
    Info { file: PathBuf },
}

#[derive(Copy, Clone, ValueEnum)]
enum PatternArg {
    /// 31 in every stat
    Flawless,
    /// Any Special Attack
    Physical,
    /// Any Attack
    Special,
    /// Any Speed
    Trickroom,
}

impl From<PatternArg> for IvPattern {
    fn from(pattern: PatternArg) -> Self {
        match pattern {
            PatternArg::Flawless => IvPattern::Flawless,
            PatternArg::Physical => IvPattern::PhysicalFlawless,
            PatternArg::Special => IvPattern::SpecialFlawless,
            PatternArg::Trickroom => IvPattern::TrickRoomFlawless,
        }
    }
}

fn build(kind: CacheKind, max_frame: u32, dir: PathBuf) -> Result<(), Box<dyn Error>> {
    let builder = CacheBuilder::new(kind, max_frame)?;
    fs::create_dir_all(&dir)?;

    println!("Building {:?} cache for frames 1-{}...", kind, max_frame);
    println!("This will take a long time. Press Ctrl+C to cancel.");
    let start = Instant::now();

    let path = builder.build(&dir, |current, total| {
        let progress = current as f64 / total as f64 * 100.0;
        print!("\r[Cache] Progress: {:.2}% ({}/{})", progress, current, total);
        let _ = io::stdout().flush();
    })?;
    println!();

    let file_size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    println!("Saved {}", path.display());
    println!("File size: {:.2} MB", file_size as f64 / (1024.0 * 1024.0));
    println!("Done! Total time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

fn info(file: PathBuf) -> Result<(), Box<dyn Error>> {
    let (header, seeds) = read_cache(&file)?;
    println!("File: {}", file.display());
    println!("Format version: {}", header.version);
    println!("Pattern: {:?}", header.kind.pattern);
    println!("Roamer order: {}", header.kind.roamer);
    println!("Max frame: {}", header.max_frame);
    println!("Seeds: {}", seeds.len());
    if let (Some(first), Some(last)) = (seeds.first(), seeds.last()) {
        println!("Range: {:#010X} - {:#010X}", first, last);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let result = match Cli::parse().command {
        Command::Build {
            pattern,
            roamer,
            max_frame,
            dir,
        } => build(CacheKind::new(pattern.into(), roamer), max_frame, dir),
        Command::Info { file } => info(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
