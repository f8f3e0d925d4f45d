//! Seed search CLI
//!
//! Usage: seedfinder_search <command> [options]
//!
//! Commands:
//!   gen34       Recover Gen 3/4 seeds from observed IVs
//!   gen5-iv     Gen 5 IV search over console startup parameters
//!   gen5-pid    Gen 5 PID search over console startup parameters
//!   trainer-id  Gen 5 trainer ID search
//!   criteria    Run any search described by a JSON criteria file
//!
//! Example:
//!   seedfinder_search gen34 --min-ivs 31,31,31,31,31,31 --frames 1-20
//!   seedfinder_search gen5-iv --profile profiles.json --name black --date 2011-01-01 \
//!       --min-ivs 31,0,31,31,31,31 --frames 1-8 --cache-dir caches
//!
//! Results go to stdout as one JSON object per line (or a single JSON array
//! with `--output json`); progress and logs go to stderr. Set RUST_LOG to
//! change the log level.

use clap::{Args, Parser, Subcommand, ValueEnum};
use seedfinder_core::app::cache_manager::CacheManager;
use seedfinder_core::app::searchers::{
    CGearCriteria, CGearSearch, DreamRadarCriteria, DreamRadarSearch, Gen4TimeCriteria, Gen4TimeSeedSearch,
    Gen5EggCriteria, Gen5EggSearch, Gen5IvCriteria, Gen5IvSearch, Gen5PidCriteria, Gen5PidSearch,
    Gen34SeedCriteria, Gen34SeedSearch, HiddenHollowCriteria, HiddenHollowSearch, SpinnerCriteria, SpinnerSearch,
    TrainerIdCriteria, TrainerIdSearch,
};
use seedfinder_core::domain::frame::{Gen5Encounter, Gen34Method, PidContext};
use seedfinder_core::domain::seed::{GameDate, Nazo, TimeFilter};
use seedfinder_core::domain::seed_gen::{ButtonComboSet, ClockRange, HashedSeedRanges};
use seedfinder_core::domain::types::{ConsoleType, GameVersion, Ivs, Nature, NatureSet, Pid, TrainerId};
use seedfinder_core::{ExpectedResults, FrameRange, IvCriteria, PidCriteria, Search, SearchOptions, SearchRunner};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Expected result count above which the search warns before starting
const RESULT_WARNING: u64 = 10_000;

#[derive(Parser)]
#[command(name = "seedfinder_search", version, about = "Gen 3-5 seed search")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Worker threads (default: one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Stop once this many results were found
    #[arg(long, global = true)]
    max_results: Option<u64>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Lines)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Recover Gen 3/4 seeds from observed IVs
    Gen34 {
        #[arg(long, value_enum, default_value_t = MethodArg::M1)]
        method: MethodArg,
        #[command(flatten)]
        ivs: IvArgs,
        #[command(flatten)]
        pid: PidArgs,
        #[arg(long, value_parser = parse_frames, default_value = "1-10")]
        frames: FrameRange,
    },
    /// Gen 5 IV search over console startup parameters
    Gen5Iv {
        #[command(flatten)]
        console: ConsoleArgs,
        #[command(flatten)]
        ivs: IvArgs,
        #[arg(long, value_parser = parse_frames, default_value = "1-8")]
        frames: FrameRange,
        /// Roamer IV order (HP, Atk, Def, SpD, Spe, SpA)
        #[arg(long)]
        roamer: bool,
        /// Directory holding seed caches
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// Gen 5 PID search over console startup parameters
    Gen5Pid {
        #[command(flatten)]
        console: ConsoleArgs,
        /// Encounter kind (Static, Grass, Surf, ...)
        #[arg(long, value_parser = parse_encounter, default_value = "Static")]
        encounter: Gen5Encounter,
        #[command(flatten)]
        pid: PidArgs,
        #[arg(long, value_parser = parse_frames, default_value = "1-50")]
        frames: FrameRange,
        /// Count frames from the first frame the player can act on
        #[arg(long)]
        from_initial: bool,
    },
    /// Gen 5 trainer ID search (frames count from the ID draw on Black / White)
    TrainerId {
        #[command(flatten)]
        console: ConsoleArgs,
        #[arg(long)]
        tid: Option<u16>,
        #[arg(long)]
        sid: Option<u16>,
        /// PID (hex) the ID pair must make shiny
        #[arg(long, value_parser = parse_hex_u32)]
        shiny_pid: Option<u32>,
        #[arg(long, value_parser = parse_frames, default_value = "1-1")]
        frames: FrameRange,
    },
    /// Run any search described by a JSON criteria file
    Criteria {
        /// File with `{"search": "<kind>", "criteria": {...}}`
        file: PathBuf,
        /// Directory holding seed caches (Gen 5 IV searches)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum OutputFormat {
    /// One JSON object per result as it is found
    Lines,
    /// A single JSON array after the search
    Json,
}

#[derive(Copy, Clone, ValueEnum)]
enum MethodArg {
    M1,
    M2,
    M4,
    M1r,
}

impl From<MethodArg> for Gen34Method {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::M1 => Gen34Method::Method1,
            MethodArg::M2 => Gen34Method::Method2,
            MethodArg::M4 => Gen34Method::Method4,
            MethodArg::M1r => Gen34Method::Method1Reverse,
        }
    }
}

#[derive(Args)]
struct IvArgs {
    /// Lowest accepted IVs (HP,Atk,Def,SpA,SpD,Spe)
    #[arg(long, value_parser = parse_ivs, default_value = "0,0,0,0,0,0")]
    min_ivs: Ivs,
    /// Highest accepted IVs
    #[arg(long, value_parser = parse_ivs, default_value = "31,31,31,31,31,31")]
    max_ivs: Ivs,
}

impl IvArgs {
    fn criteria(&self) -> Result<IvCriteria, Box<dyn Error>> {
        Ok(IvCriteria::new(self.min_ivs, self.max_ivs)?)
    }
}

#[derive(Args)]
struct PidArgs {
    /// Accepted natures (comma-separated names)
    #[arg(long, value_parser = parse_natures)]
    natures: Option<NatureSet>,
    #[arg(long)]
    shiny: bool,
    #[arg(long, default_value_t = 0)]
    tid: u16,
    #[arg(long, default_value_t = 0)]
    sid: u16,
}

impl PidArgs {
    fn criteria(&self) -> PidCriteria {
        let mut criteria = PidCriteria::any();
        if let Some(natures) = self.natures {
            criteria = criteria.with_natures(natures);
        }
        if self.shiny {
            criteria = criteria.shiny();
        }
        criteria
    }

    fn id(&self) -> TrainerId {
        TrainerId::new(self.tid, self.sid)
    }
}

#[derive(Args)]
struct ConsoleArgs {
    /// JSON file with console profiles
    #[arg(long, default_value = "profiles.json")]
    profile: PathBuf,
    /// Profile name inside the file
    #[arg(long)]
    name: String,
    /// First date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: GameDate,
    /// Last date (default: --date)
    #[arg(long, value_parser = parse_date)]
    end_date: Option<GameDate>,
    #[arg(long, value_parser = parse_span, default_value = "0-23")]
    hours: RangeInclusive<u8>,
    #[arg(long, value_parser = parse_span, default_value = "0-59")]
    minutes: RangeInclusive<u8>,
    #[arg(long, value_parser = parse_span, default_value = "0-59")]
    seconds: RangeInclusive<u8>,
    /// Most buttons held at once during boot
    #[arg(long, default_value_t = 0)]
    buttons: usize,
}

/// Console calibration as stored in the profile file
#[derive(Clone, Copy, Debug, Deserialize)]
struct ConsoleProfile {
    version: GameVersion,
    console: ConsoleType,
    mac_address: u64,
    timer0: [u16; 2],
    vcount: [u8; 2],
    vframe: [u8; 2],
    #[serde(default)]
    memory_link: bool,
    #[serde(default)]
    nazo: Option<Nazo>,
}

#[derive(Deserialize)]
struct ProfileFile {
    profiles: HashMap<String, ConsoleProfile>,
}

impl ConsoleArgs {
    fn load(&self) -> Result<(ConsoleProfile, HashedSeedRanges), Box<dyn Error>> {
        let profile = load_profile(&self.profile, &self.name)?;
        let filter = TimeFilter::all()
            .hours(self.hours.clone())
            .minutes(self.minutes.clone())
            .seconds(self.seconds.clone());
        let ranges = HashedSeedRanges {
            version: profile.version,
            console: profile.console,
            mac_address: profile.mac_address,
            timer0: profile.timer0[0]..=profile.timer0[1],
            vcount: profile.vcount[0]..=profile.vcount[1],
            vframe: profile.vframe[0]..=profile.vframe[1],
            clock: ClockRange::new(self.date, self.end_date.unwrap_or(self.date), filter)?,
            buttons: ButtonComboSet::up_to(self.buttons),
            nazo: profile.nazo,
        };
        Ok((profile, ranges))
    }
}

fn load_profile(path: &Path, name: &str) -> Result<ConsoleProfile, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let file: ProfileFile = serde_json::from_str(&text)?;
    let profile = file
        .profiles
        .get(name)
        .ok_or_else(|| format!("profile '{}' not found in {}", name, path.display()))?;
    Ok(*profile)
}

/// Contents of a `criteria` file
#[derive(Deserialize)]
#[serde(tag = "search", content = "criteria", rename_all = "snake_case")]
enum CriteriaFile {
    Gen34(Gen34SeedCriteria),
    Gen4Time(Gen4TimeCriteria),
    Gen5Iv(Gen5IvCriteria),
    Gen5Pid(Gen5PidCriteria),
    Gen5Egg(Gen5EggCriteria),
    TrainerId(TrainerIdCriteria),
    CGear(CGearCriteria),
    Spinner(SpinnerCriteria),
    DreamRadar(DreamRadarCriteria),
    HiddenHollow(HiddenHollowCriteria),
}

// =============================================================================
// Argument parsers
// =============================================================================

fn parse_span(s: &str) -> Result<RangeInclusive<u8>, String> {
    let (min, max) = s.split_once('-').unwrap_or((s, s));
    let min: u8 = min.trim().parse().map_err(|_| format!("invalid range: {}", s))?;
    let max: u8 = max.trim().parse().map_err(|_| format!("invalid range: {}", s))?;
    if min > max {
        return Err(format!("empty range: {}", s));
    }
    Ok(min..=max)
}

fn parse_frames(s: &str) -> Result<FrameRange, String> {
    let (min, max) = s.split_once('-').unwrap_or((s, s));
    let min: u32 = min.trim().parse().map_err(|_| format!("invalid frame range: {}", s))?;
    let max: u32 = max.trim().parse().map_err(|_| format!("invalid frame range: {}", s))?;
    FrameRange::new(min, max).map_err(|e| e.to_string())
}

fn parse_ivs(s: &str) -> Result<Ivs, String> {
    let values: Vec<u8> = s
        .split([',', ' '])
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<u8>().map_err(|_| format!("invalid IV: {}", v)))
        .collect::<Result<_, _>>()?;
    let values: [u8; 6] = values
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected 6 IVs, got {}", v.len()))?;
    Ivs::try_new(values).map_err(|e| e.to_string())
}

fn parse_natures(s: &str) -> Result<NatureSet, String> {
    s.split(',').map(str::trim).filter(|n| !n.is_empty()).try_fold(NatureSet::empty(), |set, name| {
        Nature::ALL
            .into_iter()
            .find(|nature| nature.name().eq_ignore_ascii_case(name))
            .map(|nature| set.with(nature))
            .ok_or_else(|| format!("unknown nature: {}", name))
    })
}

fn parse_date(s: &str) -> Result<GameDate, String> {
    let parts: Vec<&str> = s.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(format!("date must be YYYY-MM-DD: {}", s));
    };
    let year = year.parse().map_err(|_| format!("invalid year: {}", year))?;
    let month = month.parse().map_err(|_| format!("invalid month: {}", month))?;
    let day = day.parse().map_err(|_| format!("invalid day: {}", day))?;
    GameDate::new(year, month, day).map_err(|e| e.to_string())
}

fn parse_hex_u32(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|_| format!("invalid hex value: {}", s))
}

fn parse_encounter(s: &str) -> Result<Gen5Encounter, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|_| format!("unknown encounter: {}", s))
}

// =============================================================================
// Search driver
// =============================================================================

struct RunOptions {
    threads: Option<usize>,
    max_results: Option<u64>,
    output: OutputFormat,
}

fn run_search<S>(search: &S, opts: &RunOptions) -> Result<(), Box<dyn Error>>
where
    S: Search + ExpectedResults,
    S::Seed: Send,
    S::Result: Serialize,
{
    let expected = search.expected_number_of_results()?;
    if expected > RESULT_WARNING {
        warn!(expected, "search is expected to produce many results");
    } else {
        info!(expected, "expected results");
    }

    let runner = SearchRunner::new(SearchOptions { threads: opts.threads });
    let start = Instant::now();
    let found = Cell::new(0u64);
    let mut collected = Vec::new();
    let mut progress = 0.0f64;

    let summary = runner.run(
        search,
        |result| {
            found.set(found.get() + 1);
            match opts.output {
                OutputFormat::Lines => match serde_json::to_string(&result) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!(error = %e, "failed to encode result"),
                },
                OutputFormat::Json => collected.push(result),
            }
        },
        |delta| {
            progress += delta;
            eprint!("\r[Search] Progress: {:.2}%", progress.min(100.0));
            let _ = io::stderr().flush();
            opts.max_results.is_none_or(|max| found.get() < max)
        },
    )?;
    eprintln!();

    if let OutputFormat::Json = opts.output {
        println!("{}", serde_json::to_string_pretty(&collected)?);
    }

    eprintln!(
        "Searched {} seeds, {} result(s){} in {:.2} seconds.",
        summary.seeds_searched,
        summary.results,
        if summary.cancelled { " (stopped early)" } else { "" },
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn caches(dir: Option<PathBuf>) -> Option<Arc<CacheManager>> {
    dir.map(CacheManager::new)
}

fn run_criteria_file(path: &Path, cache_dir: Option<PathBuf>, opts: &RunOptions) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    match serde_json::from_str(&text)? {
        CriteriaFile::Gen34(c) => run_search(&Gen34SeedSearch::new(c), opts),
        CriteriaFile::Gen4Time(c) => run_search(&Gen4TimeSeedSearch::new(c)?, opts),
        CriteriaFile::Gen5Iv(c) => run_search(&Gen5IvSearch::new(c, caches(cache_dir).as_ref())?, opts),
        CriteriaFile::Gen5Pid(c) => run_search(&Gen5PidSearch::new(c)?, opts),
        CriteriaFile::Gen5Egg(c) => run_search(&Gen5EggSearch::new(c)?, opts),
        CriteriaFile::TrainerId(c) => run_search(&TrainerIdSearch::new(c)?, opts),
        CriteriaFile::CGear(c) => run_search(&CGearSearch::new(c)?, opts),
        CriteriaFile::Spinner(c) => run_search(&SpinnerSearch::new(c)?, opts),
        CriteriaFile::DreamRadar(c) => run_search(&DreamRadarSearch::new(c)?, opts),
        CriteriaFile::HiddenHollow(c) => run_search(&HiddenHollowSearch::new(c)?, opts),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let opts = RunOptions {
        threads: cli.threads,
        max_results: cli.max_results,
        output: cli.output,
    };

    match cli.command {
        Command::Gen34 { method, ivs, pid, frames } => {
            let search = Gen34SeedSearch::new(Gen34SeedCriteria {
                method: method.into(),
                ivs: ivs.criteria()?,
                pid: pid.criteria(),
                frames,
                id: pid.id(),
            });
            run_search(&search, &opts)
        }
        Command::Gen5Iv { console, ivs, frames, roamer, cache_dir } => {
            let (_, ranges) = console.load()?;
            let criteria = Gen5IvCriteria {
                ranges,
                ivs: ivs.criteria()?,
                frames,
                roamer,
            };
            let search = Gen5IvSearch::new(criteria, caches(cache_dir).as_ref())?;
            if search.uses_cache() {
                info!("using seed cache");
            }
            run_search(&search, &opts)
        }
        Command::Gen5Pid { console, encounter, pid, frames, from_initial } => {
            let (profile, ranges) = console.load()?;
            let search = Gen5PidSearch::new(Gen5PidCriteria {
                ranges,
                encounter,
                ctx: PidContext::new(pid.id(), profile.version),
                pid: pid.criteria(),
                slot: None,
                frames,
                start_from_initial_pid_frame: from_initial,
                memory_link: profile.memory_link,
            })?;
            run_search(&search, &opts)
        }
        Command::TrainerId { console, tid, sid, shiny_pid, frames } => {
            let (_, ranges) = console.load()?;
            let search = TrainerIdSearch::new(TrainerIdCriteria {
                ranges,
                tid,
                sid,
                shiny_pid: shiny_pid.map(Pid),
                frames,
                from_new_game: true,
            })?;
            run_search(&search, &opts)
        }
        Command::Criteria { file, cache_dir } => run_criteria_file(&file, cache_dir, &opts),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
