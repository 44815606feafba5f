pub mod bustit;
pub mod calibration;
pub mod cards;
pub mod error;
pub mod gameplay;
pub mod save;
pub mod simulation;
pub mod table;

pub use bustit::*;
pub use calibration::*;
pub use cards::*;
pub use error::{Error, Result};
pub use gameplay::*;
pub use simulation::*;
pub use table::*;

/// dimensional analysis types
pub type Chips = f64;
pub type Percent = f64;
pub type Probability = f64;

// table and wager parameters
const BASE_BET: Chips = 100.0;
const FALLBACK_RATIO: f64 = 0.8;
const NATURAL_RETURN: f64 = 2.5;
const SHOE_DECKS: usize = 8;
const RESHUFFLE_AT: usize = 52;
const DEALER_STAND: u8 = 17;
const CASHOUT_BELOW: u8 = 17;

// cash-out calibration parameters
pub const TARGET_CASHOUT_RTP: Percent = 96.80;
pub const CALIBRATION_SEED: u64 = 42;
pub const DELTA_ROUNDS: usize = 500_000;
pub const DELTA_MIN: Chips = 0.0;
pub const DELTA_MAX: Chips = 80.0;
pub const DELTA_CLAMP: (Chips, Chips) = (50.0, 200.0);
pub const MIN_LEVERAGE: Probability = 0.005;
pub const SCALE_ROUNDS: usize = 2_000_000;
pub const SCALE_CLAMP: (Chips, Chips) = (40.0, 177.0);
pub const SCALE_BRACKET: (f64, f64) = (0.5, 2.0);
pub const MAX_SCALE_ITERATIONS: usize = 8;
pub const RTP_TOLERANCE: Percent = 0.05;
pub const TIE_EPSILON: Percent = 0.01;
pub const VERIFY_MARGIN: Percent = 0.02;
pub const SIMULATION_ROUNDS: usize = 10_000_000;

// bust side bet parameters
pub const TARGET_BUST_RTP: Percent = 94.12;
pub const BUST_HANDS: usize = 20_000_000;
pub const DECK_SWEEP: (usize, usize) = (1, 25);
const BUST_STAND: u8 = 17;
const BUST_MAX_CARDS: usize = 12;
const BUST_CAP: usize = 8;

/// rounds or hands between progress ticks
const PROGRESS_CHUNK: usize = 1_000_000;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "native")]
/// Monte Carlo RTP estimation for bust-it and cash-out blackjack
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
    /// Print the summary as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(clap::Subcommand, Debug)]
#[cfg(feature = "native")]
pub enum Command {
    /// Simulate both strategies against a cash-out table
    Rtp {
        /// Cash-out table to evaluate
        #[arg(long, default_value = "data/cashout.csv")]
        table: std::path::PathBuf,
        /// Rounds per strategy
        #[arg(long, env = "SIMULATION_ROUNDS", default_value_t = SIMULATION_ROUNDS)]
        rounds: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Also evaluate the backup copy of the table
        #[arg(long, env = "CALCULATE_BACKUP_RTP", default_value_t = false, action = clap::ArgAction::Set)]
        backup: bool,
    },
    /// Simulate the bust side bet for one deck model
    Bust {
        /// Finite shoe size; omit for the infinite-deck model
        #[arg(long)]
        decks: Option<usize>,
        /// Hands to simulate
        #[arg(long, default_value_t = BUST_HANDS)]
        hands: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Published RTP to compare against
        #[arg(long, default_value_t = TARGET_BUST_RTP)]
        target: Percent,
    },
    /// Sweep deck counts for the one closest to the published bust RTP
    Decks {
        /// Smallest deck count
        #[arg(long, default_value_t = DECK_SWEEP.0)]
        from: usize,
        /// Largest deck count
        #[arg(long, default_value_t = DECK_SWEEP.1)]
        to: usize,
        /// Hands per deck count
        #[arg(long, default_value_t = BUST_HANDS)]
        hands: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Published RTP to match
        #[arg(long, default_value_t = TARGET_BUST_RTP)]
        target: Percent,
    },
    /// Shift only the unknown cells of a table toward the target RTP
    Delta {
        /// Cash-out table to calibrate
        #[arg(long, default_value = "data/cashout.csv")]
        table: std::path::PathBuf,
        /// Observed table whose empty cells mark the unknowns
        #[arg(long, default_value = "data/observed.csv")]
        observed: std::path::PathBuf,
        #[arg(long, default_value_t = TARGET_CASHOUT_RTP)]
        target: Percent,
        #[arg(long, env = "CALIBRATION_ROUNDS", default_value_t = DELTA_ROUNDS)]
        rounds: usize,
        #[arg(long, default_value_t = CALIBRATION_SEED)]
        seed: u64,
        #[arg(long, env = "CASHOUT_MIN", default_value_t = DELTA_CLAMP.0)]
        min: Chips,
        #[arg(long, env = "CASHOUT_MAX", default_value_t = DELTA_CLAMP.1)]
        max: Chips,
        /// Extra re-measure and re-apply steps after the one-shot estimate
        #[arg(long, default_value_t = 0)]
        refine: usize,
        /// Report without writing the table
        #[arg(long)]
        dry_run: bool,
    },
    /// Rescale the whole table toward the target RTP by bisection
    Scale {
        /// Cash-out table to calibrate
        #[arg(long, default_value = "data/cashout.csv")]
        table: std::path::PathBuf,
        #[arg(long, default_value_t = TARGET_CASHOUT_RTP)]
        target: Percent,
        #[arg(long, env = "CALIBRATION_ROUNDS", default_value_t = SCALE_ROUNDS)]
        rounds: usize,
        #[arg(long, default_value_t = CALIBRATION_SEED)]
        seed: u64,
        #[arg(long, env = "CASHOUT_MIN", default_value_t = SCALE_CLAMP.0)]
        min: Chips,
        #[arg(long, env = "CASHOUT_MAX", default_value_t = SCALE_CLAMP.1)]
        max: Chips,
        #[arg(long, env = "RTP_TOLERANCE", default_value_t = RTP_TOLERANCE)]
        tolerance: Percent,
        #[arg(long, env = "MAX_SCALE_ITERATIONS", default_value_t = MAX_SCALE_ITERATIONS)]
        iterations: usize,
        /// How to choose between statistically indistinguishable candidates
        #[arg(long, value_enum, default_value_t = calibration::TieBreak::Conservative)]
        tie_break: calibration::TieBreak,
        /// Re-check the winner on a fresh seed with this many rounds
        #[arg(long)]
        verify: Option<usize>,
        /// Report without writing the table
        #[arg(long)]
        dry_run: bool,
    },
    /// Regression estimate of a cash-out cell, or a whole generated table
    Estimate {
        /// Player total, 4..=21
        #[arg(long, required_unless_present = "out")]
        total: Option<u8>,
        /// Dealer upcard, 2..=11
        #[arg(long, required_unless_present = "out")]
        upcard: Option<u8>,
        #[arg(long)]
        soft: bool,
        /// Write a full generated table here instead of a single estimate
        #[arg(long)]
        out: Option<std::path::PathBuf>,
        #[arg(long, default_value_t = SCALE_CLAMP.0)]
        min: Chips,
        #[arg(long, default_value_t = SCALE_CLAMP.1)]
        max: Chips,
    },
}

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// progress bar
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(1);
    let style =
        "{spinner:.cyan} [{pos}/{len}] {elapsed} @ {per_sec:>12} ~ {percent:>3}% {wide_bar:.cyan}";
    let progress = indicatif::ProgressBar::new(n as u64);
    if let Ok(style) = indicatif::ProgressStyle::with_template(style) {
        progress.set_style(style);
    }
    progress.enable_steady_tick(tick);
    progress
}

/// initialize terminal and file logging
#[cfg(feature = "native")]
pub fn logs() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
