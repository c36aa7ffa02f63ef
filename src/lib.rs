//! Blueprint-strategy player for the ACPC dealer protocol.
//!
//! The crate plays one seat of a match against the ACPC dealer: every state
//! line the dealer sends is replayed, canonicalized into an infoset key, and
//! answered with an action sampled from a precomputed strategy table.
//!
//! ## Modules
//!
//! - [`cards`]: rank, suit, and card text as the dealer writes them
//! - [`gameplay`]: game definitions, betting replay, match states, actions
//! - [`strategy`]: infoset keys, the strategy table, and action sampling
//! - [`protocol`]: wire framing and the request/response session loop

pub mod cards;
pub mod gameplay;
pub mod protocol;
pub mod strategy;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Chip amounts: stacks, blinds, raise-to sizes, pot.
pub type Chips = i32;
/// Seat index around the table, as numbered by the dealer (0-based).
pub type Position = usize;
/// Strategy weights and sampling draws.
pub type Probability = f64;

// ============================================================================
// PROTOCOL PARAMETERS
// ============================================================================
/// Version line sent to the dealer right after connecting.
pub const VERSION: &str = "VERSION:2.0.0\n";
/// Prefix of every state notification from the dealer.
pub const MATCHSTATE: &str = "MATCHSTATE";
/// Upper bound on players the dealer supports.
pub const MAX_PLAYERS: usize = 10;
/// Upper bound on betting rounds the dealer supports.
pub const MAX_ROUNDS: usize = 4;
/// Upper bound on actions within a single betting round.
pub const MAX_ACTIONS: usize = 64;

// ============================================================================
// INFOSET ENCODING
// Private ranks, board ranks, then bucketed betting per round.
// ============================================================================
/// Default bet granularity used to bucket raise sizes.
pub const RAISE_UNIT: Chips = 100;
/// Token for folds, calls, checks, and odd-length round padding.
pub const PLACEHOLDER: char = 'p';
/// Joins consecutive betting rounds in an infoset key.
pub const ROUND_SEPARATOR: char = '/';
/// Largest raise bucket that has a character ('1'..='9' then 'a'..='z').
pub const MAX_BUCKET: Chips = 35;

// ============================================================================
// STRATEGY TABLE
// ============================================================================
/// Allowed deviation of a strategy entry's probability mass from 1.
pub const TOLERANCE: Probability = 1e-6;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize logging. INFO goes to the terminal (stderr, so protocol
/// bytes on stdout are never interleaved); when a directory is given, DEBUG
/// additionally goes to a timestamped file inside it.
#[cfg(feature = "cli")]
pub fn log(dir: Option<&std::path::Path>) -> anyhow::Result<()> {
    use anyhow::Context;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) as Box<dyn simplelog::SharedLogger>;
    let mut loggers = vec![term];
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create log directory {}", dir.display()))?;
        let time = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .context("system clock before epoch")?
            .as_secs();
        let path = dir.join(format!("{}.log", time));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("could not create log file {}", path.display()))?;
        loggers.push(simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            config,
            file,
        ));
    }
    simplelog::CombinedLogger::init(loggers).context("could not initialize logger")
}
