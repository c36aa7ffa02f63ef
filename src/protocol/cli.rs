use super::Session;
use super::connect;
use crate::Chips;
use crate::RAISE_UNIT;
use crate::gameplay::Game;
use crate::strategy::InfosetEncoder;
use crate::strategy::StrategyStore;
use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use std::path::PathBuf;

/// Plays one seat of an ACPC match from a precomputed strategy table.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Game definition file shared with the dealer.
    pub game: PathBuf,
    /// Dealer host.
    pub host: String,
    /// Seat port the dealer assigned.
    pub port: u16,
    /// Strategy table: JSON object of key -> [codes, probabilities].
    #[arg(long, env = "ACPC_STRATEGY", default_value = "strategy.json")]
    pub strategy: PathBuf,
    /// Sampling seed; the clock when absent.
    #[arg(long, env = "ACPC_SEED")]
    pub seed: Option<u64>,
    /// Chips per raise bucket in infoset keys.
    #[arg(
        long,
        env = "ACPC_RAISE_UNIT",
        default_value_t = RAISE_UNIT,
        value_parser = clap::value_parser!(Chips).range(1..)
    )]
    pub unit: Chips,
    /// Characters for the dealt ranks in infoset keys, lowest first.
    #[arg(long, env = "ACPC_RANKS")]
    pub ranks: Option<String>,
    /// Directory for a debug log file.
    #[arg(long, env = "ACPC_LOGS")]
    pub logs: Option<PathBuf>,
}

impl Args {
    /// The configured seed, or microseconds since the epoch.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_micros() as u64)
                .unwrap_or_default()
        })
    }
    pub fn encoder(&self) -> InfosetEncoder {
        match &self.ranks {
            Some(ranks) => InfosetEncoder::new(self.unit).with_alphabet(ranks.chars()),
            None => InfosetEncoder::new(self.unit),
        }
    }
}

/// Loads both inputs, connects, and serves the match to its end.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let game = Game::load(&args.game)
        .with_context(|| format!("could not load game definition {}", args.game.display()))?;
    log::info!(
        "{:<32}{:<32}",
        "loaded game",
        format!("{} players, {} rounds, {}", game.players(), game.rounds(), game.betting())
    );
    let encoder = args.encoder();
    encoder
        .check(&game)
        .context("invalid infoset encoding settings")?;
    let store = StrategyStore::load(&args.strategy)?;
    let seed = args.seed();
    log::info!("{:<32}{:<32}", "sampling seed", seed);
    let connection = connect(&args.host, args.port)?;
    let rng = rand::rngs::SmallRng::seed_from_u64(seed);
    Session::new(&game, &store, connection.reader, connection.writer, rng)
        .with_encoder(encoder)
        .run()
        .context("match aborted")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_and_defaults() {
        let args = Args::try_parse_from(["player", "leduc.game", "localhost", "18791"]).unwrap();
        assert_eq!(args.game, PathBuf::from("leduc.game"));
        assert_eq!(args.host, "localhost");
        assert_eq!(args.port, 18791);
        assert_eq!(args.unit, RAISE_UNIT);
        assert!(args.ranks.is_none());
    }

    #[test]
    fn options() {
        let args = Args::try_parse_from([
            "player", "g", "h", "1", "--strategy", "s.json", "--seed", "42", "--unit", "50",
            "--ranks", "LMH",
        ])
        .unwrap();
        assert_eq!(args.strategy, PathBuf::from("s.json"));
        assert_eq!(args.seed(), 42);
        assert_eq!(args.encoder().unit(), 50);
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(Args::try_parse_from(["player", "g", "h"]).is_err());
        assert!(Args::try_parse_from(["player", "g", "h", "99999"]).is_err());
        assert!(Args::try_parse_from(["player", "g", "h", "port"]).is_err());
    }

    #[test]
    fn rejects_non_positive_unit() {
        assert!(Args::try_parse_from(["player", "g", "h", "1", "--unit", "0"]).is_err());
        assert!(Args::try_parse_from(["player", "g", "h", "1", "--unit", "-100"]).is_err());
    }

    #[test]
    fn bad_alphabet_fails_before_connecting() {
        use std::io::Write;
        let mut game = tempfile::NamedTempFile::new().unwrap();
        game.write_all(crate::gameplay::game::tests::LEDUC_NOLIMIT.as_bytes())
            .unwrap();
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        listener.set_nonblocking(true).unwrap();
        for ranks in ["LLH", "LH"] {
            let path = game.path().to_str().unwrap();
            let args = Args::try_parse_from([
                "player", path, "127.0.0.1", port.as_str(), "--ranks", ranks,
            ])
            .unwrap();
            let err = run(&args).unwrap_err();
            assert!(format!("{:#}", err).contains("rank alphabet"));
        }
        assert!(listener.accept().is_err());
    }

    #[test]
    fn missing_game_names_the_file() {
        let args = Args::try_parse_from(["player", "/nonexistent/leduc.game", "h", "1"]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/leduc.game"));
    }
}
