use super::ActionEncoder;
use crate::gameplay::Action;
use crate::gameplay::Game;
use crate::gameplay::MatchState;
use crate::gameplay::StateError;
use crate::strategy::Draw;
use crate::strategy::EncodeError;
use crate::strategy::Encoder;
use crate::strategy::InfosetEncoder;
use crate::strategy::StrategyStore;
use crate::strategy::decide;
use rand::rngs::SmallRng;
use std::io::BufRead;
use std::io::Write;

/// The request/response loop against the dealer.
///
/// Every line read is either skipped (comments, blank lines, states where
/// another seat acts or the hand is over) or answered with exactly one
/// response, written and flushed as a unit:
///
/// ```text
/// MATCHSTATE:0:17:r300:|Ks      <- dealer
/// MATCHSTATE:0:17:r300:|Ks:c\r\n -> dealer
/// ```
///
/// An unparsable line, a key that cannot be encoded, or a sampled action
/// the rules forbid ends the session with an error; no substitute action
/// is ever sent for those.
pub struct Session<'a, R, W, E = InfosetEncoder, D = SmallRng> {
    game: &'a Game,
    store: &'a StrategyStore,
    encoder: E,
    draws: D,
    actions: ActionEncoder,
    reader: R,
    writer: W,
    tally: Tally,
}

/// What a session did before the dealer hung up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub decisions: usize,
    pub misses: usize,
    pub skipped: usize,
}

impl<'a, R, W, D> Session<'a, R, W, InfosetEncoder, D>
where
    R: BufRead,
    W: Write,
    D: Draw,
{
    pub fn new(game: &'a Game, store: &'a StrategyStore, reader: R, writer: W, draws: D) -> Self {
        Self {
            game,
            store,
            encoder: InfosetEncoder::default(),
            draws,
            actions: ActionEncoder::from(game.betting()),
            reader,
            writer,
            tally: Tally::default(),
        }
    }
}

impl<'a, R, W, E, D> Session<'a, R, W, E, D>
where
    R: BufRead,
    W: Write,
    E: Encoder,
    D: Draw,
{
    pub fn with_encoder<F: Encoder>(self, encoder: F) -> Session<'a, R, W, F, D> {
        Session {
            game: self.game,
            store: self.store,
            encoder,
            draws: self.draws,
            actions: self.actions,
            reader: self.reader,
            writer: self.writer,
            tally: self.tally,
        }
    }
    pub fn tally(&self) -> Tally {
        self.tally
    }
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Serves lines until the dealer closes the stream.
    pub fn run(&mut self) -> Result<Tally, SessionError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            if let Some(response) = self.respond(&line)? {
                self.writer.write_all(response.as_bytes())?;
                self.writer.flush()?;
            }
        }
        log::info!(
            "dealer closed the match after {} decisions ({} unsolved, {} lines skipped)",
            self.tally.decisions,
            self.tally.misses,
            self.tally.skipped
        );
        Ok(self.tally)
    }

    /// The response to one received line, if it calls for one.
    pub fn respond(&mut self, line: &str) -> Result<Option<String>, SessionError> {
        let text = line.trim_end_matches(['\r', '\n']);
        if text.trim().is_empty() || text.starts_with('#') || text.starts_with(';') {
            self.tally.skipped += 1;
            return Ok(None);
        }
        let state = MatchState::parse(text, self.game).map_err(|source| SessionError::Parse {
            line: text.to_string(),
            source,
        })?;
        if !state.acting(self.game) {
            log::trace!("waiting {}", state);
            self.tally.skipped += 1;
            return Ok(None);
        }
        let action = self.decide(&state)?;
        self.tally.decisions += 1;
        Ok(Some(format!("{}:{}\r\n", state.line(), self.actions.encode(action))))
    }

    fn decide(&mut self, state: &MatchState) -> Result<Action, SessionError> {
        let game = self.game;
        let key = self.encoder.encode(game, state, state.viewer())?;
        let entry = self.store.lookup(&key);
        let action = decide(entry, self.draws.draw());
        let replay = state.state();
        let action = match entry {
            Some(entry) => {
                log::debug!("{} {} {}", state, key, entry);
                action
            }
            None => {
                log::debug!("{} {} unsolved", state, key);
                self.tally.misses += 1;
                match replay.is_valid(game, &action) {
                    true => action,
                    false => {
                        let passive = replay.passive(game);
                        log::debug!("{} cannot fold, degrading to {}", state.line(), passive);
                        passive
                    }
                }
            }
        };
        let action = replay.snap(game, action);
        log::debug!("{} {} -> {}", state.line(), key, action);
        match replay.is_valid(game, &action) {
            true => Ok(action),
            false => Err(SessionError::Illegal {
                action,
                line: state.line().to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unparsable state {line:?}")]
    Parse {
        line: String,
        #[source]
        source: StateError,
    },
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("sampled action {action} is illegal at {line:?}")]
    Illegal { action: Action, line: String },
    #[error("dealer connection failed: {0}")]
    Io(#[from] std::io::Error),
}
