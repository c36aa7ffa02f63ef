use super::InfosetKey;
use crate::Chips;
use crate::MAX_ACTIONS;
use crate::MAX_BUCKET;
use crate::PLACEHOLDER;
use crate::Position;
use crate::RAISE_UNIT;
use crate::ROUND_SEPARATOR;
use crate::cards::Rank;
use crate::gameplay::Action;
use crate::gameplay::Game;
use crate::gameplay::MatchState;

/// Canonicalizes what one seat can observe into a strategy table key.
///
/// Implementations must be pure: the same game, state and viewer always
/// produce the same key, and nothing outside the arguments is read.
pub trait Encoder {
    fn encode(
        &self,
        game: &Game,
        state: &MatchState,
        viewer: Position,
    ) -> Result<InfosetKey, EncodeError>;
}

/// The canonical infoset encoding.
///
/// ```text
/// <own ranks, high to low><board ranks, reveal order><round>/<round>/...
/// ```
///
/// Each round renders one character per action: [`PLACEHOLDER`] for a fold
/// or call, and a bucket character for a raise, where the bucket is the
/// raise-to size divided by the unit and rounded up (`1..=9` as digits,
/// `10..=35` as `a..=z`). A round with an odd number of actions gets one
/// trailing placeholder. The current round is included, and rounds not
/// yet reached are not.
///
/// With `MATCHSTATE:1:3:r300c/r600:|Qh/As` the viewer holds a queen, the
/// board shows an ace, and the key is `QA3p/6p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfosetEncoder {
    unit: Chips,
    alphabet: Option<Vec<char>>,
}

impl Default for InfosetEncoder {
    fn default() -> Self {
        Self::new(RAISE_UNIT)
    }
}

impl InfosetEncoder {
    pub fn new(unit: Chips) -> Self {
        Self {
            unit,
            alphabet: None,
        }
    }
    /// Replaces the dealer's rank characters with one character per rank
    /// the game deals, lowest first.
    pub fn with_alphabet(self, alphabet: impl IntoIterator<Item = char>) -> Self {
        Self {
            alphabet: Some(alphabet.into_iter().collect()),
            ..self
        }
    }
    pub fn unit(&self) -> Chips {
        self.unit
    }

    /// Rejects settings that could not name every infoset of `game`:
    /// a non-positive unit, or an alphabet that is the wrong length or
    /// repeats a character.
    pub fn check(&self, game: &Game) -> Result<(), EncodeError> {
        if self.unit <= 0 {
            return Err(EncodeError::Unit(self.unit));
        }
        if let Some(alphabet) = &self.alphabet {
            let expected = game.rank_range().len();
            if alphabet.len() != expected {
                return Err(EncodeError::Alphabet {
                    expected,
                    found: alphabet.len(),
                });
            }
            let mut seen = alphabet.clone();
            seen.sort_unstable();
            if let Some(pair) = seen.windows(2).find(|w| w[0] == w[1]) {
                return Err(EncodeError::Repeated(pair[0]));
            }
        }
        Ok(())
    }

    fn rank(&self, game: &Game, rank: Rank) -> Result<char, EncodeError> {
        let ranks = game.rank_range();
        let index = ranks
            .iter()
            .position(|r| *r == rank)
            .ok_or(EncodeError::Rank(rank))?;
        match &self.alphabet {
            None => Ok(rank.char()),
            Some(alphabet) if alphabet.len() == ranks.len() => Ok(alphabet[index]),
            Some(alphabet) => Err(EncodeError::Alphabet {
                expected: ranks.len(),
                found: alphabet.len(),
            }),
        }
    }

    fn bucket(&self, size: Chips) -> Result<char, EncodeError> {
        if self.unit <= 0 {
            return Err(EncodeError::Unit(self.unit));
        }
        let bucket = (size as i64 + self.unit as i64 - 1).div_euclid(self.unit as i64);
        let c = if (1..=9).contains(&bucket) {
            char::from_digit(bucket as u32, 10)
        } else if (10..=MAX_BUCKET as i64).contains(&bucket) {
            char::from_u32('a' as u32 + (bucket - 10) as u32)
        } else {
            None
        };
        c.ok_or(EncodeError::Bucket { size, bucket })
    }

    fn token(&self, action: Action) -> Result<char, EncodeError> {
        match action {
            Action::Fold | Action::Call => Ok(PLACEHOLDER),
            Action::Raise(size) => self.bucket(size),
        }
    }
}

impl Encoder for InfosetEncoder {
    fn encode(
        &self,
        game: &Game,
        state: &MatchState,
        viewer: Position,
    ) -> Result<InfosetKey, EncodeError> {
        let mut hole = state.hole(viewer).iter().map(|c| c.rank()).collect::<Vec<_>>();
        if hole.is_empty() {
            return Err(EncodeError::Hidden(viewer));
        }
        hole.sort_by(|a, b| b.cmp(a));
        let mut key = KeyBuilder::new(game);
        for rank in hole.into_iter().chain(state.board().map(|c| c.rank())) {
            key.push(self.rank(game, rank)?);
        }
        for round in 0..=state.state().round() {
            let tokens = state
                .state()
                .actions(round)
                .map(|a| self.token(a))
                .collect::<Result<Vec<_>, _>>()?;
            key.round(tokens);
        }
        Ok(key.finish())
    }
}

/// Accumulates key characters, sized up front from the game's bounds.
struct KeyBuilder {
    chars: String,
    rounds: usize,
}

impl KeyBuilder {
    fn new(game: &Game) -> Self {
        let cards = game.hole_cards() + game.total_board_cards(game.rounds() - 1);
        let betting = game.rounds() * (MAX_ACTIONS + 2);
        Self {
            chars: String::with_capacity(cards + betting),
            rounds: 0,
        }
    }
    fn push(&mut self, c: char) {
        self.chars.push(c);
    }
    /// Appends one round's tokens, padded to even length.
    fn round(&mut self, tokens: Vec<char>) {
        if self.rounds > 0 {
            self.chars.push(ROUND_SEPARATOR);
        }
        let odd = tokens.len() % 2 == 1;
        self.chars.extend(tokens);
        if odd {
            self.chars.push(PLACEHOLDER);
        }
        self.rounds += 1;
    }
    fn finish(self) -> InfosetKey {
        InfosetKey::from(self.chars)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("rank {0} is not dealt in this game")]
    Rank(Rank),
    #[error("raise to {size} falls in bucket {bucket}, outside 1..={max}", max = MAX_BUCKET)]
    Bucket { size: Chips, bucket: i64 },
    #[error("hole cards of seat {0} are not visible")]
    Hidden(Position),
    #[error("rank alphabet has {found} characters, game deals {expected} ranks")]
    Alphabet { expected: usize, found: usize },
    #[error("rank alphabet repeats {0:?}")]
    Repeated(char),
    #[error("raise unit must be positive, got {0}")]
    Unit(Chips),
}
