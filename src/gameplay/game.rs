use crate::Chips;
use crate::MAX_PLAYERS;
use crate::MAX_ROUNDS;
use crate::Position;
use crate::cards::Rank;
use crate::cards::Suit;

/// How raise sizes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Betting {
    /// Every raise adds the round's fixed `raiseSize`.
    Limit,
    /// Raises name any raise-to amount between the minimum and the stack.
    NoLimit,
}

impl std::fmt::Display for Betting {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Betting::Limit => write!(f, "limit"),
            Betting::NoLimit => write!(f, "nolimit"),
        }
    }
}

/// Static rules of a match, read once from the dealer's game definition.
///
/// ```text
/// GAMEDEF
/// nolimit
/// numPlayers = 2
/// numRounds = 2
/// stack = 1200 1200
/// blind = 100 100
/// firstPlayer = 1 1
/// numSuits = 2
/// numRanks = 3
/// numHoleCards = 1
/// numBoardCards = 0 1
/// END GAMEDEF
/// ```
///
/// Per-round lists are indexed by round, per-player lists by seat.
/// `firstPlayer` is 1-based on disk and 0-based here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    betting: Betting,
    players: usize,
    rounds: usize,
    stack: Vec<Chips>,
    blind: Vec<Chips>,
    raise_size: Vec<Chips>,
    first_player: Vec<Position>,
    max_raises: Vec<usize>,
    ranks: usize,
    hole_cards: usize,
    board_cards: Vec<usize>,
}

impl Game {
    pub fn load(path: &std::path::Path) -> Result<Self, GameError> {
        std::fs::read_to_string(path)
            .map_err(|source| GameError::Read {
                path: path.display().to_string(),
                source,
            })?
            .parse()
    }

    pub fn betting(&self) -> Betting {
        self.betting
    }
    pub fn players(&self) -> usize {
        self.players
    }
    pub fn rounds(&self) -> usize {
        self.rounds
    }
    pub fn stack(&self, player: Position) -> Chips {
        self.stack[player]
    }
    pub fn blind(&self, player: Position) -> Chips {
        self.blind[player]
    }
    pub fn raise_size(&self, round: usize) -> Chips {
        self.raise_size.get(round).copied().unwrap_or(0)
    }
    pub fn first_player(&self, round: usize) -> Position {
        self.first_player[round]
    }
    pub fn max_raises(&self, round: usize) -> usize {
        self.max_raises[round]
    }
    pub fn ranks(&self) -> usize {
        self.ranks
    }
    pub fn hole_cards(&self) -> usize {
        self.hole_cards
    }
    pub fn board_cards(&self, round: usize) -> usize {
        self.board_cards[round]
    }
    /// Board cards revealed once `round` is reached.
    pub fn total_board_cards(&self, round: usize) -> usize {
        self.board_cards[..=round.min(self.rounds - 1)].iter().sum()
    }
    /// The ranks dealt in this game, lowest first.
    pub fn rank_range(&self) -> &'static [Rank] {
        Rank::top(self.ranks)
    }
    /// Largest blind, the reference for no-limit minimum raises.
    pub fn big_blind(&self) -> Chips {
        self.blind.iter().copied().max().unwrap_or(0)
    }
}

impl std::str::FromStr for Game {
    type Err = GameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut draft = Draft::default();
        for line in s.lines().map(str::trim) {
            let lower = line.to_ascii_lowercase();
            match lower.as_str() {
                "" => continue,
                l if l.starts_with('#') => continue,
                l if l.starts_with("end gamedef") => break,
                l if l.starts_with("gamedef") => continue,
                l if l.starts_with("nolimit") => draft.betting = Some(Betting::NoLimit),
                l if l.starts_with("limit") => draft.betting = Some(Betting::Limit),
                l => {
                    let (key, values) = l
                        .split_once('=')
                        .ok_or_else(|| GameError::Syntax(line.to_string()))?;
                    draft.set(key.trim(), values)?;
                }
            }
        }
        draft.build()
    }
}

/// Keys collected while reading, before cross-field validation.
#[derive(Default)]
struct Draft {
    betting: Option<Betting>,
    players: Option<usize>,
    rounds: Option<usize>,
    stack: Option<Vec<Chips>>,
    blind: Option<Vec<Chips>>,
    raise_size: Option<Vec<Chips>>,
    first_player: Option<Vec<usize>>,
    max_raises: Option<Vec<usize>>,
    suits: Option<usize>,
    ranks: Option<usize>,
    hole_cards: Option<usize>,
    board_cards: Option<Vec<usize>>,
}

impl Draft {
    fn set(&mut self, key: &str, values: &str) -> Result<(), GameError> {
        match key {
            "numplayers" => self.players = Some(Self::one(key, values)?),
            "numrounds" => self.rounds = Some(Self::one(key, values)?),
            "numsuits" => self.suits = Some(Self::one(key, values)?),
            "numranks" => self.ranks = Some(Self::one(key, values)?),
            "numholecards" => self.hole_cards = Some(Self::one(key, values)?),
            "stack" => self.stack = Some(Self::many(key, values)?),
            "blind" => self.blind = Some(Self::many(key, values)?),
            "raisesize" => self.raise_size = Some(Self::many(key, values)?),
            "firstplayer" => self.first_player = Some(Self::many(key, values)?),
            "maxraises" => self.max_raises = Some(Self::many(key, values)?),
            "numboardcards" => self.board_cards = Some(Self::many(key, values)?),
            _ => return Err(GameError::Key(key.to_string())),
        }
        Ok(())
    }
    fn many<T>(key: &str, values: &str) -> Result<Vec<T>, GameError>
    where
        T: std::str::FromStr,
    {
        values
            .split_whitespace()
            .map(|v| {
                v.parse::<T>().map_err(|_| GameError::Value {
                    key: key.to_string(),
                    value: v.to_string(),
                })
            })
            .collect()
    }
    fn one<T>(key: &str, values: &str) -> Result<T, GameError>
    where
        T: std::str::FromStr,
    {
        let mut many = Self::many::<T>(key, values)?;
        match many.len() {
            1 => Ok(many.remove(0)),
            n => Err(GameError::Arity {
                key: key.to_string(),
                expected: 1,
                found: n,
            }),
        }
    }
    fn arity<T>(key: &'static str, list: &[T], expected: usize) -> Result<(), GameError> {
        match list.len() == expected {
            true => Ok(()),
            false => Err(GameError::Arity {
                key: key.to_string(),
                expected,
                found: list.len(),
            }),
        }
    }
    fn range(key: &'static str, value: usize, lo: usize, hi: usize) -> Result<usize, GameError> {
        match (lo..=hi).contains(&value) {
            true => Ok(value),
            false => Err(GameError::Range {
                key,
                value: value as i64,
            }),
        }
    }

    fn build(self) -> Result<Game, GameError> {
        let betting = self.betting.ok_or(GameError::Missing("limit | nolimit"))?;
        let players = self.players.ok_or(GameError::Missing("numPlayers"))?;
        let players = Self::range("numPlayers", players, 2, MAX_PLAYERS)?;
        let rounds = self.rounds.ok_or(GameError::Missing("numRounds"))?;
        let rounds = Self::range("numRounds", rounds, 1, MAX_ROUNDS)?;
        let suits = self.suits.ok_or(GameError::Missing("numSuits"))?;
        let suits = Self::range("numSuits", suits, 1, Suit::COUNT)?;
        let ranks = self.ranks.ok_or(GameError::Missing("numRanks"))?;
        let ranks = Self::range("numRanks", ranks, 1, Rank::COUNT)?;
        let hole_cards = self.hole_cards.ok_or(GameError::Missing("numHoleCards"))?;
        let hole_cards = Self::range("numHoleCards", hole_cards, 1, suits * ranks)?;
        let board_cards = self.board_cards.unwrap_or_else(|| vec![0; rounds]);
        Self::arity("numBoardCards", &board_cards, rounds)?;
        let blind = self.blind.ok_or(GameError::Missing("blind"))?;
        Self::arity("blind", &blind, players)?;
        let stack = match (betting, self.stack) {
            (_, Some(stack)) => stack,
            (Betting::Limit, None) => vec![Chips::MAX; players],
            (Betting::NoLimit, None) => return Err(GameError::Missing("stack")),
        };
        Self::arity("stack", &stack, players)?;
        let raise_size = match (betting, self.raise_size) {
            (Betting::Limit, Some(sizes)) => sizes,
            (Betting::Limit, None) => return Err(GameError::Missing("raiseSize")),
            (Betting::NoLimit, sizes) => sizes.unwrap_or_default(),
        };
        if betting == Betting::Limit {
            Self::arity("raiseSize", &raise_size, rounds)?;
        }
        let first_player = self.first_player.unwrap_or_else(|| vec![1; rounds]);
        Self::arity("firstPlayer", &first_player, rounds)?;
        let first_player = first_player
            .into_iter()
            .map(|p| Self::range("firstPlayer", p, 1, players).map(|p| p - 1))
            .collect::<Result<Vec<_>, _>>()?;
        let max_raises = self.max_raises.unwrap_or_else(|| vec![usize::MAX; rounds]);
        Self::arity("maxRaises", &max_raises, rounds)?;
        let dealt = hole_cards * players + board_cards.iter().sum::<usize>();
        if dealt > suits * ranks {
            return Err(GameError::Range {
                key: "numBoardCards",
                value: dealt as i64,
            });
        }
        for (p, (&b, &s)) in blind.iter().zip(stack.iter()).enumerate() {
            if b < 0 || s <= 0 || b > s {
                return Err(GameError::Range {
                    key: "blind",
                    value: blind[p] as i64,
                });
            }
        }
        Ok(Game {
            betting,
            players,
            rounds,
            stack,
            blind,
            raise_size,
            first_player,
            max_raises,
            ranks,
            hole_cards,
            board_cards,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("could not read game {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed game definition line {0:?}")]
    Syntax(String),
    #[error("unknown game definition key {0:?}")]
    Key(String),
    #[error("invalid value {value:?} for {key}")]
    Value { key: String, value: String },
    #[error("{key} expects {expected} values, found {found}")]
    Arity {
        key: String,
        expected: usize,
        found: usize,
    },
    #[error("{key} out of range: {value}")]
    Range { key: &'static str, value: i64 },
    #[error("game definition is missing {0}")]
    Missing(&'static str),
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two-round, three-rank no-limit game with one hole and one board card.
    pub(crate) const LEDUC_NOLIMIT: &str = "\
GAMEDEF
nolimit
numPlayers = 2
numRounds = 2
stack = 1200 1200
blind = 100 100
firstPlayer = 1 1
numSuits = 2
numRanks = 3
numHoleCards = 1
numBoardCards = 0 1
END GAMEDEF
";

    /// Limit Leduc with the usual 2/4 raise structure.
    pub(crate) const LEDUC_LIMIT: &str = "\
GAMEDEF
limit
numPlayers = 2
numRounds = 2
blind = 1 1
raiseSize = 2 4
firstPlayer = 1 1
maxRaises = 2 2
numSuits = 2
numRanks = 3
numHoleCards = 1
numBoardCards = 0 1
END GAMEDEF
";

    /// Heads-up no-limit hold'em with reversed blinds.
    pub(crate) const HOLDEM_NOLIMIT: &str = "\
# heads-up no-limit
GAMEDEF
nolimit
numPlayers = 2
numRounds = 4
stack = 20000 20000
blind = 100 50
firstPlayer = 2 1 1 1
numSuits = 4
numRanks = 13
numHoleCards = 2
numBoardCards = 0 3 1 1
END GAMEDEF
";

    #[test]
    fn parse_nolimit() {
        let game = LEDUC_NOLIMIT.parse::<Game>().unwrap();
        assert_eq!(game.betting(), Betting::NoLimit);
        assert_eq!(game.players(), 2);
        assert_eq!(game.rounds(), 2);
        assert_eq!(game.stack(1), 1200);
        assert_eq!(game.first_player(0), 0);
        assert_eq!(game.max_raises(1), usize::MAX);
        assert_eq!(game.total_board_cards(1), 1);
        assert_eq!(game.rank_range(), &[Rank::Queen, Rank::King, Rank::Ace]);
    }

    #[test]
    fn parse_limit_defaults_stack() {
        let game = LEDUC_LIMIT.parse::<Game>().unwrap();
        assert_eq!(game.betting(), Betting::Limit);
        assert_eq!(game.stack(0), Chips::MAX);
        assert_eq!(game.raise_size(1), 4);
        assert_eq!(game.max_raises(0), 2);
    }

    #[test]
    fn parse_holdem() {
        let game = HOLDEM_NOLIMIT.parse::<Game>().unwrap();
        assert_eq!(game.first_player(0), 1);
        assert_eq!(game.first_player(3), 0);
        assert_eq!(game.big_blind(), 100);
        assert_eq!(game.total_board_cards(3), 5);
        assert_eq!(game.rank_range().len(), 13);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let text = LEDUC_NOLIMIT.replace("numPlayers", "NUMPLAYERS");
        assert!(text.parse::<Game>().is_ok());
    }

    #[test]
    fn rejects_missing_keys() {
        let text = LEDUC_NOLIMIT.replace("numRanks = 3\n", "");
        assert!(matches!(
            text.parse::<Game>(),
            Err(GameError::Missing("numRanks"))
        ));
        let text = LEDUC_LIMIT.replace("raiseSize = 2 4\n", "");
        assert!(matches!(
            text.parse::<Game>(),
            Err(GameError::Missing("raiseSize"))
        ));
    }

    #[test]
    fn rejects_bad_arity() {
        let text = LEDUC_NOLIMIT.replace("stack = 1200 1200", "stack = 1200");
        assert!(matches!(text.parse::<Game>(), Err(GameError::Arity { .. })));
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        let text = LEDUC_NOLIMIT.replace("numSuits = 2", "numSuitz = 2");
        assert!(matches!(text.parse::<Game>(), Err(GameError::Key(_))));
        let text = LEDUC_NOLIMIT.replace("numSuits = 2", "numSuits = two");
        assert!(matches!(text.parse::<Game>(), Err(GameError::Value { .. })));
        let text = LEDUC_NOLIMIT.replace("numSuits = 2", "numSuits 2");
        assert!(matches!(text.parse::<Game>(), Err(GameError::Syntax(_))));
    }

    #[test]
    fn rejects_oversized_deal() {
        let text = LEDUC_NOLIMIT.replace("numHoleCards = 1", "numHoleCards = 3");
        assert!(matches!(text.parse::<Game>(), Err(GameError::Range { .. })));
    }

    #[test]
    fn load_reports_path() {
        let err = Game::load(std::path::Path::new("/nonexistent/leduc.game")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/leduc.game"));
    }
}
