use super::Action;
use super::Betting;
use super::Game;
use super::State;
use crate::MATCHSTATE;
use crate::Position;
use crate::cards::Card;
use crate::cards::CardError;

/// One dealer notification, parsed and replayed.
///
/// ```text
/// MATCHSTATE:<seat>:<hand>:<betting>:<cards>
/// MATCHSTATE:0:17:r300c/c:Ks|/Qh
/// ```
///
/// Betting rounds are separated by `/`; cards are one `|`-separated hole
/// group per seat (empty when hidden) followed by `/`-prefixed board cards
/// for every round reached. The line is kept verbatim (minus its
/// terminator) because the response echoes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    viewer: Position,
    hand: u32,
    betting: Betting,
    state: State,
    holes: Vec<Vec<Card>>,
    board: Vec<Vec<Card>>,
    line: String,
}

impl MatchState {
    pub fn viewer(&self) -> Position {
        self.viewer
    }
    pub fn hand(&self) -> u32 {
        self.hand
    }
    pub fn state(&self) -> &State {
        &self.state
    }
    /// Hole cards of `player`; empty when the dealer hides them.
    pub fn hole(&self, player: Position) -> &[Card] {
        &self.holes[player]
    }
    /// The viewer's own hole cards.
    pub fn own(&self) -> &[Card] {
        &self.holes[self.viewer]
    }
    /// Board cards in reveal order.
    pub fn board(&self) -> impl Iterator<Item = Card> + '_ {
        self.board.iter().flatten().copied()
    }
    /// Board cards revealed at the start of `round`.
    pub fn board_at(&self, round: usize) -> &[Card] {
        self.board.get(round).map(Vec::as_slice).unwrap_or(&[])
    }
    /// The received line without its terminator.
    pub fn line(&self) -> &str {
        &self.line
    }
    pub fn finished(&self) -> bool {
        self.state.finished()
    }
    /// Whether the viewer is the seat to act.
    pub fn acting(&self, game: &Game) -> bool {
        !self.state.finished() && self.state.player(game) == self.viewer
    }

    pub fn parse(line: &str, game: &Game) -> Result<Self, StateError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.splitn(5, ':');
        match fields.next() {
            Some(MATCHSTATE) => {}
            _ => return Err(StateError::Header(line.to_string())),
        }
        let (Some(seat), Some(hand), Some(betting), Some(cards)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(StateError::Header(line.to_string()));
        };
        let viewer = seat
            .parse::<Position>()
            .ok()
            .filter(|p| *p < game.players())
            .ok_or_else(|| StateError::Seat(seat.to_string()))?;
        let hand = hand
            .parse::<u32>()
            .map_err(|_| StateError::Hand(hand.to_string()))?;
        let state = Self::replay(betting, game)?;
        let (holes, board) = Self::deal(cards, &state, game)?;
        if holes[viewer].is_empty() {
            return Err(StateError::Hidden(viewer));
        }
        Ok(Self {
            viewer,
            hand,
            betting: game.betting(),
            state,
            holes,
            board,
            line: line.to_string(),
        })
    }

    fn replay(betting: &str, game: &Game) -> Result<State, StateError> {
        let mut state = State::new(game);
        let mut separators = 0;
        let mut chars = betting.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            match c {
                '/' if separators < state.round() => separators += 1,
                '/' => return Err(StateError::Separator(i)),
                _ if separators < state.round() => return Err(StateError::Separator(i)),
                _ if state.finished() => return Err(StateError::Trailing(betting[i..].to_string())),
                _ => {
                    let mut end = i + c.len_utf8();
                    if c == 'r' {
                        while let Some((j, _)) = chars.next_if(|(_, d)| d.is_ascii_digit()) {
                            end = j + 1;
                        }
                    }
                    let token = &betting[i..end];
                    let action = Action::try_from(token)
                        .map_err(|_| StateError::Action(token.to_string()))?;
                    if !state.is_valid(game, &action) {
                        return Err(StateError::Illegal {
                            action: token.to_string(),
                            round: state.round(),
                        });
                    }
                    state.apply(game, action);
                }
            }
        }
        match separators == state.round() {
            true => Ok(state),
            false => Err(StateError::Separator(betting.len())),
        }
    }

    #[allow(clippy::type_complexity)]
    fn deal(
        cards: &str,
        state: &State,
        game: &Game,
    ) -> Result<(Vec<Vec<Card>>, Vec<Vec<Card>>), StateError> {
        let mut segments = cards.split('/');
        let holes = segments
            .next()
            .unwrap_or_default()
            .split('|')
            .map(Card::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if holes.len() != game.players() {
            return Err(StateError::Seats(holes.len()));
        }
        for (player, hole) in holes.iter().enumerate() {
            if !hole.is_empty() && hole.len() != game.hole_cards() {
                return Err(StateError::HoleCount {
                    player,
                    found: hole.len(),
                });
            }
        }
        let rounds = (0..=state.round())
            .filter(|&r| r > 0 || game.board_cards(0) > 0)
            .collect::<Vec<_>>();
        let segments = segments.collect::<Vec<_>>();
        if segments.len() != rounds.len() {
            return Err(StateError::BoardRounds {
                expected: rounds.len(),
                found: segments.len(),
            });
        }
        let mut board = vec![Vec::new(); state.round() + 1];
        for (round, segment) in rounds.into_iter().zip(segments) {
            let cards = Card::parse(segment)?;
            if cards.len() != game.board_cards(round) {
                return Err(StateError::BoardCount {
                    round,
                    found: cards.len(),
                });
            }
            board[round] = cards;
        }
        let mut seen = holes.iter().chain(board.iter()).flatten().collect::<Vec<_>>();
        seen.sort();
        if let Some(pair) = seen.windows(2).find(|w| w[0] == w[1]) {
            return Err(StateError::Duplicate(*pair[0]));
        }
        Ok((holes, board))
    }
}

/// Prints the state the way the dealer does.
impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}:{}:", MATCHSTATE, self.viewer, self.hand)?;
        for round in 0..=self.state.round() {
            if round > 0 {
                write!(f, "/")?;
            }
            for action in self.state.actions(round) {
                match (self.betting, action) {
                    (Betting::Limit, Action::Raise(_)) => write!(f, "r")?,
                    _ => write!(f, "{}", action)?,
                }
            }
        }
        write!(f, ":")?;
        let holes = self
            .holes
            .iter()
            .map(|h| Card::join(h))
            .collect::<Vec<_>>()
            .join("|");
        write!(f, "{}", holes)?;
        for (round, cards) in self.board.iter().enumerate() {
            if round > 0 || !cards.is_empty() {
                write!(f, "/{}", Card::join(cards))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("not a match state: {0:?}")]
    Header(String),
    #[error("invalid seat {0:?}")]
    Seat(String),
    #[error("invalid hand number {0:?}")]
    Hand(String),
    #[error("invalid action {0:?}")]
    Action(String),
    #[error("illegal action {action:?} in round {round}")]
    Illegal { action: String, round: usize },
    #[error("misplaced round separator at {0}")]
    Separator(usize),
    #[error("actions after the hand ended: {0:?}")]
    Trailing(String),
    #[error("expected one hole group per seat, found {0}")]
    Seats(usize),
    #[error("seat {player} shows {found} hole cards")]
    HoleCount { player: Position, found: usize },
    #[error("expected board cards for {expected} rounds, found {found}")]
    BoardRounds { expected: usize, found: usize },
    #[error("round {round} shows {found} board cards")]
    BoardCount { round: usize, found: usize },
    #[error("card {0} dealt twice")]
    Duplicate(Card),
    #[error("own hole cards missing for seat {0}")]
    Hidden(Position),
    #[error(transparent)]
    Card(#[from] CardError),
}
