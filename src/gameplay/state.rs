use super::Action;
use super::Betting;
use super::Game;
use crate::Chips;
use crate::MAX_ACTIONS;
use crate::Position;

/// Betting history of one hand, replayed under the dealer's rules.
///
/// A `State` only knows chips and turns; cards live in [`MatchState`].
/// It is built by applying actions one at a time from the blinds, which
/// is exactly how the dealer derives whose turn it is, what is owed, and
/// when a round or the hand is over.
///
/// [`MatchState`]: super::MatchState
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    round: usize,
    /// (actor, action) pairs for every round reached so far.
    history: Vec<Vec<(Position, Action)>>,
    spent: Vec<Chips>,
    folded: Vec<bool>,
    max_spent: Chips,
    min_raise_to: Chips,
    finished: bool,
}

impl State {
    /// Blinds posted, nobody has acted.
    pub fn new(game: &Game) -> Self {
        let spent = (0..game.players())
            .map(|p| game.blind(p))
            .collect::<Vec<_>>();
        let max_spent = game.big_blind();
        let min_raise_to = match (game.betting(), max_spent) {
            (Betting::Limit, _) => 0,
            (Betting::NoLimit, 0) => 1,
            (Betting::NoLimit, blind) => blind * 2,
        };
        Self {
            round: 0,
            history: vec![Vec::new()],
            folded: vec![false; game.players()],
            spent,
            max_spent,
            min_raise_to,
            finished: false,
        }
    }

    pub fn round(&self) -> usize {
        self.round
    }
    pub fn finished(&self) -> bool {
        self.finished
    }
    /// Actions taken in `round`, in order; empty for rounds not reached.
    pub fn actions(&self, round: usize) -> impl Iterator<Item = Action> + '_ {
        self.history
            .get(round)
            .into_iter()
            .flatten()
            .map(|(_, a)| *a)
    }
    pub fn spent(&self, player: Position) -> Chips {
        self.spent[player]
    }
    pub fn folded(&self, player: Position) -> bool {
        self.folded[player]
    }
    pub fn max_spent(&self) -> Chips {
        self.max_spent
    }
    pub fn pot(&self) -> Chips {
        self.spent.iter().sum()
    }
    /// Chips `player` can still put in; zero once all-in.
    pub fn remaining(&self, game: &Game, player: Position) -> Chips {
        game.stack(player) - self.spent[player]
    }
    pub fn num_raises(&self) -> usize {
        self.actions(self.round).filter(Action::is_raise).count()
    }

    /// Seat whose turn it is. Meaningless once the hand is finished.
    pub fn player(&self, game: &Game) -> Position {
        match self.history[self.round].last() {
            Some((last, _)) => self.next(game, *last),
            None => self.next(game, game.first_player(self.round) + game.players() - 1),
        }
    }
    fn next(&self, game: &Game, from: Position) -> Position {
        let n = game.players();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&p| !self.folded[p] && self.remaining(game, p) > 0)
            .unwrap_or(from % n)
    }
    fn num_folded(&self) -> usize {
        self.folded.iter().filter(|f| **f).count()
    }
    fn num_acting(&self, game: &Game) -> usize {
        (0..game.players())
            .filter(|&p| !self.folded[p] && self.remaining(game, p) > 0)
            .count()
    }
    /// Players who have matched the current bet since it was made,
    /// counting the bettor and skipping anyone now all-in.
    fn num_called(&self, game: &Game) -> usize {
        let mut called = 0;
        for (p, action) in self.history[self.round].iter().rev() {
            let acting = self.remaining(game, *p) > 0;
            match action {
                Action::Raise(_) => return called + acting as usize,
                Action::Call => called += acting as usize,
                Action::Fold => {}
            }
        }
        called
    }

    /// Legal raise-to sizes for the player to act, if raising is allowed.
    /// Limit games have exactly one size.
    pub fn raise_range(&self, game: &Game) -> Option<(Chips, Chips)> {
        if self.finished
            || self.num_raises() >= game.max_raises(self.round)
            || self.history[self.round].len() + game.players() > MAX_ACTIONS
            || self.num_acting(game) <= 1
        {
            return None;
        }
        let p = self.player(game);
        match game.betting() {
            Betting::Limit => {
                let to = self
                    .max_spent
                    .saturating_add(game.raise_size(self.round))
                    .min(game.stack(p));
                Some((to, to))
            }
            Betting::NoLimit => {
                let max = game.stack(p);
                if max <= self.max_spent {
                    None
                } else {
                    Some((self.min_raise_to.min(max), max))
                }
            }
        }
    }

    /// The dealer's legality test, without any attempt at fixing sizes.
    pub fn is_valid(&self, game: &Game, action: &Action) -> bool {
        if self.finished {
            return false;
        }
        let p = self.player(game);
        match action {
            Action::Call => true,
            Action::Fold => self.spent[p] < self.max_spent && self.remaining(game, p) > 0,
            Action::Raise(size) => match (game.betting(), self.raise_range(game)) {
                (_, None) => false,
                (Betting::Limit, Some(_)) => true,
                (Betting::NoLimit, Some((min, max))) => (min..=max).contains(size),
            },
        }
    }

    /// The cheapest action that keeps the player in the hand:
    /// check when nothing is owed, otherwise fold.
    pub fn passive(&self, game: &Game) -> Action {
        match self.is_valid(game, &Action::Fold) {
            true => Action::Fold,
            false => Action::Call,
        }
    }

    /// Limit raises are recorded with the raise-to they imply.
    pub fn snap(&self, game: &Game, action: Action) -> Action {
        match (game.betting(), action, self.raise_range(game)) {
            (Betting::Limit, Action::Raise(_), Some((to, _))) => Action::Raise(to),
            _ => action,
        }
    }

    /// Applies an action for the player to act. Callers check
    /// [`State::is_valid`] first; the replay trusts its input.
    pub fn apply(&mut self, game: &Game, action: Action) {
        let p = self.player(game);
        let action = self.snap(game, action);
        self.history[self.round].push((p, action));
        match action {
            Action::Fold => self.folded[p] = true,
            Action::Call => self.spent[p] = self.max_spent.min(game.stack(p)),
            Action::Raise(to) => {
                if game.betting() == Betting::NoLimit {
                    let reraise = to.saturating_mul(2).saturating_sub(self.max_spent);
                    if reraise > self.min_raise_to {
                        self.min_raise_to = reraise;
                    }
                }
                self.max_spent = to;
                self.spent[p] = to;
            }
        }
        if self.num_folded() + 1 >= game.players() {
            self.finished = true;
        } else if self.num_called(game) >= self.num_acting(game) {
            if self.num_acting(game) > 1 {
                if self.round + 1 < game.rounds() {
                    self.advance(self.round + 1);
                    self.min_raise_to = game.big_blind().max(1) + self.max_spent;
                } else {
                    self.finished = true;
                }
            } else {
                self.finished = true;
                self.advance(game.rounds() - 1);
            }
        }
    }
    fn advance(&mut self, round: usize) {
        self.round = round;
        self.history.resize_with(round + 1, Vec::new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::game::tests::*;

    fn replay(game: &Game, actions: &[Action]) -> State {
        let mut state = State::new(game);
        for action in actions {
            assert!(state.is_valid(game, action), "{} illegal", action);
            state.apply(game, *action);
        }
        state
    }

    #[test]
    fn blinds_posted() {
        let game = LEDUC_NOLIMIT.parse::<Game>().unwrap();
        let state = State::new(&game);
        assert_eq!(state.pot(), 200);
        assert_eq!(state.player(&game), 0);
        assert_eq!(state.raise_range(&game), Some((200, 1200)));
    }

    #[test]
    fn check_check_advances_round() {
        let game = LEDUC_NOLIMIT.parse::<Game>().unwrap();
        let state = replay(&game, &[Action::Call, Action::Call]);
        assert_eq!(state.round(), 1);
        assert!(!state.finished());
        assert_eq!(state.player(&game), 0);
        assert_eq!(state.raise_range(&game), Some((200, 1200)));
    }

    #[test]
    fn fold_finishes_hand() {
        let game = LEDUC_NOLIMIT.parse::<Game>().unwrap();
        let state = replay(&game, &[Action::Raise(300), Action::Fold]);
        assert!(state.finished());
        assert!(state.folded(1));
        assert!(!state.is_valid(&game, &Action::Call));
    }

    #[test]
    fn fold_illegal_when_nothing_owed() {
        let game = LEDUC_NOLIMIT.parse::<Game>().unwrap();
        let state = State::new(&game);
        assert!(!state.is_valid(&game, &Action::Fold));
        assert_eq!(state.passive(&game), Action::Call);
        let state = replay(&game, &[Action::Raise(300)]);
        assert!(state.is_valid(&game, &Action::Fold));
        assert_eq!(state.passive(&game), Action::Fold);
    }

    #[test]
    fn nolimit_min_reraise() {
        let game = LEDUC_NOLIMIT.parse::<Game>().unwrap();
        let state = replay(&game, &[Action::Raise(300)]);
        assert_eq!(state.raise_range(&game), Some((500, 1200)));
        assert!(!state.is_valid(&game, &Action::Raise(400)));
        assert!(state.is_valid(&game, &Action::Raise(500)));
        assert!(!state.is_valid(&game, &Action::Raise(1201)));
    }

    #[test]
    fn all_in_leaves_nothing_remaining() {
        let game = HOLDEM_NOLIMIT.parse::<Game>().unwrap();
        let state = replay(&game, &[Action::Raise(20000)]);
        assert_eq!(state.remaining(&game, 1), 0);
        assert_eq!(state.remaining(&game, 0), 19900);
        assert_eq!(state.player(&game), 0);
        assert!(state.is_valid(&game, &Action::Fold));
        assert_eq!(state.raise_range(&game), None);
    }

    #[test]
    fn all_in_runs_out_board() {
        let game = HOLDEM_NOLIMIT.parse::<Game>().unwrap();
        let state = replay(&game, &[Action::Raise(20000), Action::Call]);
        assert!(state.finished());
        assert_eq!(state.round(), 3);
        assert_eq!(state.pot(), 40000);
    }

    #[test]
    fn holdem_blinds_reverse_action_order() {
        let game = HOLDEM_NOLIMIT.parse::<Game>().unwrap();
        let state = State::new(&game);
        assert_eq!(state.player(&game), 1);
        let state = replay(&game, &[Action::Call, Action::Call]);
        assert_eq!(state.round(), 1);
        assert_eq!(state.player(&game), 0);
    }

    #[test]
    fn limit_raises_are_capped() {
        let game = LEDUC_LIMIT.parse::<Game>().unwrap();
        let state = replay(&game, &[Action::Raise(0), Action::Raise(0)]);
        assert_eq!(state.max_spent(), 5);
        assert_eq!(state.actions(0).collect::<Vec<_>>(), vec![Action::Raise(3), Action::Raise(5)]);
        assert!(!state.is_valid(&game, &Action::Raise(0)));
        let state = replay(&game, &[Action::Raise(0), Action::Raise(0), Action::Call]);
        assert_eq!(state.round(), 1);
        assert_eq!(state.raise_range(&game), Some((9, 9)));
    }
}
