use crate::gameplay::Action;
use crate::gameplay::Betting;

/// Writes actions in the dealer's grammar.
///
/// No-limit raises carry their raise-to size (`r200`); limit raises are a
/// bare `r` because the dealer derives the size from the game definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEncoder(Betting);

impl From<Betting> for ActionEncoder {
    fn from(betting: Betting) -> Self {
        Self(betting)
    }
}

impl ActionEncoder {
    pub fn encode(&self, action: Action) -> String {
        match (self.0, action) {
            (Betting::Limit, Action::Raise(_)) => String::from("r"),
            (_, action) => action.to_string(),
        }
    }
}
