use crate::Chips;

/// A betting decision as the dealer sees it.
///
/// Raises carry the raise-to amount (total chips committed this hand after
/// the raise), not the increment. Folds and calls carry no size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Action {
    Fold,
    Call,
    Raise(Chips),
}

impl Action {
    pub fn is_raise(&self) -> bool {
        matches!(self, Action::Raise(_))
    }
    /// Raise-to size, zero for passive actions.
    pub fn size(&self) -> Chips {
        match self {
            Action::Raise(size) => *size,
            Action::Fold | Action::Call => 0,
        }
    }
}

/// Strategy table action codes: 0 folds, 1 calls, n >= 2 raises to n.
impl TryFrom<i64> for Action {
    type Error = ActionError;
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Action::Fold),
            1 => Ok(Action::Call),
            n if n >= 2 => Chips::try_from(n)
                .map(Action::Raise)
                .map_err(|_| ActionError::Code(code)),
            _ => Err(ActionError::Code(code)),
        }
    }
}
impl From<Action> for i64 {
    fn from(action: Action) -> Self {
        match action {
            Action::Fold => 0,
            Action::Call => 1,
            Action::Raise(size) => size as i64,
        }
    }
}

/// Dealer action grammar: `f`, `c` (or the legacy check `k`), `r<size>`.
/// A bare `r` is a limit raise whose size the betting replay implies.
impl TryFrom<&str> for Action {
    type Error = ActionError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "f" => Ok(Action::Fold),
            "c" | "k" => Ok(Action::Call),
            "r" => Ok(Action::Raise(0)),
            s if s.starts_with('r') => s[1..]
                .parse::<Chips>()
                .ok()
                .filter(|n| *n > 0 && s[1..].chars().all(|c| c.is_ascii_digit()))
                .map(Action::Raise)
                .ok_or_else(|| ActionError::Text(s.to_string())),
            _ => Err(ActionError::Text(s.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "f"),
            Action::Call => write!(f, "c"),
            Action::Raise(size) => write!(f, "r{}", size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("invalid action code {0}")]
    Code(i64),
    #[error("invalid action {0:?}")]
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_actions() {
        assert_eq!(Action::try_from(0i64), Ok(Action::Fold));
        assert_eq!(Action::try_from(1i64), Ok(Action::Call));
        assert_eq!(Action::try_from(200i64), Ok(Action::Raise(200)));
        assert_eq!(i64::from(Action::Raise(200)), 200);
        assert_eq!(Action::try_from(-1i64), Err(ActionError::Code(-1)));
        assert!(Action::try_from(i64::MAX).is_err());
    }

    #[test]
    fn parse_wire_tokens() {
        assert_eq!(Action::try_from("f"), Ok(Action::Fold));
        assert_eq!(Action::try_from("c"), Ok(Action::Call));
        assert_eq!(Action::try_from("k"), Ok(Action::Call));
        assert_eq!(Action::try_from("r"), Ok(Action::Raise(0)));
        assert_eq!(Action::try_from("r250"), Ok(Action::Raise(250)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Action::try_from("").is_err());
        assert!(Action::try_from("x").is_err());
        assert!(Action::try_from("r+5").is_err());
        assert!(Action::try_from("r0").is_err());
        assert!(Action::try_from("r12a").is_err());
    }

    #[test]
    fn display_is_wire_token() {
        assert_eq!(Action::Fold.to_string(), "f");
        assert_eq!(Action::Call.to_string(), "c");
        assert_eq!(Action::Raise(200).to_string(), "r200");
    }
}
