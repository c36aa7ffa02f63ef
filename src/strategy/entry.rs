use super::LoadError;
use crate::Probability;
use crate::TOLERANCE;
use crate::gameplay::Action;

/// A mixed strategy at one infoset: actions with their probabilities,
/// in the order the table lists them.
///
/// # Invariants
///
/// 1. At least one action
/// 2. Every probability is finite and non-negative
///
/// The mass is expected to be 1 within [`TOLERANCE`] but is never
/// renormalized; [`StrategyEntry::is_normalized`] reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyEntry {
    choices: Vec<(Action, Probability)>,
}

impl StrategyEntry {
    pub fn new(choices: Vec<(Action, Probability)>) -> Result<Self, LoadError> {
        if choices.is_empty() {
            return Err(LoadError::Empty);
        }
        if let Some((_, p)) = choices.iter().find(|(_, p)| !p.is_finite() || *p < 0.) {
            return Err(LoadError::Probability(*p));
        }
        Ok(Self { choices })
    }
    pub fn choices(&self) -> impl Iterator<Item = (Action, Probability)> + '_ {
        self.choices.iter().copied()
    }
    pub fn len(&self) -> usize {
        self.choices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
    /// Last listed action; the sampler's rounding fallback.
    pub fn last(&self) -> Action {
        self.choices
            .last()
            .map(|(a, _)| *a)
            .unwrap_or(Action::Fold)
    }
    pub fn mass(&self) -> Probability {
        self.choices.iter().map(|(_, p)| p).sum()
    }
    pub fn is_normalized(&self) -> bool {
        (self.mass() - 1.).abs() <= TOLERANCE
    }
}

/// Pairs parallel action and probability lists.
impl TryFrom<(Vec<Action>, Vec<Probability>)> for StrategyEntry {
    type Error = LoadError;
    fn try_from((actions, probabilities): (Vec<Action>, Vec<Probability>)) -> Result<Self, Self::Error> {
        if actions.len() != probabilities.len() {
            return Err(LoadError::Length {
                actions: actions.len(),
                probabilities: probabilities.len(),
            });
        }
        Self::new(actions.into_iter().zip(probabilities).collect())
    }
}

impl std::fmt::Display for StrategyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let choices = self
            .choices
            .iter()
            .map(|(a, p)| format!("{}:{:.3}", a, p))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", choices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_parallel_lists() {
        let entry = StrategyEntry::try_from((
            vec![Action::Fold, Action::Raise(200)],
            vec![0.06, 0.94],
        ))
        .unwrap();
        assert_eq!(entry.len(), 2);
        assert_eq!(entry.last(), Action::Raise(200));
        assert!(entry.is_normalized());
        assert_eq!(entry.to_string(), "f:0.060 r200:0.940");
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = StrategyEntry::try_from((vec![Action::Fold, Action::Call], vec![1.0])).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Length {
                actions: 2,
                probabilities: 1
            }
        ));
    }

    #[test]
    fn rejects_empty_and_negative() {
        assert!(matches!(StrategyEntry::new(vec![]), Err(LoadError::Empty)));
        assert!(matches!(
            StrategyEntry::new(vec![(Action::Fold, -0.1), (Action::Call, 1.1)]),
            Err(LoadError::Probability(_))
        ));
        assert!(matches!(
            StrategyEntry::new(vec![(Action::Fold, Probability::NAN)]),
            Err(LoadError::Probability(_))
        ));
    }

    #[test]
    fn reports_unnormalized_mass() {
        let entry = StrategyEntry::new(vec![(Action::Fold, 0.5), (Action::Call, 0.4)]).unwrap();
        assert!(!entry.is_normalized());
        let entry = StrategyEntry::new(vec![(Action::Call, 0.9999995)]).unwrap();
        assert!(entry.is_normalized());
    }
}
