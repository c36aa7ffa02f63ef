use super::StrategyEntry;
use crate::Probability;
use crate::gameplay::Action;
use rand::Rng;

/// Source of uniform draws in `[0, 1)` for action sampling.
pub trait Draw {
    fn draw(&mut self) -> Probability;
}

impl Draw for rand::rngs::SmallRng {
    fn draw(&mut self) -> Probability {
        self.random::<Probability>()
    }
}

/// A constant draw, for replaying a known decision.
impl Draw for Probability {
    fn draw(&mut self) -> Probability {
        *self
    }
}

/// Picks the action whose cumulative slice of `[0, 1)` contains `draw`.
///
/// The draw is consumed as a running remainder: the first action whose
/// probability covers what is left of it is selected. When rounding leaves
/// the remainder above every action, the last action is returned.
pub fn sample(entry: &StrategyEntry, draw: Probability) -> Action {
    let mut remainder = draw;
    for (action, p) in entry.choices() {
        if remainder <= p {
            return action;
        }
        remainder -= p;
    }
    entry.last()
}

/// Samples from `entry`, or folds when the infoset was never solved.
pub fn decide(entry: Option<&StrategyEntry>, draw: Probability) -> Action {
    match entry {
        Some(entry) => sample(entry, draw),
        None => Action::Fold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn entry(probabilities: &[Probability]) -> StrategyEntry {
        StrategyEntry::new(
            probabilities
                .iter()
                .enumerate()
                .map(|(i, p)| (Action::Raise(200 * (i as crate::Chips + 1)), *p))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn cumulative_slices() {
        let entry = entry(&[0.2, 0.3, 0.5]);
        assert_eq!(sample(&entry, 0.1), Action::Raise(200));
        assert_eq!(sample(&entry, 0.25), Action::Raise(400));
        assert_eq!(sample(&entry, 0.99), Action::Raise(600));
        assert_eq!(sample(&entry, 0.0), Action::Raise(200));
    }

    #[test]
    fn rounding_shortfall_falls_back_to_last() {
        let entry = entry(&[0.2, 0.3, 0.499999]);
        assert_eq!(sample(&entry, 1.0 - Probability::EPSILON), Action::Raise(600));
    }

    #[test]
    fn boundary_draw_selects_lower_slice() {
        let entry = entry(&[0.2, 0.3, 0.5]);
        assert_eq!(sample(&entry, 0.2), Action::Raise(200));
        let entry = StrategyEntry::new(vec![(Action::Fold, 0.06), (Action::Raise(200), 0.94)]).unwrap();
        assert_eq!(sample(&entry, 0.06), Action::Fold);
        assert_eq!(sample(&entry, 0.0600001), Action::Raise(200));
        let entry = StrategyEntry::new(vec![(Action::Fold, 0.0), (Action::Call, 1.0)]).unwrap();
        assert_eq!(sample(&entry, 0.0), Action::Fold);
    }

    #[test]
    fn miss_folds() {
        let action = decide(None, 0.7);
        assert_eq!(action, Action::Fold);
        assert_eq!(action.size(), 0);
        let entry = entry(&[1.0]);
        assert_eq!(decide(Some(&entry), 0.7), Action::Raise(200));
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        assert!((0..1000).map(|_| rng.draw()).all(|d| (0.0..1.0).contains(&d)));
        let mut fixed: Probability = 0.5;
        assert_eq!(fixed.draw(), 0.5);
    }
}
