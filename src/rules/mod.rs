//! Acceptance rules.
//!
//! A rule decides whether the local search moves to a candidate tour, when
//! the search is stuck, and whether its budget is exhausted. Two rules are
//! provided:
//!
//! - [`GreedyRule`]: strict improvement only.
//! - [`AnnealingRule`]: simulated annealing with geometric cooling.
//!
//! [`Rule`] wraps either one for callers that pick the heuristic at runtime,
//! and [`RuleConfig`] builds per-trial factories for it.

mod annealing;
mod config;
mod greedy;
mod types;

pub use annealing::AnnealingRule;
pub use config::{
    AnnealingConfig, RuleConfig, DEFAULT_ACCEPTS_BEFORE_COOLING, DEFAULT_COOLING_FACTOR,
    DEFAULT_INITIAL_TEMPERATURE, DEFAULT_MAX_SAME_COST, DEFAULT_MIN_TEMPERATURE,
    DEFAULT_RELATIVE_TOLERANCE,
};
pub use greedy::GreedyRule;
pub use types::{AcceptancePolicy, Decision};

use rand::Rng;

/// Either acceptance rule, selected at runtime.
#[derive(Debug, Clone)]
pub enum Rule {
    Greedy(GreedyRule),
    Annealing(AnnealingRule),
}

impl AcceptancePolicy for Rule {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        current_cost: f64,
        candidate_cost: f64,
        rng: &mut R,
    ) -> Decision {
        match self {
            Rule::Greedy(rule) => rule.decide(current_cost, candidate_cost, rng),
            Rule::Annealing(rule) => rule.decide(current_cost, candidate_cost, rng),
        }
    }

    fn search_budget_exceeded(&self) -> bool {
        match self {
            Rule::Greedy(rule) => rule.search_budget_exceeded(),
            Rule::Annealing(rule) => rule.search_budget_exceeded(),
        }
    }

    fn is_stuck(&mut self, current_cost: f64, best_candidate_cost: f64) -> bool {
        match self {
            Rule::Greedy(rule) => rule.is_stuck(current_cost, best_candidate_cost),
            Rule::Annealing(rule) => rule.is_stuck(current_cost, best_candidate_cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rule_delegates() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut greedy = Rule::Greedy(GreedyRule);
        assert_eq!(greedy.decide(1.0, 1.0, &mut rng), Decision::Reject);
        assert!(greedy.is_stuck(1.0, 1.0));

        let mut annealing = Rule::Annealing(AnnealingRule::default());
        assert_eq!(annealing.decide(1.0, 1.0, &mut rng), Decision::Accept);
        // First observation only records the cost.
        assert!(!annealing.is_stuck(1.0, 1.0));
        assert!(!annealing.search_budget_exceeded());
    }
}
