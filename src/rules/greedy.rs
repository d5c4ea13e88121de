//! Strict-improvement rule.

use rand::Rng;

use super::types::{AcceptancePolicy, Decision};

/// Accepts a candidate only when it is strictly cheaper.
///
/// Stateless: the search stops at the first tour with no improving neighbor
/// (after the engine's depth-2 lookahead also fails).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyRule;

impl AcceptancePolicy for GreedyRule {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        current_cost: f64,
        candidate_cost: f64,
        _rng: &mut R,
    ) -> Decision {
        if candidate_cost < current_cost {
            Decision::Accept
        } else {
            Decision::Reject
        }
    }
}
