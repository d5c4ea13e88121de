//! Core trait for acceptance rules.

use rand::Rng;

/// Outcome of comparing a candidate tour against the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn is_accept(self) -> bool {
        self == Decision::Accept
    }
}

/// Decides which candidate tours the local search moves to, and when it
/// should stop.
///
/// Implementations may be stateful. The engine owns exactly one instance per
/// trial and builds a fresh one for every restart, so state never leaks
/// between independent trials.
///
/// # Minimization
///
/// Costs are tour lengths. Lower is better.
pub trait AcceptancePolicy {
    /// Decides whether `candidate_cost` should replace `current_cost`.
    ///
    /// `rng` is the engine's own generator, so runs are reproducible under a
    /// fixed seed.
    fn decide<R: Rng + ?Sized>(
        &mut self,
        current_cost: f64,
        candidate_cost: f64,
        rng: &mut R,
    ) -> Decision;

    /// Hook for rules that stop on internal state regardless of progress.
    /// The default never stops.
    fn search_budget_exceeded(&self) -> bool {
        false
    }

    /// Reports that the search has stopped making progress.
    ///
    /// The default treats the search as stuck as soon as no neighbor is
    /// strictly cheaper than the current tour.
    fn is_stuck(&mut self, current_cost: f64, best_candidate_cost: f64) -> bool {
        current_cost <= best_candidate_cost
    }
}
