//! Simulated-annealing acceptance rule.
//!
//! Always accepts improvements and sometimes accepts worse tours, which lets
//! the search climb out of local minima. The probability of accepting a
//! worse tour starts high and is reduced after every uninterrupted run of
//! accepted moves. The rule declares the search stuck after a run of
//! iterations whose current cost stays within a relative tolerance.

use rand::Rng;

use super::config::AnnealingConfig;
use super::types::{AcceptancePolicy, Decision};

/// Metropolis-style acceptance with geometric cooling.
///
/// Holds per-trial state and must not be shared between trials.
///
/// # References
///
/// - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
/// - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
#[derive(Debug, Clone)]
pub struct AnnealingRule {
    config: AnnealingConfig,
    temperature: f64,
    consecutive_accepts: usize,
    last_seen_cost: f64,
    consecutive_same_cost: usize,
}

impl AnnealingRule {
    /// Creates a rule at `config.initial_temperature`.
    ///
    /// The configuration is expected to have passed
    /// [`AnnealingConfig::validate`].
    pub fn new(config: AnnealingConfig) -> Self {
        Self {
            temperature: config.initial_temperature,
            consecutive_accepts: 0,
            last_seen_cost: f64::INFINITY,
            consecutive_same_cost: 0,
            config,
        }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn consecutive_accepts(&self) -> usize {
        self.consecutive_accepts
    }

    pub fn consecutive_same_cost(&self) -> usize {
        self.consecutive_same_cost
    }

    fn cool_down(&mut self) {
        self.consecutive_accepts = 0;
        self.temperature *= self.config.cooling_factor;
        log::debug!("reducing temperature to {:e}", self.temperature);
    }
}

impl Default for AnnealingRule {
    fn default() -> Self {
        Self::new(AnnealingConfig::default())
    }
}

impl AcceptancePolicy for AnnealingRule {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        current_cost: f64,
        candidate_cost: f64,
        rng: &mut R,
    ) -> Decision {
        // At least 1 whenever the candidate is no worse, so the draw always
        // passes and equally good states are freely exchanged.
        let criterion = ((current_cost - candidate_cost) / self.temperature).exp();
        if criterion > rng.random::<f64>() {
            self.consecutive_accepts += 1;
            if self.consecutive_accepts > self.config.accepts_before_cooling {
                self.cool_down();
            }
            Decision::Accept
        } else {
            Decision::Reject
        }
    }

    fn search_budget_exceeded(&self) -> bool {
        let exceeded = self.temperature < self.config.min_temperature;
        if exceeded {
            log::debug!("temperature {:e} below threshold", self.temperature);
        }
        exceeded
    }

    fn is_stuck(&mut self, current_cost: f64, _best_candidate_cost: f64) -> bool {
        if current_cost < self.last_seen_cost {
            self.last_seen_cost = current_cost;
            self.consecutive_same_cost = 0;
            return false;
        }
        let relative_delta = if current_cost == 0.0 {
            0.0
        } else {
            (self.last_seen_cost - current_cost) / current_cost
        };
        if relative_delta < self.config.relative_tolerance {
            self.consecutive_same_cost += 1;
        }
        let stuck = self.consecutive_same_cost >= self.config.max_same_cost;
        if stuck {
            log::debug!("solution stabilized at cost {current_cost}");
        }
        stuck
    }
}
