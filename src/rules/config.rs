//! Acceptance rule configuration.

use super::annealing::AnnealingRule;
use super::greedy::GreedyRule;
use super::Rule;

/// Consecutive accepted moves before the temperature is reduced.
pub const DEFAULT_ACCEPTS_BEFORE_COOLING: usize = 20;

/// Consecutive near-equal iterations before the search is declared stuck.
pub const DEFAULT_MAX_SAME_COST: usize = 5;

pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 1.0;

pub const DEFAULT_COOLING_FACTOR: f64 = 0.5;

/// Sixteen times the smallest positive subnormal `f64`.
pub const DEFAULT_MIN_TEMPERATURE: f64 = f64::from_bits(16);

/// Costs within this fraction of each other count as unchanged.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 0.001;

/// Configuration for [`AnnealingRule`].
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `cooling_factor` every time more than `accepts_before_cooling` moves have
/// been accepted in a row. The search freezes once it drops below
/// `min_temperature`.
///
/// # Examples
///
/// ```
/// use u_tsp::rules::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(2.0)
///     .with_cooling_factor(0.8)
///     .with_accepts_before_cooling(50)
///     .with_max_same_cost(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    /// Starting temperature. Higher values accept worse tours more readily.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_factor: f64,

    /// Cooling is triggered once this many consecutive accepts are exceeded.
    pub accepts_before_cooling: usize,

    /// Number of consecutive stagnant iterations that counts as stuck.
    pub max_same_cost: usize,

    /// The search stops once the temperature falls below this.
    pub min_temperature: f64,

    /// Relative cost change below which an iteration counts as stagnant.
    pub relative_tolerance: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            cooling_factor: DEFAULT_COOLING_FACTOR,
            accepts_before_cooling: DEFAULT_ACCEPTS_BEFORE_COOLING,
            max_same_cost: DEFAULT_MAX_SAME_COST,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, r: f64) -> Self {
        self.cooling_factor = r;
        self
    }

    pub fn with_accepts_before_cooling(mut self, n: usize) -> Self {
        self.accepts_before_cooling = n;
        self
    }

    pub fn with_max_same_cost(mut self, n: usize) -> Self {
        self.max_same_cost = n;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_relative_tolerance(mut self, tol: f64) -> Self {
        self.relative_tolerance = tol;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            ));
        }
        if !(self.min_temperature > 0.0) {
            return Err(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            ));
        }
        if !(self.relative_tolerance >= 0.0) {
            return Err(format!(
                "relative_tolerance must be non-negative, got {}",
                self.relative_tolerance
            ));
        }
        Ok(())
    }
}

/// Selects the acceptance rule used by every trial.
///
/// # Examples
///
/// ```
/// use u_tsp::rules::{AcceptancePolicy, AnnealingConfig, RuleConfig};
///
/// let factory = RuleConfig::Annealing(AnnealingConfig::default())
///     .factory()
///     .unwrap();
/// let rule = factory();
/// assert!(!rule.search_budget_exceeded());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleConfig {
    /// Strict improvement only.
    #[default]
    Greedy,
    /// Probabilistic acceptance with geometric cooling.
    Annealing(AnnealingConfig),
}

impl RuleConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            RuleConfig::Greedy => Ok(()),
            RuleConfig::Annealing(config) => config.validate(),
        }
    }

    /// Builds a single rule. The configuration is not validated.
    pub fn build(&self) -> Rule {
        match self {
            RuleConfig::Greedy => Rule::Greedy(GreedyRule),
            RuleConfig::Annealing(config) => Rule::Annealing(AnnealingRule::new(config.clone())),
        }
    }

    /// Validates the configuration and returns a factory producing a fresh
    /// rule on every call, one per trial.
    pub fn factory(&self) -> crate::Result<impl Fn() -> Rule + Send + Sync + 'static> {
        self.validate().map_err(crate::TspError::InvalidConfig)?;
        let config = self.clone();
        Ok(move || config.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealingConfig::default();
        assert_eq!(config.accepts_before_cooling, 20);
        assert_eq!(config.max_same_cost, 5);
        assert!((config.initial_temperature - 1.0).abs() < 1e-12);
        assert!((config.cooling_factor - 0.5).abs() < 1e-12);
        assert!(config.min_temperature > 0.0);
        assert!(config.min_temperature < f64::MIN_POSITIVE);
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealingConfig::default().validate().is_ok());
        assert!(RuleConfig::Greedy.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealingConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = AnnealingConfig::default().with_initial_temperature(f64::INFINITY);
        assert!(config.validate().is_err());
        let config = AnnealingConfig::default().with_min_temperature(f64::NAN);
        assert!(config.validate().is_err());
        let config = AnnealingConfig::default().with_min_temperature(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_factor() {
        for r in [0.0, 1.0, 1.5, -0.5, f64::NAN] {
            let config = AnnealingConfig::default().with_cooling_factor(r);
            assert!(config.validate().is_err(), "cooling factor {r} accepted");
        }
    }

    #[test]
    fn test_validate_bad_tolerance() {
        let config = AnnealingConfig::default().with_relative_tolerance(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_factory_rejects_invalid_config() {
        let config = RuleConfig::Annealing(AnnealingConfig::default().with_cooling_factor(2.0));
        assert!(matches!(
            config.factory().err(),
            Some(crate::TspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_factory_builds_fresh_rules() {
        let factory = RuleConfig::Annealing(AnnealingConfig::default())
            .factory()
            .unwrap();
        let a = factory();
        let b = factory();
        assert!(matches!(a, Rule::Annealing(_)));
        assert!(matches!(b, Rule::Annealing(_)));
        let greedy = RuleConfig::Greedy.factory().unwrap()();
        assert!(matches!(greedy, Rule::Greedy(_)));
    }
}
