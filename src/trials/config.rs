//! Trial orchestration configuration.

/// Configuration for [`TrialRunner`](super::TrialRunner).
///
/// # Examples
///
/// ```
/// use u_tsp::trials::TrialConfig;
///
/// let config = TrialConfig::default()
///     .with_num_trials(20)
///     .with_seed(7);
/// assert_eq!(config.num_trials, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialConfig {
    /// Number of independent restarts. Must be at least 1.
    pub num_trials: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to run trials in parallel using rayon.
    ///
    /// Only honored with the `parallel` feature. Results are identical to a
    /// sequential run with the same seed.
    pub parallel: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            num_trials: 1,
            seed: None,
            parallel: false,
        }
    }
}

impl TrialConfig {
    pub fn with_num_trials(mut self, n: usize) -> Self {
        self.num_trials = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_trials == 0 {
            return Err("num_trials must be at least 1".into());
        }
        Ok(())
    }
}
