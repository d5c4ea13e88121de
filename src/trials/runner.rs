//! Multi-trial orchestration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::TrialConfig;
use crate::context::{Solution, TspContext};
use crate::error::{Result, TspError};
use crate::rules::AcceptancePolicy;
use crate::search::LocalSearch;

/// Result of a multi-trial run.
#[derive(Debug, Clone)]
pub struct TrialResult {
    /// The cheapest solution over all completed trials.
    pub best: Solution,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Position of the best trial in `trial_costs`. Ties go to the earliest.
    pub best_trial: usize,

    /// Final cost of every completed trial, in trial order.
    pub trial_costs: Vec<f64>,

    /// Whether trials were skipped because of the cancellation flag.
    pub cancelled: bool,
}

/// Rule factory usable by [`TrialRunner`].
///
/// With the `parallel` feature the factory is shared across rayon workers
/// and must be `Send + Sync`; without it any `Fn() -> P` will do.
#[cfg(feature = "parallel")]
pub trait TrialFactory<P>: Fn() -> P + Send + Sync {}

#[cfg(feature = "parallel")]
impl<P, F: Fn() -> P + Send + Sync> TrialFactory<P> for F {}

/// Rule factory usable by [`TrialRunner`].
///
/// With the `parallel` feature the factory is shared across rayon workers
/// and must be `Send + Sync`; without it any `Fn() -> P` will do.
#[cfg(not(feature = "parallel"))]
pub trait TrialFactory<P>: Fn() -> P {}

#[cfg(not(feature = "parallel"))]
impl<P, F: Fn() -> P> TrialFactory<P> for F {}

/// Runs independent restarts of a [`LocalSearch`] and keeps the best.
pub struct TrialRunner;

impl TrialRunner {
    /// Runs `config.num_trials` trials over the problem of `search`.
    ///
    /// Each trial is a fresh copy of `search` (new rule, new random tour)
    /// run to its fixed point. `search` itself is not advanced.
    ///
    /// Trial seeds come from `config.seed`, or from the engine's own
    /// [`seed`](LocalSearch::seed) when the config has none, so a seeded
    /// engine gives the same result on every run.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::rules::GreedyRule;
    /// use u_tsp::search::LocalSearch;
    /// use u_tsp::trials::{TrialConfig, TrialRunner};
    ///
    /// let search = LocalSearch::create(
    ///     &["a", "b", "c", "d"],
    ///     &[
    ///         vec![0.0, 1.0, 2.0, 1.0],
    ///         vec![1.0, 0.0, 1.0, 2.0],
    ///         vec![2.0, 1.0, 0.0, 1.0],
    ///         vec![1.0, 2.0, 1.0, 0.0],
    ///     ],
    ///     || GreedyRule,
    ///     None,
    /// )
    /// .unwrap();
    /// let result = TrialRunner::run(&search, &TrialConfig::default().with_num_trials(5)).unwrap();
    /// assert_eq!(result.trial_costs.len(), 5);
    /// assert!((result.best_cost - 4.0).abs() < 1e-9);
    /// ```
    pub fn run<P, F>(search: &LocalSearch<P, F>, config: &TrialConfig) -> Result<TrialResult>
    where
        P: AcceptancePolicy,
        F: TrialFactory<P>,
    {
        Self::run_with_cancel(search, config, None)
    }

    /// Runs trials with an optional cancellation flag.
    ///
    /// The flag is checked before every trial but the first, so a result is
    /// always available. A trial that has started runs to completion.
    pub fn run_with_cancel<P, F>(
        search: &LocalSearch<P, F>,
        config: &TrialConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TrialResult>
    where
        P: AcceptancePolicy,
        F: TrialFactory<P>,
    {
        config.validate().map_err(TspError::InvalidConfig)?;

        let seeds = trial_seeds(config.seed.unwrap_or(search.seed()), config.num_trials);
        let context = search.context();
        let factory = search.factory();
        let cancel = cancel.as_deref();

        #[cfg(feature = "parallel")]
        let outcomes = if config.parallel {
            run_parallel(context, factory, &seeds, cancel)
        } else {
            run_sequential(context, factory, &seeds, cancel)
        };
        #[cfg(not(feature = "parallel"))]
        let outcomes = run_sequential(context, factory, &seeds, cancel);

        let cancelled = outcomes.len() < seeds.len() || outcomes.iter().any(Option::is_none);
        let completed: Vec<Solution> = outcomes.into_iter().flatten().collect();
        let trial_costs: Vec<f64> = completed.iter().map(Solution::cost).collect();

        let mut best: Option<(usize, Solution)> = None;
        for (trial, solution) in completed.into_iter().enumerate() {
            if best
                .as_ref()
                .is_none_or(|(_, incumbent)| solution.cost() < incumbent.cost())
            {
                best = Some((trial, solution));
            }
        }
        let (best_trial, best) =
            best.ok_or_else(|| TspError::invalid_config("no trial was run"))?;

        log::info!(
            "best of {} trials: cost {} (trial {best_trial})",
            trial_costs.len(),
            best.cost()
        );

        Ok(TrialResult {
            best_cost: best.cost(),
            best,
            best_trial,
            trial_costs,
            cancelled,
        })
    }
}

/// Per-trial seeds, drawn up front so parallel and sequential runs agree.
fn trial_seeds(master: u64, num_trials: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(master);
    (0..num_trials).map(|_| rng.random()).collect()
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn run_trial<P, F>(context: &Arc<TspContext>, factory: &Arc<F>, trial: usize, seed: u64) -> Solution
where
    P: AcceptancePolicy,
    F: Fn() -> P,
{
    let mut search = LocalSearch::from_context(Arc::clone(context), Arc::clone(factory), seed);
    let solution = search.run_to_fixed_point();
    log::debug!(
        "trial {trial} reached cost {} after {} iterations",
        solution.cost(),
        search.iterations()
    );
    solution
}

fn run_sequential<P, F>(
    context: &Arc<TspContext>,
    factory: &Arc<F>,
    seeds: &[u64],
    cancel: Option<&AtomicBool>,
) -> Vec<Option<Solution>>
where
    P: AcceptancePolicy,
    F: Fn() -> P,
{
    let mut outcomes = Vec::with_capacity(seeds.len());
    for (trial, &seed) in seeds.iter().enumerate() {
        if trial > 0 && is_cancelled(cancel) {
            break;
        }
        outcomes.push(Some(run_trial(context, factory, trial, seed)));
    }
    outcomes
}

#[cfg(feature = "parallel")]
fn run_parallel<P, F>(
    context: &Arc<TspContext>,
    factory: &Arc<F>,
    seeds: &[u64],
    cancel: Option<&AtomicBool>,
) -> Vec<Option<Solution>>
where
    P: AcceptancePolicy,
    F: Fn() -> P + Send + Sync,
{
    seeds
        .par_iter()
        .enumerate()
        .map(|(trial, &seed)| {
            if trial > 0 && is_cancelled(cancel) {
                None
            } else {
                Some(run_trial(context, factory, trial, seed))
            }
        })
        .collect()
}
