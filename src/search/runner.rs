//! Local search engine.
//!
//! # Algorithm
//!
//! 1. Start from a random permutation of the vertices
//! 2. At each step:
//!    a. Stop if the rule reports its budget exhausted
//!    b. Sweep the restricted 2-opt neighborhood, letting the rule pick the
//!       best reachable tour
//!    c. If the rule says the search is stuck, sweep again from every
//!       neighbor (depth-2 lookahead)
//!    d. Still stuck: fixed point. Otherwise move to the reachable tour
//! 3. Repeat until a fixed point is reached

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::moves::{for_each_move, TwoOptMove};
use crate::context::{Solution, TspContext};
use crate::error::{Result, TspError};
use crate::rules::AcceptancePolicy;

/// Lifecycle of one search instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// The search can still move.
    Searching,
    /// No further progress is possible. Terminal.
    FixedPoint,
}

/// A single local search trial over a shared problem.
///
/// The engine owns its tour, its acceptance rule and its random generator.
/// `factory` builds the rule; it is called once per engine, so every
/// [`reinitialized`](LocalSearch::reinitialized) copy starts with fresh rule
/// state.
///
/// # Examples
///
/// ```
/// use u_tsp::rules::GreedyRule;
/// use u_tsp::search::LocalSearch;
///
/// let s = std::f64::consts::SQRT_2;
/// let mut search = LocalSearch::create(
///     &["A", "B", "C", "D"],
///     &[
///         vec![0.0, 1.0, s, 1.0],
///         vec![1.0, 0.0, 1.0, s],
///         vec![s, 1.0, 0.0, 1.0],
///         vec![1.0, s, 1.0, 0.0],
///     ],
///     || GreedyRule,
///     Some(42),
/// )
/// .unwrap();
///
/// let solution = search.run_to_fixed_point();
/// assert!((solution.cost() - 4.0).abs() < 1e-9);
/// ```
pub struct LocalSearch<P, F> {
    context: Arc<TspContext>,
    factory: Arc<F>,
    policy: P,
    rng: StdRng,
    seed: u64,
    tour: Vec<usize>,
    state: SearchState,
    iterations: usize,
}

impl<P, F> LocalSearch<P, F>
where
    P: AcceptancePolicy,
    F: Fn() -> P,
{
    /// Builds the problem context and a search over it.
    ///
    /// `seed` fixes the initial tour and every random draw of the rule;
    /// `None` picks a random seed.
    pub fn create<S, R>(labels: &[S], distances: &[R], factory: F, seed: Option<u64>) -> Result<Self>
    where
        S: AsRef<str>,
        R: AsRef<[f64]>,
    {
        let context = TspContext::new(labels, distances)?;
        Ok(Self::from_context(
            Arc::new(context),
            Arc::new(factory),
            seed.unwrap_or_else(rand::random),
        ))
    }

    /// Starts a search over an existing context.
    pub fn from_context(context: Arc<TspContext>, factory: Arc<F>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let tour = random_permutation(context.num_vertices(), &mut rng);
        let policy = (*factory)();
        Self {
            context,
            factory,
            policy,
            rng,
            seed,
            tour,
            state: SearchState::Searching,
            iterations: 0,
        }
    }

    /// Replaces the starting tour. Fails unless `tour` is a permutation of
    /// the vertex indices.
    pub fn with_initial_tour(mut self, tour: &[usize]) -> Result<Self> {
        let n = self.context.num_vertices();
        if tour.len() != n {
            return Err(TspError::invalid_input(format!(
                "tour visits {} vertices, expected {n}",
                tour.len()
            )));
        }
        let mut seen = vec![false; n];
        for &v in tour {
            if v >= n || std::mem::replace(&mut seen[v], true) {
                return Err(TspError::invalid_input(format!(
                    "tour is not a permutation of 0..{n}"
                )));
            }
        }
        self.tour.copy_from_slice(tour);
        self.state = SearchState::Searching;
        Ok(self)
    }

    /// A new search over the same problem with a fresh rule and a fresh
    /// random tour. The seed is drawn from this engine's generator.
    pub fn reinitialized(&mut self) -> Self {
        let seed = self.rng.random();
        self.reinitialized_with_seed(seed)
    }

    /// Like [`reinitialized`](Self::reinitialized) with an explicit seed.
    pub fn reinitialized_with_seed(&self, seed: u64) -> Self {
        Self::from_context(Arc::clone(&self.context), Arc::clone(&self.factory), seed)
    }

    /// Runs until the search reaches its fixed point.
    pub fn run_to_fixed_point(&mut self) -> Solution {
        while self.state == SearchState::Searching {
            self.step_once();
        }
        self.snapshot()
    }

    /// Performs one step and returns the tour it left.
    pub fn step_and_snapshot(&mut self) -> Solution {
        self.step_once();
        self.snapshot()
    }

    /// Performs one step. Does nothing once the fixed point is reached.
    pub fn step_once(&mut self) -> SearchState {
        if self.state == SearchState::FixedPoint {
            return self.state;
        }
        if self.policy.search_budget_exceeded() {
            self.state = SearchState::FixedPoint;
            return self.state;
        }

        let current_cost = self.context.tour_cost(&self.tour);
        let mut reachable = Reachable {
            tour: self.tour.clone(),
            cost: current_cost,
        };
        let mut sweep = Sweep {
            context: &self.context,
            policy: &mut self.policy,
            rng: &mut self.rng,
        };

        sweep.single(&mut self.tour, &mut reachable);
        if sweep.policy.is_stuck(current_cost, reachable.cost) {
            sweep.lookahead(&mut self.tour, &mut reachable);
            let current_cost = self.context.tour_cost(&self.tour);
            if self.policy.is_stuck(current_cost, reachable.cost) {
                log::trace!(
                    "fixed point after {} iterations at cost {current_cost}",
                    self.iterations
                );
                self.state = SearchState::FixedPoint;
                return self.state;
            }
        }

        self.tour = reachable.tour;
        self.iterations += 1;
        log::trace!("iteration {} cost {}", self.iterations, reachable.cost);
        self.state
    }

    /// A snapshot of the current tour.
    pub fn snapshot(&self) -> Solution {
        Solution::new(Arc::clone(&self.context), &self.tour)
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn reached_fixed_point(&self) -> bool {
        self.state == SearchState::FixedPoint
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    pub fn current_cost(&self) -> f64 {
        self.context.tour_cost(&self.tour)
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn context(&self) -> &Arc<TspContext> {
        &self.context
    }

    pub fn factory(&self) -> &Arc<F> {
        &self.factory
    }

    /// The seed this engine was built with. Trials fall back to it when
    /// they are not given a seed of their own.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of steps that moved the search.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Best tour reachable from the current one, accumulated over a sweep.
struct Reachable {
    tour: Vec<usize>,
    cost: f64,
}

struct Sweep<'a, P> {
    context: &'a TspContext,
    policy: &'a mut P,
    rng: &'a mut StdRng,
}

impl<P: AcceptancePolicy> Sweep<'_, P> {
    /// Evaluates one move in place and reverts it; only `reachable` keeps
    /// the result.
    fn try_move(&mut self, tour: &mut [usize], reachable: &mut Reachable, mv: TwoOptMove) {
        mv.apply(tour);
        let cost = self.context.tour_cost(tour);
        if self
            .policy
            .decide(reachable.cost, cost, &mut *self.rng)
            .is_accept()
        {
            reachable.cost = cost;
            reachable.tour.copy_from_slice(tour);
        }
        mv.undo(tour);
    }

    fn single(&mut self, tour: &mut [usize], reachable: &mut Reachable) {
        for_each_move(tour.len(), |mv| self.try_move(tour, reachable, mv));
    }

    /// Runs a full sweep from every neighbor of `tour`, leaving `tour`
    /// unchanged.
    fn lookahead(&mut self, tour: &mut [usize], reachable: &mut Reachable) {
        for_each_move(tour.len(), |outer| {
            outer.apply(tour);
            self.single(tour, reachable);
            outer.undo(tour);
        });
    }
}

/// A uniformly shuffled `0..n`: each index gets a random key and the indices
/// are read back in key order.
fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut keyed: Vec<(u64, usize)> = (0..n).map(|v| (rng.random::<u64>(), v)).collect();
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, v)| v).collect()
}
