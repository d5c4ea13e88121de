//! Heuristic Traveling Salesman solver.
//!
//! A local search over a restricted 2-opt neighborhood, steered by a
//! pluggable acceptance rule, restarted from random tours and reduced to the
//! best tour found:
//!
//! - **Context**: immutable labels + symmetric distance matrix, tour cost,
//!   and [`Solution`](context::Solution) snapshots with a canonical rotation.
//! - **Rules**: strict improvement ([`GreedyRule`](rules::GreedyRule)) or
//!   simulated annealing ([`AnnealingRule`](rules::AnnealingRule)).
//! - **Search**: the [`LocalSearch`](search::LocalSearch) engine, with a
//!   depth-2 lookahead before it settles on a fixed point.
//! - **Trials**: independent restarts via
//!   [`TrialRunner`](trials::TrialRunner), optionally in parallel.
//! - **Input**: edge-list text files into a problem context.
//!
//! # Example
//!
//! ```
//! use u_tsp::input::EdgeList;
//! use u_tsp::rules::RuleConfig;
//! use u_tsp::search::LocalSearch;
//! use u_tsp::trials::{TrialConfig, TrialRunner};
//!
//! let (labels, distances) = EdgeList::parse("a b 1\nb c 1\nc d 1\nd a 1\na c 2\nb d 2")?
//!     .into_parts()?;
//! let search = LocalSearch::create(&labels, &distances, RuleConfig::Greedy.factory()?, Some(7))?;
//! let result = TrialRunner::run(&search, &TrialConfig::default().with_num_trials(4))?;
//! assert!((result.best_cost - 4.0).abs() < 1e-9);
//! assert_eq!(result.best.visit_order()[0], "a");
//! println!("{}", result.best);
//! # Ok::<(), u_tsp::TspError>(())
//! ```

pub mod context;
pub mod error;
pub mod input;
pub mod rules;
pub mod search;
pub mod trials;

pub use error::{Result, TspError};
