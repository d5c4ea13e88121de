//! Restricted 2-opt local search.
//!
//! [`LocalSearch`] drives one trial: it sweeps the neighborhood produced by
//! [`two_opt_moves`], lets an [`AcceptancePolicy`](crate::rules::AcceptancePolicy)
//! choose where to go, and falls back to a depth-2 lookahead before giving
//! up at a fixed point.

mod moves;
mod runner;

pub use moves::{for_each_move, two_opt_moves, TwoOptMove};
pub use runner::{LocalSearch, SearchState};
