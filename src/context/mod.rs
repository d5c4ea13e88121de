//! Problem instances and solution snapshots.
//!
//! A [`TspContext`] is the immutable part of a search: vertex labels and a
//! symmetric distance matrix. A [`Solution`] is a cheap value copy of a tour
//! taken at some point during the search, with its cost.

mod problem;
mod solution;

pub use problem::TspContext;
pub use solution::{canonicalize, Solution};
