//! Tour snapshots.

use std::fmt;
use std::sync::Arc;

use super::problem::TspContext;

/// An immutable tour together with its cost.
///
/// Equality compares canonical forms, so two solutions describing the same
/// cycle from different starting positions are equal. Reversed cycles are
/// not.
#[derive(Debug, Clone)]
pub struct Solution {
    tour: Vec<usize>,
    cost: f64,
    context: Arc<TspContext>,
}

impl Solution {
    /// Snapshots `tour`, computing its cost against `context`.
    pub fn new(context: Arc<TspContext>, tour: &[usize]) -> Self {
        let cost = context.tour_cost(tour);
        Self {
            tour: tour.to_vec(),
            cost,
            context,
        }
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The tour exactly as the search left it.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// The tour rotated to start at vertex index 0.
    pub fn canonical_tour(&self) -> Vec<usize> {
        canonicalize(&self.tour)
    }

    /// Vertex labels in canonical visiting order.
    pub fn visit_order(&self) -> Vec<&str> {
        self.canonical_tour()
            .into_iter()
            .map(|v| self.context.label(v))
            .collect()
    }

    pub fn context(&self) -> &Arc<TspContext> {
        &self.context
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_tour() == other.canonical_tour()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.visit_order().join(" -> "))?;
        write!(f, "total cost = {:?}", self.cost)
    }
}

/// Rotates `tour` so that its smallest vertex index comes first, keeping
/// cyclic order and direction.
pub fn canonicalize(tour: &[usize]) -> Vec<usize> {
    let start = tour
        .iter()
        .enumerate()
        .min_by_key(|&(_, &v)| v)
        .map_or(0, |(pos, _)| pos);
    let mut canonical = Vec::with_capacity(tour.len());
    canonical.extend_from_slice(&tour[start..]);
    canonical.extend_from_slice(&tour[..start]);
    canonical
}
