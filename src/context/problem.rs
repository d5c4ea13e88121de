//! Immutable problem snapshot: labels and a symmetric distance matrix.

use std::collections::HashSet;

use crate::error::{Result, TspError};

/// Vertex labels plus a symmetric, non-negative distance matrix.
///
/// The matrix is rebuilt from the strict upper triangle of the input, so
/// symmetry and a zero diagonal hold regardless of what the caller passed.
/// A context is shared read-only between engines and solutions, usually
/// behind an `Arc`.
///
/// # Examples
///
/// ```
/// use u_tsp::context::TspContext;
///
/// let ctx = TspContext::new(
///     &["A", "B", "C"],
///     &[vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 3.0], vec![0.0, 0.0, 0.0]],
/// )
/// .unwrap();
/// assert_eq!(ctx.distance(2, 0), 2.0);
/// assert_eq!(ctx.tour_cost(&[0, 1, 2]), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct TspContext {
    labels: Vec<String>,
    /// Row-major `n * n` matrix.
    distances: Vec<f64>,
}

impl TspContext {
    /// Builds a context, validating dimensions, labels and distances.
    ///
    /// Only entries `distances[i][j]` with `i < j` are read.
    pub fn new<S, R>(labels: &[S], distances: &[R]) -> Result<Self>
    where
        S: AsRef<str>,
        R: AsRef<[f64]>,
    {
        let n = labels.len();
        if n < 2 {
            return Err(TspError::invalid_input(format!(
                "at least 2 vertices are required, got {n}"
            )));
        }
        if distances.len() != n {
            return Err(TspError::invalid_input(format!(
                "given {n} vertices the distance matrix should have {n} rows, got {}",
                distances.len()
            )));
        }
        if let Some((row, len)) = distances
            .iter()
            .map(|r| r.as_ref().len())
            .enumerate()
            .find(|&(_, len)| len != n)
        {
            return Err(TspError::invalid_input(format!(
                "row {row} of the distance matrix has {len} entries, expected {n}"
            )));
        }

        let mut seen = HashSet::with_capacity(n);
        for label in labels {
            let label = label.as_ref();
            if label.is_empty() {
                return Err(TspError::invalid_input("vertex labels must not be empty"));
            }
            if !seen.insert(label) {
                return Err(TspError::invalid_input(format!(
                    "duplicate vertex label {label:?}"
                )));
            }
        }

        let mut matrix = vec![0.0; n * n];
        for i in 0..n {
            let row = distances[i].as_ref();
            for j in (i + 1)..n {
                let d = row[j];
                if !d.is_finite() || d < 0.0 {
                    return Err(TspError::invalid_input(format!(
                        "distance between {:?} and {:?} must be finite and non-negative, got {d}",
                        labels[i].as_ref(),
                        labels[j].as_ref()
                    )));
                }
                matrix[i * n + j] = d;
                matrix[j * n + i] = d;
            }
        }

        Ok(Self {
            labels: labels.iter().map(|l| l.as_ref().to_owned()).collect(),
            distances: matrix,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, vertex: usize) -> &str {
        &self.labels[vertex]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Edge weight between two vertices.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.labels.len() + j]
    }

    /// A fresh copy of the (symmetric) distance matrix.
    pub fn distance_matrix(&self) -> Vec<Vec<f64>> {
        self.distances
            .chunks(self.labels.len())
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Length of the closed route visiting `tour` in order.
    ///
    /// Successive legs are summed first, then the closing leg back to the
    /// first vertex.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
            return 0.0;
        };
        let open: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        open + self.distance(last, first)
    }
}
