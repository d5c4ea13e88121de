//! Edge-list instances.
//!
//! An instance is a text file with one undirected edge per line:
//!
//! ```text
//! Boston   Chicago  983
//! Chicago  Denver   1003
//! Boston   Denver   1969
//! ```
//!
//! Either direction may be given, and an edge may be repeated as long as
//! every record agrees on its length. Every pair of vertices must be
//! connected.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::context::TspContext;
use crate::error::{Result, TspError};

/// Parsed edge records, keyed by the lexicographically ordered label pair.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    labels: BTreeSet<String>,
    edges: BTreeMap<(String, String), f64>,
}

impl EdgeList {
    /// Parses `FROM TO DISTANCE` records. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut list = Self::default();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            list.push_line(idx + 1, line)?;
        }
        if list.edges.is_empty() {
            return Err(TspError::invalid_input("input contained no edges"));
        }
        Ok(list)
    }

    /// Reads and parses an edge-list file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("read edge list from {}", path.as_ref().display());
        Self::parse(&text)
    }

    fn push_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [a, b, raw] = fields[..] else {
            return Err(TspError::parse(
                line_no,
                format!("expected 'FROM TO DISTANCE', got {} fields", fields.len()),
            ));
        };
        let distance: f64 = raw
            .parse()
            .map_err(|_| TspError::parse(line_no, format!("invalid distance: {raw}")))?;
        if !distance.is_finite() || distance < 0.0 {
            return Err(TspError::parse(
                line_no,
                format!("distance must be finite and non-negative, got {raw}"),
            ));
        }
        if a == b {
            return Err(TspError::parse(line_no, format!("self-loop on {a}")));
        }

        let key = if a < b {
            (a.to_owned(), b.to_owned())
        } else {
            (b.to_owned(), a.to_owned())
        };
        match self.edges.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(distance);
            }
            Entry::Occupied(slot) if *slot.get() != distance => {
                let (from, to) = slot.key();
                return Err(TspError::parse(
                    line_no,
                    format!(
                        "conflicting records for the edge between {from} and {to}: {} and {distance}",
                        slot.get()
                    ),
                ));
            }
            Entry::Occupied(_) => {}
        }
        self.labels.insert(a.to_owned());
        self.labels.insert(b.to_owned());
        Ok(())
    }

    /// Vertex labels in sorted order; matrix rows follow this order.
    pub fn labels(&self) -> Vec<&str> {
        self.labels.iter().map(String::as_str).collect()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Symmetric weight matrix over [`labels`](Self::labels).
    ///
    /// Fails if some pair of vertices has no edge.
    pub fn distance_matrix(&self) -> Result<Vec<Vec<f64>>> {
        let labels: Vec<&String> = self.labels.iter().collect();
        let n = labels.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let key = (labels[i].clone(), labels[j].clone());
                let d = *self.edges.get(&key).ok_or_else(|| {
                    TspError::invalid_input(format!(
                        "could not find distance between {} and {}",
                        labels[i], labels[j]
                    ))
                })?;
                matrix[i][j] = d;
                matrix[j][i] = d;
            }
        }
        Ok(matrix)
    }

    /// Sorted labels and the matching weight matrix.
    pub fn into_parts(self) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
        let matrix = self.distance_matrix()?;
        Ok((self.labels.into_iter().collect(), matrix))
    }

    /// Builds a validated problem context.
    pub fn into_context(self) -> Result<TspContext> {
        let (labels, matrix) = self.into_parts()?;
        TspContext::new(&labels, &matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
A B 1
B C 1
C D 1
D A 1

A C 1.4142135623730951
D B 1.4142135623730951
";

    #[test]
    fn test_parse_square() {
        let list = EdgeList::parse(SQUARE).unwrap();
        assert_eq!(list.labels(), vec!["A", "B", "C", "D"]);
        assert_eq!(list.num_edges(), 6);
        let m = list.distance_matrix().unwrap();
        assert_eq!(m[0][1], 1.0);
        assert_eq!(m[3][0], 1.0);
        assert_eq!(m[1][3], std::f64::consts::SQRT_2);
        assert_eq!(m[3][1], std::f64::consts::SQRT_2);
    }

    #[test]
    fn test_into_context() {
        let ctx = EdgeList::parse(SQUARE).unwrap().into_context().unwrap();
        assert_eq!(ctx.num_vertices(), 4);
        assert!((ctx.tour_cost(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_agreeing_duplicates_are_fine() {
        let list = EdgeList::parse("a b 2\nb a 2\na c 1\nb c 3").unwrap();
        assert_eq!(list.num_edges(), 3);
    }

    #[test]
    fn test_rejects_conflicting_duplicates() {
        let err = EdgeList::parse("a b 2\nb a 3").unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 2, .. }), "{err}");
        assert!(err.to_string().contains("conflicting"));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(matches!(
            EdgeList::parse("a b"),
            Err(TspError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            EdgeList::parse("a b 1\na c x"),
            Err(TspError::Parse { line: 2, .. })
        ));
        assert!(EdgeList::parse("a b -1").is_err());
        assert!(EdgeList::parse("a b inf").is_err());
        assert!(EdgeList::parse("a a 0").is_err());
        assert!(EdgeList::parse("a b 1 extra").is_err());
    }

    #[test]
    fn test_rejects_empty_input() {
        let err = EdgeList::parse(" \n\n\t\n").unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_edge() {
        let list = EdgeList::parse("a b 1\nb c 1").unwrap();
        let err = list.into_parts().unwrap_err();
        assert!(err.to_string().contains("between a and c"), "{err}");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = EdgeList::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, TspError::Io(_)));
    }
}
