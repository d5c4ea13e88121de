//! Restricted 2-opt neighborhood.
//!
//! The neighborhood is not the full set of edge pairs. It is three passes:
//!
//! 1. edges `<0,1>` against `<2,3>`, `<4,5>`, ..., then `<2,3>` against
//!    `<4,5>`, ... (even offsets);
//! 2. the same starting from `<1,2>` (odd offsets);
//! 3. the closing edge `<0,n-1>` against `<1,2>`, `<3,4>`, ...
//!
//! The enumeration order is part of the search behavior: it decides which
//! local optimum a run ends in.

/// Two tour edges `<i,j>` and `<k,m>` (as positions) to be reconnected as
/// `<i,k>` and `<j,m>`.
///
/// Reconnecting only requires swapping the entries at positions `j` and
/// `k`, which is its own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TwoOptMove {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub m: usize,
}

impl TwoOptMove {
    #[inline]
    pub fn apply(&self, tour: &mut [usize]) {
        tour.swap(self.j, self.k);
    }

    #[inline]
    pub fn undo(&self, tour: &mut [usize]) {
        self.apply(tour);
    }
}

/// Moves of the restricted neighborhood for a tour of `n` vertices, in
/// sweep order. Empty for `n < 4`.
pub fn two_opt_moves(n: usize) -> impl Iterator<Item = TwoOptMove> {
    let wrap_around = (1..)
        .step_by(2)
        .take_while(move |&k| k + 2 < n)
        .map(move |k| TwoOptMove {
            i: 0,
            j: n - 1,
            k,
            m: k + 1,
        });
    offset_pass(0, n).chain(offset_pass(1, n)).chain(wrap_around)
}

/// Edges starting at `start`, `start + 2`, ... paired with every later edge
/// of the same parity.
fn offset_pass(start: usize, n: usize) -> impl Iterator<Item = TwoOptMove> {
    (start..)
        .step_by(2)
        .take_while(move |&i| i + 3 < n)
        .flat_map(move |i| {
            (i + 2..)
                .step_by(2)
                .take_while(move |&k| k + 1 < n)
                .map(move |k| TwoOptMove {
                    i,
                    j: i + 1,
                    k,
                    m: k + 1,
                })
        })
}

/// Applies `action` to every move of the neighborhood, in sweep order.
pub fn for_each_move<A: FnMut(TwoOptMove)>(n: usize, action: A) {
    two_opt_moves(n).for_each(action);
}
