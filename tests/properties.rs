//! Property tests for tour cost, canonical form, moves and rules.

use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_tsp::context::{canonicalize, Solution, TspContext};
use u_tsp::rules::{AcceptancePolicy, AnnealingConfig, AnnealingRule, GreedyRule};
use u_tsp::search::{two_opt_moves, LocalSearch};

/// A random symmetric instance plus a random tour over it.
fn instance_and_tour() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<usize>)> {
    (2usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(0.0f64..100.0, n), n),
            Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
        )
    })
}

fn context(matrix: &[Vec<f64>]) -> TspContext {
    let labels: Vec<String> = (0..matrix.len()).map(|i| format!("v{i}")).collect();
    TspContext::new(&labels, matrix).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

proptest! {
    #[test]
    fn tour_cost_invariant_under_rotation((matrix, tour) in instance_and_tour(), shift in 0usize..12) {
        let ctx = context(&matrix);
        let mut rotated = tour.clone();
        rotated.rotate_left(shift % tour.len());
        prop_assert!(close(ctx.tour_cost(&tour), ctx.tour_cost(&rotated)));
    }

    #[test]
    fn tour_cost_invariant_under_reversal((matrix, tour) in instance_and_tour()) {
        let ctx = context(&matrix);
        let mut reversed = tour.clone();
        reversed.reverse();
        prop_assert!(close(ctx.tour_cost(&tour), ctx.tour_cost(&reversed)));
    }

    #[test]
    fn canonicalize_is_idempotent((_, tour) in instance_and_tour()) {
        let once = canonicalize(&tour);
        prop_assert_eq!(canonicalize(&once), once.clone());
        prop_assert_eq!(once[0], 0);
    }

    #[test]
    fn canonicalize_ignores_rotation((_, tour) in instance_and_tour(), shift in 0usize..12) {
        let mut rotated = tour.clone();
        rotated.rotate_right(shift % tour.len());
        prop_assert_eq!(canonicalize(&rotated), canonicalize(&tour));
    }

    #[test]
    fn rotated_solutions_are_equal((matrix, tour) in instance_and_tour(), shift in 0usize..12) {
        let ctx = Arc::new(context(&matrix));
        let mut rotated = tour.clone();
        rotated.rotate_left(shift % tour.len());
        let a = Solution::new(Arc::clone(&ctx), &tour);
        let b = Solution::new(ctx, &rotated);
        prop_assert_eq!(a.visit_order(), b.visit_order());
        prop_assert!(a == b);
    }

    #[test]
    fn move_apply_undo_restores((_, tour) in instance_and_tour()) {
        let mut work = tour.clone();
        for mv in two_opt_moves(tour.len()) {
            mv.apply(&mut work);
            mv.undo(&mut work);
            prop_assert_eq!(&work, &tour);
        }
    }

    #[test]
    fn greedy_rejects_non_improvement(current in 0.0f64..1e6, worse in 0.0f64..1e6, seed in any::<u64>()) {
        let mut rule = GreedyRule;
        let mut rng = StdRng::seed_from_u64(seed);
        let candidate = current + worse;
        prop_assert!(!rule.decide(current, candidate, &mut rng).is_accept());
    }

    #[test]
    fn annealing_temperature_never_rises(
        deltas in prop::collection::vec(-5.0f64..5.0, 1..200),
        seed in any::<u64>(),
    ) {
        let mut rule = AnnealingRule::new(AnnealingConfig::default().with_accepts_before_cooling(2));
        let mut rng = StdRng::seed_from_u64(seed);
        let mut last = rule.temperature();
        for d in deltas {
            rule.decide(10.0, 10.0 + d, &mut rng);
            prop_assert!(rule.temperature() <= last);
            last = rule.temperature();
        }
    }

    #[test]
    fn greedy_search_never_worsens((matrix, _) in instance_and_tour(), seed in any::<u64>()) {
        let labels: Vec<String> = (0..matrix.len()).map(|i| format!("v{i}")).collect();
        let mut search = LocalSearch::create(&labels, &matrix, || GreedyRule, Some(seed)).unwrap();
        let mut last = search.current_cost();
        while !search.reached_fixed_point() {
            let cost = search.step_and_snapshot().cost();
            prop_assert!(cost <= last);
            last = cost;
        }
    }
}
