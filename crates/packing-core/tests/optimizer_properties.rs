//! Property-based tests for the pack optimizer.
//!
//! Results are checked against an exhaustive search by pack count, which
//! finds the smallest reachable total at or above the amount and the fewest
//! packs that reach it.

#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::unwrap_used, reason = "property test — panics are the assertion mechanism")]

use std::collections::BTreeSet;

use proptest::prelude::*;

use packing_core::optimize;
use packing_types::models::{total_packs, total_shipped};

/// `(total, packs)` of the best order, found level by level: all totals
/// reachable with one pack, then two, and so on.
fn exhaustive_best(amount: i64, sizes: &[i64]) -> (i64, i64) {
    let max_size = *sizes.iter().max().unwrap();
    let ceiling = amount + max_size - 1;

    let mut seen = BTreeSet::from([0_i64]);
    let mut frontier = BTreeSet::from([0_i64]);
    let mut best: Option<(i64, i64)> = None;
    let mut packs = 0_i64;

    while !frontier.is_empty() {
        packs += 1;
        let mut next = BTreeSet::new();
        for total in &frontier {
            for size in sizes {
                let candidate = total + size;
                if candidate <= ceiling && seen.insert(candidate) {
                    next.insert(candidate);
                }
            }
        }
        for &total in next.iter().filter(|&&total| total >= amount) {
            if best.map_or(true, |(best_total, _)| total < best_total) {
                best = Some((total, packs));
            }
        }
        frontier = next;
    }

    best.unwrap()
}

fn sizes_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1_i64..60, 1..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn result_covers_amount_within_one_pack(amount in 1_i64..5_000, sizes in sizes_strategy()) {
        let breakdown = optimize(amount, &sizes).unwrap();
        let shipped = total_shipped(&breakdown);
        let max_size = *sizes.iter().max().unwrap();

        prop_assert!(shipped >= amount);
        prop_assert!(shipped - amount < max_size);
    }

    #[test]
    fn result_matches_exhaustive_search(amount in 1_i64..400, sizes in sizes_strategy()) {
        let breakdown = optimize(amount, &sizes).unwrap();
        let (best_total, best_packs) = exhaustive_best(amount, &sizes);

        prop_assert_eq!(total_shipped(&breakdown), best_total);
        prop_assert_eq!(total_packs(&breakdown), best_packs);
    }

    #[test]
    fn result_is_sorted_and_uses_given_sizes(amount in 1_i64..2_000, sizes in sizes_strategy()) {
        let breakdown = optimize(amount, &sizes).unwrap();

        for pair in breakdown.windows(2) {
            prop_assert!(pair[0].size > pair[1].size);
        }
        for entry in &breakdown {
            prop_assert!(entry.count > 0);
            prop_assert!(sizes.contains(&entry.size));
        }
    }

    #[test]
    fn input_order_and_repeats_do_not_matter(amount in 1_i64..2_000, sizes in sizes_strategy()) {
        let mut shuffled: Vec<i64> = sizes.iter().rev().copied().collect();
        shuffled.extend_from_slice(&sizes);

        prop_assert_eq!(optimize(amount, &sizes).unwrap(), optimize(amount, &shuffled).unwrap());
    }
}
