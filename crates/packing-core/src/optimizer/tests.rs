//! Tests for the pack optimizer

use super::*;
use packing_types::models::{total_packs, total_shipped};

const STANDARD_SIZES: [i64; 5] = [250, 500, 1000, 2000, 5000];

fn breakdown(lines: &[(i64, i64)]) -> Vec<PackBreakdown> {
    lines.iter().map(|&(size, count)| PackBreakdown::new(size, count)).collect()
}

#[test]
fn test_standard_sizes_scenarios() {
    let cases: [(i64, &[(i64, i64)]); 5] = [
        (1, &[(250, 1)]),
        (250, &[(250, 1)]),
        (251, &[(500, 1)]),
        (501, &[(500, 1), (250, 1)]),
        (12001, &[(5000, 2), (2000, 1), (250, 1)]),
    ];

    for (amount, expected) in cases {
        let actual = optimize(amount, &STANDARD_SIZES).unwrap();
        assert_eq!(actual, breakdown(expected), "amount {amount}");
    }
}

#[test]
fn test_large_amount_with_coprime_sizes() {
    let actual = optimize(500_000, &[23, 31, 53]).unwrap();

    assert_eq!(actual, breakdown(&[(53, 9429), (31, 7), (23, 2)]));
    assert_eq!(total_shipped(&actual), 500_000);
}

#[test]
fn test_rejects_non_positive_amount() {
    assert_eq!(optimize(0, &[1]), Err(PackingError::InvalidAmount));
    assert_eq!(optimize(-10, &[1]), Err(PackingError::InvalidAmount));
}

#[test]
fn test_rejects_empty_or_non_positive_sizes() {
    assert!(matches!(optimize(10, &[]), Err(PackingError::InvalidPackSizes { .. })));
    assert!(matches!(optimize(10, &[5, 0]), Err(PackingError::InvalidPackSizes { .. })));
    assert!(matches!(optimize(10, &[-5]), Err(PackingError::InvalidPackSizes { .. })));
}

#[test]
fn test_amount_check_precedes_size_check() {
    assert_eq!(optimize(0, &[]), Err(PackingError::InvalidAmount));
}

#[test]
fn test_tie_break_prefers_ascending_processing_order() {
    // 4 = 2+2 = 1+3, both two packs; 2 improves total 4 before 3 is tried.
    let actual = optimize(4, &[1, 2, 3]).unwrap();
    assert_eq!(actual, breakdown(&[(2, 2)]));
}

#[test]
fn test_input_order_and_duplicates_do_not_change_result() {
    let sorted = optimize(12001, &STANDARD_SIZES).unwrap();
    let shuffled = optimize(12001, &[2000, 250, 5000, 500, 1000, 250]).unwrap();
    assert_eq!(sorted, shuffled);

    assert_eq!(optimize(4, &[3, 1, 2]).unwrap(), breakdown(&[(2, 2)]));
}

#[test]
fn test_prefers_less_overfill_over_fewer_packs() {
    // 6 = 3+3 ships exactly; one 7 would be a single pack but overfills.
    let actual = optimize(6, &[3, 7]).unwrap();
    assert_eq!(actual, breakdown(&[(3, 2)]));
}

#[test]
fn test_single_size_rounds_up() {
    let actual = optimize(1001, &[500]).unwrap();
    assert_eq!(actual, breakdown(&[(500, 3)]));
}

#[test]
fn test_overfill_stays_below_largest_size() {
    for amount in (1..=12_000).step_by(37) {
        let actual = optimize(amount, &STANDARD_SIZES).unwrap();
        let shipped = total_shipped(&actual);
        assert!(shipped >= amount, "underfilled {amount}");
        assert!(shipped - amount < 5000, "overfill too large for {amount}");
        assert!(actual.windows(2).all(|pair| pair[0].size > pair[1].size));
        assert!(actual.iter().all(|line| line.count > 0));
    }
}

#[test]
fn test_minimal_pack_count_on_exact_totals() {
    let actual = optimize(7500, &STANDARD_SIZES).unwrap();
    assert_eq!(total_shipped(&actual), 7500);
    assert_eq!(total_packs(&actual), 3);
}

#[test]
fn test_window_end_rejects_overflow() {
    assert_eq!(window_end(10, 5), Some(15));
    assert_eq!(window_end(usize::MAX, 1), None);
    assert_eq!(window_end(usize::MAX / 2, usize::MAX / 2), None);
}

#[test]
fn test_amount_beyond_addressable_window_is_too_large() {
    let result = optimize(i64::MAX, &[250]);
    assert!(matches!(result, Err(PackingError::AmountTooLarge { amount: i64::MAX, .. })));
}

#[test]
fn test_max_supported_amount_shrinks_with_size() {
    assert!(max_supported_amount(1) > max_supported_amount(1_000_000));
    assert!(max_supported_amount(1) > 0);
}
