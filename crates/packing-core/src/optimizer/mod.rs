//! Pack breakdown optimizer.
//!
//! Finds the combination of pack sizes (unlimited supply of each) that ships
//! the fewest units without underfilling the order and, among those, uses the
//! fewest packs.
//!
//! # Search window
//!
//! An optimal total never reaches `amount + max_size`: dropping one of the
//! largest packs used would still cover the order with less overfill and fewer
//! packs. The DP therefore only tracks totals in `[0, amount + max_size]`,
//! which keeps the state linear in `amount`.
//!
//! # Tie-break
//!
//! Sizes are processed in ascending order and a total only records a new size
//! on a strict improvement in pack count. When several decompositions of the
//! target total use the same minimal number of packs, the one reached first in
//! that order wins. The order is part of the output contract: changing it
//! changes the composition returned on ties.
//!
//! Time is `O((amount + max_size) * sizes)`, space `O(amount + max_size)`.
//! Every call owns its tables, so the function is safe to run concurrently.

use std::collections::BTreeMap;
use std::mem::size_of;

use packing_types::{PackBreakdown, PackingError};

/// Sentinel for totals no combination of packs can reach.
const UNREACHABLE: u32 = u32::MAX;

/// Compute the breakdown for `amount` using `sizes`.
///
/// `sizes` may come in any order and may repeat values; non-positive values are
/// rejected. The result is sorted by size, largest first.
pub fn optimize(amount: i64, sizes: &[i64]) -> Result<Vec<PackBreakdown>, PackingError> {
    if amount <= 0 {
        return Err(PackingError::InvalidAmount);
    }

    let sizes = canonical_sizes(sizes)?;
    let Some(&max_size) = sizes.last() else {
        return Err(PackingError::invalid_pack_sizes("no pack sizes given"));
    };

    let amount_units = usize::try_from(amount).map_err(|_| too_large(amount, max_size))?;
    let limit = window_end(amount_units, max_size).ok_or_else(|| too_large(amount, max_size))?;

    let (min_packs, chosen) = fill_tables(&sizes, limit);

    let Some(target) = (amount_units..=limit).find(|&total| min_packs[total] != UNREACHABLE) else {
        tracing::error!(amount, ?sizes, "no reachable total inside the search window");
        return Err(PackingError::CouldNotCalculate);
    };

    reconstruct(&chosen, target)
}

/// Largest amount whose search window still fits in a single allocation.
pub fn max_supported_amount(max_size: i64) -> i64 {
    let max_size = usize::try_from(max_size).unwrap_or(usize::MAX);
    let entries = isize::MAX as usize / size_of::<usize>();
    let amount = entries.saturating_sub(max_size).saturating_sub(1);
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Deduplicated sizes in ascending order; this order is the tie-break.
fn canonical_sizes(sizes: &[i64]) -> Result<Vec<usize>, PackingError> {
    if sizes.is_empty() {
        return Err(PackingError::invalid_pack_sizes("no pack sizes given"));
    }

    let mut canonical = Vec::with_capacity(sizes.len());
    for &size in sizes {
        if size <= 0 {
            return Err(PackingError::invalid_pack_sizes(format!(
                "pack size {size} is not positive"
            )));
        }
        let size = usize::try_from(size).map_err(|_| {
            PackingError::invalid_pack_sizes(format!("pack size {size} is out of range"))
        })?;
        canonical.push(size);
    }
    canonical.sort_unstable();
    canonical.dedup();
    Ok(canonical)
}

/// Inclusive end of the search window, or `None` when the tables would not fit.
fn window_end(amount: usize, max_size: usize) -> Option<usize> {
    let end = amount.checked_add(max_size)?;
    let len = end.checked_add(1)?;
    (len <= isize::MAX as usize / size_of::<usize>()).then_some(end)
}

fn too_large(amount: i64, max_size: usize) -> PackingError {
    PackingError::AmountTooLarge {
        amount,
        limit: max_supported_amount(i64::try_from(max_size).unwrap_or(i64::MAX)),
    }
}

/// Unbounded-knapsack pass: fewest packs summing exactly to each total, and
/// the size that achieved it.
fn fill_tables(sizes: &[usize], limit: usize) -> (Vec<u32>, Vec<usize>) {
    let mut min_packs = vec![UNREACHABLE; limit + 1];
    let mut chosen = vec![0_usize; limit + 1];
    min_packs[0] = 0;

    for &size in sizes {
        for total in size..=limit {
            let previous = min_packs[total - size];
            if previous == UNREACHABLE {
                continue;
            }
            let candidate = previous + 1;
            if candidate < min_packs[total] {
                min_packs[total] = candidate;
                chosen[total] = size;
            }
        }
    }

    (min_packs, chosen)
}

/// Walk `chosen` back from `target` to zero, counting packs per size.
fn reconstruct(chosen: &[usize], target: usize) -> Result<Vec<PackBreakdown>, PackingError> {
    let mut counts: BTreeMap<usize, i64> = BTreeMap::new();
    let mut remaining = target;

    while remaining > 0 {
        let size = chosen[remaining];
        if size == 0 || size > remaining {
            tracing::error!(target, remaining, "broken back-pointer in optimizer tables");
            return Err(PackingError::CouldNotCalculate);
        }
        *counts.entry(size).or_insert(0) += 1;
        remaining -= size;
    }

    Ok(counts
        .into_iter()
        .rev()
        .map(|(size, count)| PackBreakdown::new(size as i64, count))
        .collect())
}

#[cfg(test)]
mod tests;
