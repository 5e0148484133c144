// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Greedy decomposition of cubic yards into container loads.

use haulchat_core::RecommendedLoads;
use tracing::debug;

/// Container sizes in cubic yards, smallest first.
pub const LOAD_BANDS: [u32; 6] = [1, 2, 4, 7, 10, 14];

/// Largest volume, in cubic yards, a single job can be quoted for.
pub const MAX_ESTIMATED_YARDS: f64 = 1_000.0;

/// Whether `estimated_yards` is a positive, finite volume no larger than
/// [`MAX_ESTIMATED_YARDS`].
pub fn is_quotable(estimated_yards: f64) -> bool {
    estimated_yards.is_finite() && estimated_yards > 0.0 && estimated_yards <= MAX_ESTIMATED_YARDS
}

/// Decompose an estimated volume into loads.
///
/// The volume is rounded up to whole yards, then the largest band that fits
/// the remainder is taken repeatedly. Volumes that are not
/// [quotable](is_quotable) yield no loads.
pub fn calculate_loads(estimated_yards: f64) -> RecommendedLoads {
    if !is_quotable(estimated_yards) {
        return RecommendedLoads::default();
    }

    // Bounded by MAX_ESTIMATED_YARDS, so the cast cannot truncate.
    let mut remaining = estimated_yards.ceil() as u32;
    let mut loads = Vec::new();

    while remaining > 0 {
        let band = LOAD_BANDS
            .iter()
            .rev()
            .copied()
            .find(|band| *band <= remaining)
            .unwrap_or(LOAD_BANDS[0]);
        loads.push(band);
        remaining = remaining.saturating_sub(band);
    }

    let total = total_yards(&loads);
    debug!(estimated_yards, loads = loads.len(), total_yards = total, "loads calculated");

    RecommendedLoads {
        loads,
        total_yards: total,
    }
}

/// Sum of a load list, saturating at `u32::MAX`.
pub fn total_yards(loads: &[u32]) -> u32 {
    loads.iter().fold(0u32, |acc, band| acc.saturating_add(*band))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_yards() {
        let r = calculate_loads(20.0);
        assert_eq!(r.loads, vec![14, 4, 2]);
        assert_eq!(r.total_yards, 20);
    }

    #[test]
    fn fractional_volume_rounds_up() {
        let r = calculate_loads(3.2);
        assert_eq!(r.loads, vec![4]);
        assert_eq!(r.total_yards, 4);
    }

    #[test]
    fn exact_band_is_a_single_load() {
        for band in LOAD_BANDS {
            assert_eq!(calculate_loads(f64::from(band)).loads, vec![band]);
        }
    }

    #[test]
    fn small_volumes() {
        assert_eq!(calculate_loads(0.1).loads, vec![1]);
        assert_eq!(calculate_loads(3.0).loads, vec![2, 1]);
        assert_eq!(calculate_loads(13.0).loads, vec![10, 2, 1]);
    }

    #[test]
    fn large_volume_uses_repeated_largest_band() {
        let r = calculate_loads(30.0);
        assert_eq!(r.loads, vec![14, 14, 2]);
        assert_eq!(r.total_yards, 30);
    }

    #[test]
    fn volume_cap_is_inclusive() {
        let r = calculate_loads(MAX_ESTIMATED_YARDS);
        assert_eq!(r.total_yards, 1_000);
        assert_eq!(r.loads.len(), 73);
    }

    #[test]
    fn oversized_volume_is_empty() {
        for yards in [MAX_ESTIMATED_YARDS + 0.5, 1.0e9, f64::MAX] {
            let r = calculate_loads(yards);
            assert!(r.loads.is_empty(), "{yards}");
            assert_eq!(r.total_yards, 0);
            assert!(!is_quotable(yards));
        }
    }

    #[test]
    fn non_positive_or_nan_is_empty() {
        for yards in [0.0, -1.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let r = calculate_loads(yards);
            assert!(r.loads.is_empty(), "{yards}");
            assert_eq!(r.total_yards, 0);
        }
    }
}
