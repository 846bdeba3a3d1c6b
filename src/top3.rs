//! Top-3 probability estimation from win probability and rank.
//!
//! The rank multipliers are a tunable redistribution heuristic, not a
//! combinatorial derivation. The table is a plain value so alternative
//! tunings can be swapped in without touching the probability model.

/// Lower bound on any top-3 probability.
const PROB_TOP3_MIN: f64 = 0.01;

/// Upper bound on any top-3 probability.
const PROB_TOP3_MAX: f64 = 0.95;

/// Within the top three ranks, prob_top3 never drops below 1.5x prob_win.
const FAVORITE_FLOOR_FACTOR: f64 = 1.5;

/// One band of the rank-multiplier table.
///
/// For a rank inside the band, the multiplier is
/// `max(floor, base - step * (rank - anchor))`.
#[derive(Debug, Clone)]
pub struct MultiplierBand {
    /// Highest rank (inclusive) this band covers.
    pub max_rank: usize,
    pub base: f64,
    pub step: f64,
    pub anchor: usize,
    pub floor: f64,
}

/// Rank-indexed multiplier table for the top-3 estimator.
#[derive(Debug, Clone)]
pub struct RankMultiplierTable {
    bands: Vec<MultiplierBand>,
}

impl Default for RankMultiplierTable {
    fn default() -> Self {
        Self {
            bands: vec![
                MultiplierBand { max_rank: 1, base: 1.0, step: 0.0, anchor: 1, floor: 0.0 },
                MultiplierBand { max_rank: 2, base: 0.85, step: 0.0, anchor: 2, floor: 0.0 },
                MultiplierBand { max_rank: 3, base: 0.70, step: 0.0, anchor: 3, floor: 0.0 },
                MultiplierBand { max_rank: 5, base: 0.50, step: 0.10, anchor: 3, floor: 0.0 },
                MultiplierBand { max_rank: 10, base: 0.25, step: 0.03, anchor: 5, floor: 0.0 },
                MultiplierBand {
                    max_rank: usize::MAX,
                    base: 0.10,
                    step: 0.01,
                    anchor: 10,
                    floor: 0.05,
                },
            ],
        }
    }
}

impl RankMultiplierTable {
    pub fn new(bands: Vec<MultiplierBand>) -> Self {
        Self { bands }
    }

    /// Multiplier for a 1-based rank.
    pub fn multiplier(&self, rank: usize) -> f64 {
        for band in &self.bands {
            if rank <= band.max_rank {
                let decay = band.step * rank.saturating_sub(band.anchor) as f64;
                return (band.base - decay).max(band.floor);
            }
        }
        // Unreachable with the default table; treat as a distant outsider.
        0.05
    }

    /// Top-3 probability for a runner at the given rank.
    ///
    /// Base estimate is `prob_win * 3 * multiplier(rank)` (three paying
    /// places). Ranks 1..=3 are floored at `prob_win * 1.5`, then the result
    /// is clamped to [0.01, 0.95].
    pub fn prob_top3(&self, prob_win: f64, rank: usize) -> f64 {
        let mut prob = prob_win * 3.0 * self.multiplier(rank);
        if rank <= 3 {
            prob = prob.max(prob_win * FAVORITE_FLOOR_FACTOR);
        }
        prob.clamp(PROB_TOP3_MIN, PROB_TOP3_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_table_values() {
        let table = RankMultiplierTable::default();
        assert!((table.multiplier(1) - 1.0).abs() < 1e-12);
        assert!((table.multiplier(2) - 0.85).abs() < 1e-12);
        assert!((table.multiplier(3) - 0.70).abs() < 1e-12);
        assert!((table.multiplier(4) - 0.40).abs() < 1e-12);
        assert!((table.multiplier(5) - 0.30).abs() < 1e-12);
        assert!((table.multiplier(6) - 0.22).abs() < 1e-12);
        assert!((table.multiplier(10) - 0.10).abs() < 1e-12);
        assert!((table.multiplier(11) - 0.09).abs() < 1e-12);
        assert!((table.multiplier(15) - 0.05).abs() < 1e-12);
        // Outsider floor
        assert!((table.multiplier(30) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_prob_top3_scenario() {
        // Win probabilities from softmax of [2, 1, 0]
        let table = RankMultiplierTable::default();
        assert!((table.prob_top3(0.665, 1) - 0.95).abs() < 0.02);
        assert!((table.prob_top3(0.245, 2) - 0.62).abs() < 0.02);
        assert!((table.prob_top3(0.090, 3) - 0.19).abs() < 0.02);
    }

    #[test]
    fn test_prob_top3_favorite_floor() {
        // Tiny prob_win at rank 3: base 3 * 0.7 * p beats the 1.5x floor,
        // but at rank 2 with the floor binding the result is still >= 1.5x.
        let table = RankMultiplierTable::default();
        let p = 0.02;
        assert!(table.prob_top3(p, 2) >= p * 1.5);
        assert!(table.prob_top3(p, 3) >= p * 1.5);
    }

    #[test]
    fn test_prob_top3_bounds() {
        let table = RankMultiplierTable::default();
        assert_eq!(table.prob_top3(0.9, 1), 0.95);
        assert_eq!(table.prob_top3(0.0001, 18), 0.01);
    }

    #[test]
    fn test_prob_top3_monotonic_past_rank_three() {
        // At fixed prob_win, deeper ranks never get a higher top-3 estimate.
        let table = RankMultiplierTable::default();
        let p = 0.10;
        for rank in 4..20 {
            assert!(table.prob_top3(p, rank) >= table.prob_top3(p, rank + 1));
        }
    }

    #[test]
    fn test_custom_table_injectable() {
        // A flat table should make the estimator insensitive to rank.
        let flat = RankMultiplierTable::new(vec![MultiplierBand {
            max_rank: usize::MAX,
            base: 0.5,
            step: 0.0,
            anchor: 1,
            floor: 0.0,
        }]);
        let a = flat.prob_top3(0.1, 5);
        let b = flat.prob_top3(0.1, 12);
        assert!((a - b).abs() < 1e-12);
    }
}
