//! Finish-probability heuristic.

/// Baseline share of runners that complete a race.
const BASE_FINISH_PROB: f64 = 0.97;

/// Fixed penalty for a fault-prone runner.
const FAULT_PENALTY_BASE: f64 = 0.15;

/// Additional penalty scaled by fault frequency.
const FAULT_PENALTY_SCALE: f64 = 0.10;

/// Fallback fault frequency when the signal is unset.
const DEFAULT_FAULT_FREQUENCY: f64 = 0.5;

const PROB_FINISH_MIN: f64 = 0.75;
const PROB_FINISH_MAX: f64 = 0.99;

/// Probability that a runner completes the race.
///
/// Starts at 0.97. A fault-prone runner loses `0.15 + 0.10 * fault_frequency`
/// (frequency defaults to 0.5 when unset). The result is clamped to
/// [0.75, 0.99].
pub fn finish_probability(fault_prone: bool, fault_frequency: Option<f64>) -> f64 {
    let mut prob = BASE_FINISH_PROB;

    if fault_prone {
        let severity = fault_frequency.unwrap_or(DEFAULT_FAULT_FREQUENCY);
        prob -= FAULT_PENALTY_BASE + FAULT_PENALTY_SCALE * severity;
    }

    prob.clamp(PROB_FINISH_MIN, PROB_FINISH_MAX)
}
