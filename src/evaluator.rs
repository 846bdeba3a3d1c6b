//! Race evaluation engine: normalization, weighted scoring, softmax win
//! probabilities and the orchestrator tying the estimators together.
//!
//! The engine is pure and stateless: every call receives its own inputs and
//! weights and produces fresh results. Missing optional signals fall back to
//! neutral defaults instead of erroring, so the model degrades gracefully
//! with partial information.

use thiserror::Error;

use crate::config::EvaluationWeights;
use crate::explain::generate_explanation;
use crate::finish::finish_probability;
use crate::top3::RankMultiplierTable;
use crate::types::{EvaluationResult, HorseSignal, RaceContext};

/// Neutral fallback for missing [0,1] signals.
pub const NEUTRAL_SIGNAL: f64 = 0.5;

/// Neutral implied probability when no market price is available.
pub const DEFAULT_IMPLIED_PROB: f64 = 0.1;

/// Tolerance on the softmax probability sum before renormalizing.
const PROB_SUM_TOLERANCE: f64 = 0.01;

/// Evaluation errors surfaced to callers.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Fatal input shape problem. Not retryable.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No structured data could be produced for the request. Upstream may
    /// retry once fresh data is available.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
}

/// Linearly rescale `value` from [min, max] into [0, 1], clamping the result.
///
/// Returns 0.5 when `min == max` to avoid division by zero.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Convert decimal odds into a crude implied probability (1/odds).
///
/// Missing or non-positive odds map to a neutral default.
pub fn implied_probability(odds: Option<f64>) -> f64 {
    match odds {
        Some(o) if o > 0.0 => 1.0 / o,
        _ => DEFAULT_IMPLIED_PROB,
    }
}

/// Weighted linear score for one runner.
///
/// All signals pass through [`normalize`] over the default [0,1] range before
/// weighting; absent signals take the neutral 0.5 fallback.
pub fn raw_score(horse: &HorseSignal, weights: &EvaluationWeights) -> f64 {
    let recent_form = normalize(horse.recent_form.unwrap_or(NEUTRAL_SIGNAL), 0.0, 1.0);
    let terrain_affinity = normalize(horse.terrain_affinity.unwrap_or(NEUTRAL_SIGNAL), 0.0, 1.0);
    let distance_affinity = normalize(horse.distance_affinity.unwrap_or(NEUTRAL_SIGNAL), 0.0, 1.0);
    let jockey_win_rate = normalize(horse.jockey_win_rate.unwrap_or(NEUTRAL_SIGNAL), 0.0, 1.0);
    let trainer_win_rate = normalize(horse.trainer_win_rate.unwrap_or(NEUTRAL_SIGNAL), 0.0, 1.0);
    let market_prob = implied_probability(horse.odds);

    weights.recent_form * recent_form
        + weights.terrain_affinity * terrain_affinity
        + weights.distance_affinity * distance_affinity
        + weights.jockey_win_rate * jockey_win_rate
        + weights.trainer_win_rate * trainer_win_rate
        + weights.market_prob * market_prob
}

/// Softmax transform of raw scores into win probabilities.
///
/// Subtracts the maximum score before exponentiating to guard against
/// overflow, which also makes the transform shift-invariant. If floating
/// point drift pushes the sum more than 0.01 away from 1, every probability
/// is renormalized by the actual sum.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let max_score = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let exp_scores: Vec<f64> = scores.iter().map(|s| (s - max_score).exp()).collect();
    let sum: f64 = exp_scores.iter().sum();

    let mut probs: Vec<f64> = exp_scores.iter().map(|e| e / sum).collect();

    // Correct drift silently; never surface it as an error.
    let prob_sum: f64 = probs.iter().sum();
    if (prob_sum - 1.0).abs() > PROB_SUM_TOLERANCE {
        for p in &mut probs {
            *p /= prob_sum;
        }
    }

    probs
}

fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Evaluate a race: score every runner, transform scores into win
/// probabilities, rank, and attach top-3/finish estimates and explanations.
///
/// Results come back sorted by descending win probability with dense ranks
/// 1..N; ties keep their input order (stable sort). The win probabilities of
/// one call sum to 1 within 0.01. Uses the default rank-multiplier table;
/// see [`evaluate_race_with_table`] for a custom tuning.
///
/// # Errors
/// [`EvalError::InvalidInput`] when `horses` is empty or
/// `race.competitor_count` is zero.
pub fn evaluate_race(
    race: &RaceContext,
    horses: &[HorseSignal],
    weights: &EvaluationWeights,
) -> Result<Vec<EvaluationResult>, EvalError> {
    evaluate_race_with_table(race, horses, weights, &RankMultiplierTable::default())
}

/// [`evaluate_race`] with a caller-supplied rank-multiplier table, so the
/// top-3 tuning can be swapped without touching the probability model.
pub fn evaluate_race_with_table(
    race: &RaceContext,
    horses: &[HorseSignal],
    weights: &EvaluationWeights,
    table: &RankMultiplierTable,
) -> Result<Vec<EvaluationResult>, EvalError> {
    if horses.is_empty() {
        return Err(EvalError::InvalidInput(
            "no runners provided for evaluation".to_string(),
        ));
    }
    if race.competitor_count == 0 {
        return Err(EvalError::InvalidInput(
            "race context has no runner count".to_string(),
        ));
    }

    let scores: Vec<f64> = horses.iter().map(|h| raw_score(h, weights)).collect();
    let prob_wins = softmax(&scores);

    // Stable descending sort, then dense ranks 1..N.
    let mut order: Vec<usize> = (0..horses.len()).collect();
    order.sort_by(|&a, &b| prob_wins[b].partial_cmp(&prob_wins[a]).unwrap());

    let results = order
        .iter()
        .enumerate()
        .map(|(pos, &i)| {
            let horse = &horses[i];
            let rank = pos + 1;
            let prob_win = prob_wins[i];
            let prob_top3 = table.prob_top3(prob_win, rank);
            let prob_finish = finish_probability(horse.fault_prone, horse.fault_frequency);
            let explanation = generate_explanation(horse, rank, race);

            EvaluationResult {
                id: horse.id.clone(),
                name: horse.name.clone(),
                number: horse.number,
                rank,
                prob_win: round_to(prob_win, 4),
                prob_top3: round_to(prob_top3, 4),
                prob_finish: round_to(prob_finish, 4),
                explanation,
                score: round_to(scores[i], 2),
            }
        })
        .collect();

    Ok(results)
}
