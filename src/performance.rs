//! Additive performance score from recent record, surface aptitude and
//! carried weight.
//!
//! Independent of the probability model: this score feeds the display
//! ranking and the expert narrative, not the win probabilities, and the two
//! pipelines are deliberately not reconciled.

use crate::types::{HorseRecord, Surface};

/// Weight of the musique component.
const MUSIQUE_WEIGHT: f64 = 0.4;

/// Weight of the surface-aptitude and carried-weight components.
const APTITUDE_WEIGHT: f64 = 0.3;
const CARRIED_WEIGHT_WEIGHT: f64 = 0.3;

/// Points for a matching surface aptitude (50-point base).
const APTITUDE_MATCH_POINTS: f64 = 50.0;

/// Points without a specific aptitude edge (30-point base).
const APTITUDE_NEUTRAL_POINTS: f64 = 30.0;

/// Carried weight with no penalty, in kg.
const OPTIMAL_WEIGHT_KG: f64 = 57.0;

/// Penalty per kg away from the optimum.
const WEIGHT_PENALTY_PER_KG: f64 = 5.0;

/// Average points from a musique string, or `None` when nothing parses.
///
/// Each finishing position contributes `(6 - position) * 10`: a win is worth
/// 50 points, positions past 5th go to zero or negative, deliberately
/// unclamped. Non-numeric tokens ("Da", "Ret", ...) are skipped.
pub fn musique_score(musique: &str) -> Option<f64> {
    let positions: Vec<i32> = musique
        .split('-')
        .filter_map(|part| part.trim().parse::<i32>().ok())
        .collect();

    if positions.is_empty() {
        return None;
    }

    let total: f64 = positions.iter().map(|&pos| (6 - pos) as f64 * 10.0).sum();
    Some(total / positions.len() as f64)
}

/// Whether a runner's aptitude matches the race surface.
///
/// Synthetic aptitude counts on synthetic tracks; the absence of it counts
/// as turf aptitude on turf.
fn aptitude_matches(synthetic_apt: bool, surface: Surface) -> bool {
    match surface {
        Surface::Synthetic => synthetic_apt,
        Surface::Turf => !synthetic_apt,
    }
}

/// Compute the additive performance score for one runner.
///
/// Pure and deterministic: musique (40%), surface aptitude (30%), carried
/// weight (30%), rounded to 2 decimals.
pub fn compute_performance_score(horse: &HorseRecord, surface: Surface) -> f64 {
    let mut score = 0.0;

    if let Some(ms) = horse.musique.as_deref().and_then(musique_score) {
        score += ms * MUSIQUE_WEIGHT;
    }

    let aptitude_points = if aptitude_matches(horse.synthetic_apt, surface) {
        APTITUDE_MATCH_POINTS
    } else {
        APTITUDE_NEUTRAL_POINTS
    };
    score += aptitude_points * APTITUDE_WEIGHT;

    let weight_diff = (horse.weight - OPTIMAL_WEIGHT_KG).abs();
    let weight_points = (50.0 - weight_diff * WEIGHT_PENALTY_PER_KG).max(0.0);
    score += weight_points * CARRIED_WEIGHT_WEIGHT;

    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(musique: Option<&str>, synthetic_apt: bool, weight: f64) -> HorseRecord {
        HorseRecord {
            id: "h1".to_string(),
            number: 3,
            name: "Test".to_string(),
            musique: musique.map(|s| s.to_string()),
            weight,
            odds: None,
            initial_odds: None,
            synthetic_apt,
            forum_insight: None,
            performance_score: 0.0,
        }
    }

    #[test]
    fn test_musique_score_basic() {
        // (50 + 40 + 30) / 3 = 40
        assert!((musique_score("1-2-3").unwrap() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_musique_score_skips_non_numeric() {
        // "Da" is a disqualification marker; only 1 and 2 count.
        assert!((musique_score("1-Da-2").unwrap() - 45.0).abs() < 1e-12);
        assert!(musique_score("Da-Ret").is_none());
    }

    #[test]
    fn test_musique_score_deep_positions_go_negative() {
        // (6 - 9) * 10 = -30, not clamped
        assert!((musique_score("9").unwrap() + 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_performance_score_scenario() {
        // musique "1-2-3" = 40 * 0.4 = 16, matched aptitude = 15,
        // optimal weight = 15: total 46.0
        let h = record(Some("1-2-3"), true, 57.0);
        assert!((compute_performance_score(&h, Surface::Synthetic) - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_performance_score_neutral_aptitude() {
        // Synthetic-apt runner on turf only gets the neutral 9 points.
        let h = record(Some("1-2-3"), true, 57.0);
        assert!((compute_performance_score(&h, Surface::Turf) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_performance_score_turf_aptitude() {
        // No synthetic aptitude counts as a match on turf.
        let h = record(Some("1-2-3"), false, 57.0);
        assert!((compute_performance_score(&h, Surface::Turf) - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_penalty() {
        // 4 kg off optimum: weight points 50 - 20 = 30, * 0.3 = 9
        let h = record(None, true, 61.0);
        assert!((compute_performance_score(&h, Surface::Synthetic) - (15.0 + 9.0)).abs() < 1e-9);
    }

    #[test]
    fn test_weight_penalty_floors_at_zero() {
        // 12 kg off optimum would be negative; floored at 0.
        let h = record(None, true, 69.0);
        assert!((compute_performance_score(&h, Surface::Synthetic) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_musique_contributes_nothing() {
        let with = record(Some("1-1-1"), true, 57.0);
        let without = record(None, true, 57.0);
        let diff = compute_performance_score(&with, Surface::Synthetic)
            - compute_performance_score(&without, Surface::Synthetic);
        assert!((diff - 20.0).abs() < 1e-9); // 50 * 0.4
    }

    #[test]
    fn test_determinism() {
        let h = record(Some("2-4-1-3"), false, 58.5);
        let a = compute_performance_score(&h, Surface::Turf);
        let b = compute_performance_score(&h, Surface::Turf);
        assert_eq!(a, b);
    }
}
