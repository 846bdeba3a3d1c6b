//! Deterministic explanation generation.
//!
//! A fixed, ordered rule list where each rule contributes at most one clause.
//! The first three matching clauses are kept, joined by " • ".

use crate::types::{HorseSignal, RaceContext};

const MAX_CLAUSES: usize = 3;
const CLAUSE_SEPARATOR: &str = " • ";
const DEFAULT_EXPLANATION: &str = "Standard analysis";

/// Build a short rationale for a runner at the given rank.
///
/// Rule order is fixed; clauses past the third are dropped. A runner matching
/// no rule gets a default text. Missing optional signals are treated as
/// neutral (0.5) and trigger none of the form/affinity rules.
pub fn generate_explanation(horse: &HorseSignal, rank: usize, race: &RaceContext) -> String {
    let mut clauses: Vec<String> = Vec::new();

    // 1. Rank tier
    if rank == 1 {
        clauses.push("Race favorite".to_string());
    } else if rank <= 3 {
        clauses.push("Among the favorites".to_string());
    } else if (rank as f64) <= race.competitor_count as f64 / 2.0 {
        clauses.push("Moderate chances".to_string());
    } else {
        clauses.push("Outsider".to_string());
    }

    // 2. Recent form
    let recent_form = horse.recent_form.unwrap_or(0.5);
    if recent_form > 0.7 {
        clauses.push("Excellent recent form".to_string());
    } else if recent_form < 0.3 {
        clauses.push("Disappointing recent form".to_string());
    }

    // 3. Terrain affinity
    let terrain_affinity = horse.terrain_affinity.unwrap_or(0.5);
    if terrain_affinity > 0.7 {
        clauses.push(format!("Very comfortable on {}", race.terrain.as_str()));
    } else if terrain_affinity < 0.3 {
        clauses.push(format!("Struggles on {}", race.terrain.as_str()));
    }

    // 4. Jockey. Fires on present signals only; the neutral fallback would
    // spuriously clear the 0.2 threshold.
    if horse.jockey_win_rate.is_some_and(|r| r > 0.2) {
        clauses.push("Strong jockey".to_string());
    }

    // 5. Trainer
    if horse.trainer_win_rate.is_some_and(|r| r > 0.2) {
        clauses.push("Trainer in good form".to_string());
    }

    // 6. Market price
    if let Some(odds) = horse.odds {
        if odds < 3.0 {
            clauses.push("Short market price".to_string());
        } else if odds > 10.0 {
            clauses.push("High price (outsider)".to_string());
        }
    }

    // 7. Fault risk
    if horse.fault_prone {
        clauses.push("Caution: prone to faults".to_string());
    }

    clauses.truncate(MAX_CLAUSES);
    if clauses.is_empty() {
        DEFAULT_EXPLANATION.to_string()
    } else {
        clauses.join(CLAUSE_SEPARATOR)
    }
}
