//! Expert-insight narrative built from race and runner aggregates.

use crate::types::{HorseRecord, RaceMeta, Sentiment, Surface};

/// Relative odds move (in percent) worth mentioning in the narrative.
const NOTABLE_ODDS_MOVE_PCT: f64 = 5.0;

/// Relative odds change in percent, positive when the price shortened.
///
/// Returns `None` unless both prices are present and the opening price is
/// positive.
pub fn odds_variation_pct(initial: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (initial, current) {
        (Some(i), Some(c)) if i > 0.0 => Some((i - c) / i * 100.0),
        _ => None,
    }
}

/// Assemble the narrative for a race.
///
/// `horses` must already be sorted by descending performance score; the
/// first entry is presented as the top pick.
pub fn generate_expert_insight(race: &RaceMeta, horses: &[HorseRecord]) -> String {
    let mut insight = format!("Analysis of {} at {}.\n\n", race.name, race.track);

    match race.surface {
        Surface::Synthetic => {
            insight.push_str(
                "Synthetic surface: runners with proven all-weather aptitude hold the edge. ",
            );
            let apt_count = horses.iter().filter(|h| h.synthetic_apt).count();
            if apt_count > 0 {
                insight.push_str(&format!(
                    "{} runner(s) have confirmed aptitude on this surface.\n\n",
                    apt_count
                ));
            }
        }
        Surface::Turf => {
            insight.push_str(
                "Turf surface: classic conditions, no runner gains a surface edge.\n\n",
            );
        }
    }

    if let Some(top) = horses.first() {
        insight.push_str(&format!(
            "Top pick: {} (#{}) with a performance score of {} points. ",
            top.name, top.number, top.performance_score
        ));
        if let Some(musique) = &top.musique {
            insight.push_str(&format!("Recent record {} is promising. ", musique));
        }
        if let Some(forum) = &top.forum_insight {
            if forum.sentiment.is_positive() {
                let label = if forum.sentiment == Sentiment::VeryPositive {
                    "very positive"
                } else {
                    "positive"
                };
                insight.push_str(&format!(
                    "Forum sentiment is {} across {} analysed comments.",
                    label, forum.comment_count
                ));
            }
        }
    }

    let movers: Vec<(&HorseRecord, f64)> = horses
        .iter()
        .filter_map(|h| {
            odds_variation_pct(h.initial_odds, h.odds)
                .filter(|v| v.abs() > NOTABLE_ODDS_MOVE_PCT)
                .map(|v| (h, v))
        })
        .collect();

    if !movers.is_empty() {
        insight.push_str("\n\nNotable market moves: ");
        for (horse, variation) in movers {
            // Positive variation means the price came in (money arrived).
            let direction = if variation > 0.0 { "shortening" } else { "drifting" };
            insight.push_str(&format!(
                "{} (#{}) {} by {:.1}%. ",
                horse.name,
                horse.number,
                direction,
                variation.abs()
            ));
        }
    }

    insight
}
