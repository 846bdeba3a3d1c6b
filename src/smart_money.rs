//! Smart-money anomaly detection.
//!
//! Flags runners where forum sentiment or market movement diverges sharply
//! from baseline, suggesting informed activity.

use crate::insight::odds_variation_pct;
use crate::types::{Alert, AlertGroup, AlertKind, HorseRecord, HorseRef, Sentiment, Severity};

/// Sentiment score above which a very-positive consensus raises an alert.
const SENTIMENT_ALERT_SCORE: f64 = 85.0;

/// Odds shortening (percent) for a high-severity alert.
const ODDS_DROP_HIGH_PCT: f64 = 10.0;

/// Odds shortening (percent) for a medium-severity alert.
const ODDS_DROP_MEDIUM_PCT: f64 = 5.0;

/// Evaluate the smart-money rules for every runner.
///
/// Each rule is independent. A runner triggering no rule produces no entry;
/// a runner triggering one or more rules produces a single group with all
/// triggered alerts.
pub fn detect_smart_money_alerts(horses: &[HorseRecord]) -> Vec<AlertGroup> {
    let mut groups = Vec::new();

    for horse in horses {
        let mut alerts = Vec::new();

        if let Some(forum) = &horse.forum_insight {
            if forum.sentiment == Sentiment::VeryPositive
                && forum.sentiment_score > SENTIMENT_ALERT_SCORE
            {
                alerts.push(Alert {
                    kind: AlertKind::Sentiment,
                    severity: Severity::High,
                    message: format!(
                        "Very positive forum sentiment ({} points) across {} comments",
                        forum.sentiment_score, forum.comment_count
                    ),
                });
            }
        }

        if let Some(variation) = odds_variation_pct(horse.initial_odds, horse.odds) {
            if variation > ODDS_DROP_HIGH_PCT {
                alerts.push(Alert {
                    kind: AlertKind::Odds,
                    severity: Severity::High,
                    message: format!(
                        "Sharp odds drop: {:.1}% ({:.2} -> {:.2})",
                        variation,
                        horse.initial_odds.unwrap_or_default(),
                        horse.odds.unwrap_or_default()
                    ),
                });
            } else if variation > ODDS_DROP_MEDIUM_PCT {
                alerts.push(Alert {
                    kind: AlertKind::Odds,
                    severity: Severity::Medium,
                    message: format!("Moderate odds drop: {:.1}%", variation),
                });
            }
        }

        if !alerts.is_empty() {
            groups.push(AlertGroup {
                horse: HorseRef {
                    number: horse.number,
                    name: horse.name.clone(),
                },
                alerts,
            });
        }
    }

    groups
}
