//! Request, response and domain types for the Turf API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Race surface type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// All-weather fibre-sand track.
    Synthetic,
    Turf,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Synthetic => "synthetic",
            Surface::Turf => "turf",
        }
    }
}

/// Forum sentiment category extracted upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl Sentiment {
    pub fn is_positive(&self) -> bool {
        matches!(self, Sentiment::VeryPositive | Sentiment::Positive)
    }
}

/// Race-level context for one evaluation call.
#[derive(Debug, Clone, Deserialize)]
pub struct RaceContext {
    /// Number of declared runners. Must be positive.
    pub competitor_count: usize,
    pub terrain: Surface,
    /// Race distance in metres. 0 means unknown.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub discipline: String,
}

/// Per-runner input signals for the probability model.
///
/// Optional [0,1] signals that are absent default to a neutral 0.5 at scoring
/// time rather than erroring; a missing market price maps to a neutral implied
/// probability. The model degrades gracefully with partial information.
#[derive(Debug, Clone, Deserialize)]
pub struct HorseSignal {
    pub id: String,
    pub name: String,
    /// Saddle cloth number.
    pub number: u32,
    pub recent_form: Option<f64>,
    pub terrain_affinity: Option<f64>,
    pub distance_affinity: Option<f64>,
    pub jockey_win_rate: Option<f64>,
    pub trainer_win_rate: Option<f64>,
    /// Decimal market odds, e.g. 3.5.
    pub odds: Option<f64>,
    #[serde(default)]
    pub fault_prone: bool,
    /// 0 = rarely at fault, 1 = very often. Defaults to 0.5 when unset.
    pub fault_frequency: Option<f64>,
}

/// Aggregated forum sentiment for one runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumInsight {
    pub sentiment: Sentiment,
    /// Score in [-100, 100].
    pub sentiment_score: f64,
    pub comment_count: u32,
}

/// One runner's evaluation: rank, probabilities and rationale.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub id: String,
    pub name: String,
    pub number: u32,
    /// Dense rank, 1 = favorite.
    pub rank: usize,
    pub prob_win: f64,
    pub prob_top3: f64,
    pub prob_finish: f64,
    pub explanation: String,
    /// Raw weighted score before the softmax transform.
    pub score: f64,
}

/// Race metadata for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    pub name: String,
    /// Racecourse name.
    pub track: String,
    pub surface: Surface,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Structured runner record consumed by the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorseRecord {
    pub id: String,
    pub number: u32,
    pub name: String,
    /// Compact recent-finishes string, e.g. "1-2-3". Non-numeric tokens
    /// (retirements, disqualifications) are skipped when parsing.
    pub musique: Option<String>,
    /// Carried weight in kg.
    pub weight: f64,
    /// Current decimal odds.
    pub odds: Option<f64>,
    /// Opening decimal odds.
    pub initial_odds: Option<f64>,
    /// Known aptitude for synthetic (fibre-sand) tracks.
    #[serde(default)]
    pub synthetic_apt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_insight: Option<ForumInsight>,
    /// Filled in by the analysis pipeline.
    #[serde(default)]
    pub performance_score: f64,
}

/// Minimal runner reference used in alerts.
#[derive(Debug, Clone, Serialize)]
pub struct HorseRef {
    pub number: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Sentiment,
    Odds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// One triggered smart-money rule.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
}

/// All alerts triggered for one runner.
#[derive(Debug, Clone, Serialize)]
pub struct AlertGroup {
    pub horse: HorseRef,
    pub alerts: Vec<Alert>,
}

/// Evaluation request body.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub race_id: Option<String>,
    pub race: RaceContext,
    pub horses: Vec<HorseSignal>,
}

/// Evaluation response.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_id: Option<String>,
    pub evaluations: Vec<EvaluationResult>,
}

/// Analysis request body.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub race: RaceMeta,
    pub horses: Vec<HorseRecord>,
}

/// Analysis response: scored runners, display top 3, narrative and alerts.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub race: RaceMeta,
    pub horses: Vec<HorseRecord>,
    pub top3: Vec<HorseRecord>,
    pub expert_insight: String,
    pub smart_money_alerts: Vec<AlertGroup>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
