//! API route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::config::{AppConfig, EvaluationWeights};
use crate::evaluator::{evaluate_race, EvalError};
use crate::insight::generate_expert_insight;
use crate::performance::compute_performance_score;
use crate::smart_money::detect_smart_money_alerts;
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, ErrorResponse, EvaluateRequest, EvaluateResponse,
    HealthResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub config: AppConfig,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }
}

impl From<EvalError> for ApiError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::InvalidInput(msg) => ApiError::bad_request(msg),
            EvalError::DataUnavailable(msg) => ApiError::not_found(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Current scoring weights.
pub async fn weights(State(state): State<Arc<AppState>>) -> Json<EvaluationWeights> {
    Json(state.config.weights.clone())
}

/// Probability evaluation endpoint.
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let evaluations = evaluate_race(&req.race, &req.horses, &state.config.weights)?;

    tracing::info!(
        runners = evaluations.len(),
        "race evaluated, favorite: {}",
        evaluations[0].name
    );

    Ok(Json(EvaluateResponse {
        race_id: req.race_id,
        evaluations,
    }))
}

/// Analysis endpoint: performance scores, display top 3, narrative, alerts.
pub async fn analyze(
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    // An empty runner list means upstream produced no structured data;
    // surface that explicitly rather than returning an empty success.
    if req.horses.is_empty() {
        return Err(EvalError::DataUnavailable(format!(
            "no runner records for race {}",
            req.race.name
        ))
        .into());
    }

    let mut horses = req.horses;
    for horse in &mut horses {
        horse.performance_score = compute_performance_score(horse, req.race.surface);
    }
    horses.sort_by(|a, b| b.performance_score.partial_cmp(&a.performance_score).unwrap());

    let expert_insight = generate_expert_insight(&req.race, &horses);
    let smart_money_alerts = detect_smart_money_alerts(&horses);
    let top3: Vec<_> = horses.iter().take(3).cloned().collect();

    tracing::info!(
        runners = horses.len(),
        alerts = smart_money_alerts.len(),
        "race analyzed"
    );

    Ok(Json(AnalyzeResponse {
        race: req.race,
        horses,
        top3,
        expert_insight,
        smart_money_alerts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HorseRecord, RaceContext, RaceMeta, Surface};

    fn race_meta() -> RaceMeta {
        RaceMeta {
            course_id: Some("R1C3".to_string()),
            name: "Prix des Sablons".to_string(),
            track: "Deauville".to_string(),
            surface: Surface::Synthetic,
            date: None,
        }
    }

    fn record(name: &str, number: u32, musique: &str) -> HorseRecord {
        HorseRecord {
            id: format!("h{}", number),
            number,
            name: name.to_string(),
            musique: Some(musique.to_string()),
            weight: 57.0,
            odds: None,
            initial_odds: None,
            synthetic_apt: true,
            forum_insight: None,
            performance_score: 0.0,
        }
    }

    #[test]
    fn test_eval_error_status_mapping() {
        let err: ApiError = EvalError::InvalidInput("no runners".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: ApiError = EvalError::DataUnavailable("no records".to_string()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_evaluate_empty_horses_bad_request() {
        let state = State(Arc::new(AppState {
            config: AppConfig::default(),
        }));
        let req = EvaluateRequest {
            race_id: None,
            race: RaceContext {
                competitor_count: 8,
                terrain: Surface::Turf,
                distance: 2100.0,
                discipline: "flat".to_string(),
            },
            horses: Vec::new(),
        };

        let err = evaluate(state, Json(req)).await.err().unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_empty_horses_not_found() {
        let req = AnalyzeRequest {
            race: race_meta(),
            horses: Vec::new(),
        };

        let err = analyze(Json(req)).await.err().unwrap();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.message.contains("Prix des Sablons"));
    }

    #[tokio::test]
    async fn test_analyze_scores_and_sorts() {
        let req = AnalyzeRequest {
            race: race_meta(),
            // Weaker recent record first; analyze must reorder by score.
            horses: vec![record("Slow", 1, "5-5-5"), record("Quick", 2, "1-1-1")],
        };

        let Json(resp) = analyze(Json(req)).await.unwrap();
        assert_eq!(resp.horses[0].name, "Quick");
        assert!(resp.horses[0].performance_score > resp.horses[1].performance_score);
        assert_eq!(resp.top3.len(), 2);
        assert!(resp.expert_insight.contains("Top pick: Quick (#2)"));
    }
}
