//! Prediction handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Datelike, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::llm::SuggestionContext;
use crate::models::{CreatePredictionRequest, NewPrediction, Prediction};
use crate::{scoring, AppError, AppResult, AppState};

/// Create a prediction: validate, analyze sentiment, score, suggest, store
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePredictionRequest>,
) -> AppResult<Json<Prediction>> {
    req.validate()?;

    let sentiment = state.advisor.analyze_sentiment(&req.description).await;

    // Ambient inputs are read once here; the engine itself is pure.
    let current_year = Utc::now().year();

    let (success_probability, feature_importance) = {
        let mut rng = rand::thread_rng();
        (
            scoring::success_probability(&req, sentiment.score, current_year, &mut rng),
            scoring::feature_importance(&req, sentiment.score, current_year, &mut rng),
        )
    };

    let improvements = state
        .advisor
        .improvement_suggestions(&SuggestionContext {
            startup_name: &req.startup_name,
            team_size: req.team_size,
            funding_amount: req.funding_amount,
            market_category: &req.market_category,
            description: &req.description,
            success_probability,
            sentiment: sentiment.sentiment,
        })
        .await;

    let prediction = state.store.insert(NewPrediction {
        startup_name: req.startup_name,
        founded_year: req.founded_year,
        team_size: req.team_size,
        market_category: req.market_category,
        location: req.location,
        funding_amount: req.funding_amount,
        description: req.description,
        success_probability,
        sentiment: sentiment.sentiment,
        sentiment_score: sentiment.score,
        feature_importance,
        improvements,
    });

    tracing::info!(
        id = %prediction.id,
        probability = prediction.success_probability,
        "Prediction created"
    );

    Ok(Json(prediction))
}

/// Get a single prediction by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Prediction>> {
    let prediction = state
        .store
        .get(id)
        .ok_or_else(|| AppError::NotFound("Prediction not found".to_string()))?;

    Ok(Json(prediction))
}

/// List all predictions, newest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Prediction>>> {
    Ok(Json(state.store.list()))
}
