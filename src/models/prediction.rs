//! Prediction model

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Incoming prediction request. Validated before anything else touches it;
/// the scoring engine assumes in-range inputs.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePredictionRequest {
    #[validate(length(min = 1, message = "Startup name is required"))]
    pub startup_name: String,

    #[validate(custom(function = validate_founded_year))]
    pub founded_year: i32,

    #[validate(range(min = 1, max = 10000))]
    pub team_size: i32,

    #[validate(length(min = 1, message = "Market category is required"))]
    pub market_category: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(range(min = 0.0))]
    pub funding_amount: f64,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
}

// The upper bound depends on the wall clock, so it cannot be a plain range rule.
fn validate_founded_year(year: i32) -> Result<(), ValidationError> {
    let current_year = Utc::now().year();
    if !(1900..=current_year).contains(&year) {
        let mut err = ValidationError::new("founded_year");
        err.message = Some("Founded year must be between 1900 and the current year".into());
        return Err(err);
    }
    Ok(())
}

/// Sentiment classification returned by the advisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Map a provider label to a variant. Anything unrecognized is Neutral.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Positive" => Sentiment::Positive,
            "Negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

/// Sentiment analysis of a startup description
#[derive(Debug, Clone, Copy)]
pub struct SentimentAnalysis {
    pub sentiment: Sentiment,
    /// Confidence in [0, 1]
    pub score: f64,
}

impl Default for SentimentAnalysis {
    fn default() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            score: 0.5,
        }
    }
}

/// Relative weight of one input attribute, for display only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub display_name: &'static str,
    pub importance: f64,
}

/// Fields of a prediction record before the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub startup_name: String,
    pub founded_year: i32,
    pub team_size: i32,
    pub market_category: String,
    pub location: String,
    pub funding_amount: f64,
    pub description: String,
    pub success_probability: f64,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub feature_importance: Vec<FeatureImportance>,
    pub improvements: Vec<String>,
}

/// Stored prediction record, returned to clients as-is
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: Uuid,
    pub startup_name: String,
    pub founded_year: i32,
    pub team_size: i32,
    pub market_category: String,
    pub location: String,
    pub funding_amount: f64,
    pub description: String,
    pub success_probability: f64,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub feature_importance: Vec<FeatureImportance>,
    pub improvements: Vec<String>,
    pub created_at: DateTime<Utc>,
}
