//! Advisor client
//!
//! HTTP client for an OpenAI-compatible chat API. It supplies two things:
//! sentiment analysis of the startup description and a short list of
//! improvement suggestions. Both calls absorb every failure into a fixed
//! fallback, so the API never blocks a prediction.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::models::{Sentiment, SentimentAnalysis};

const SENTIMENT_SYSTEM_PROMPT: &str = "You are a sentiment analysis expert. \
    Analyze the sentiment of startup descriptions. Provide a sentiment \
    classification (Positive, Neutral, or Negative) and a confidence score \
    between 0 and 1. Respond with JSON in this format: \
    { \"sentiment\": string, \"score\": number }";

const SUGGESTIONS_SYSTEM_PROMPT: &str =
    "You are a startup business consultant providing actionable advice.";

const FALLBACK_IMPROVEMENTS: [&str; 4] = [
    "Focus on customer acquisition and retention strategies to build a sustainable user base",
    "Optimize your product-market fit through continuous user feedback and iteration",
    "Build strategic partnerships to accelerate growth and expand market reach",
    "Develop scalable business processes to support rapid growth efficiently",
];

/// Suggestions returned when the advisor is unreachable or misbehaves
pub fn fallback_improvements() -> Vec<String> {
    FALLBACK_IMPROVEMENTS.iter().map(|s| s.to_string()).collect()
}

/// Advisor client errors. These never cross the HTTP boundary; every
/// public method converts them into a fallback value.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("no API key configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("advisor returned status {0}")]
    BadStatus(u16),
    #[error("advisor returned no choices")]
    EmptyCompletion,
    #[error("malformed advisor payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Inputs for the improvement-suggestions prompt
pub struct SuggestionContext<'a> {
    pub startup_name: &'a str,
    pub team_size: i32,
    pub funding_amount: f64,
    pub market_category: &'a str,
    pub description: &'a str,
    pub success_probability: f64,
    pub sentiment: Sentiment,
}

/// Chat API client
pub struct AdvisorClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

// Wire types for the chat completions endpoint

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Deserialize)]
struct SentimentPayload {
    sentiment: Option<String>,
    score: Option<f64>,
}

#[derive(Deserialize)]
struct SuggestionsPayload {
    #[serde(default)]
    suggestions: Vec<String>,
}

impl AdvisorClient {
    /// Create a new advisor client from configuration
    pub fn new(config: &Config) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.openai_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }

    /// Analyze the sentiment of a startup description.
    /// Falls back to Neutral / 0.5 on any failure.
    pub async fn analyze_sentiment(&self, description: &str) -> SentimentAnalysis {
        match self.request_sentiment(description).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Sentiment analysis failed, using fallback: {}", e);
                SentimentAnalysis::default()
            }
        }
    }

    async fn request_sentiment(&self, description: &str) -> Result<SentimentAnalysis, AdvisorError> {
        let content = self.chat(SENTIMENT_SYSTEM_PROMPT, description).await?;
        let payload: SentimentPayload = serde_json::from_str(&content)?;

        Ok(SentimentAnalysis {
            sentiment: payload
                .sentiment
                .as_deref()
                .map(Sentiment::from_label)
                .unwrap_or(Sentiment::Neutral),
            score: payload.score.unwrap_or(0.5).clamp(0.0, 1.0),
        })
    }

    /// Generate 4-6 actionable improvement suggestions.
    /// Falls back to a fixed list on any failure.
    pub async fn improvement_suggestions(&self, ctx: &SuggestionContext<'_>) -> Vec<String> {
        match self.request_suggestions(ctx).await {
            Ok(suggestions) if !suggestions.is_empty() => suggestions,
            Ok(_) => fallback_improvements(),
            Err(e) => {
                tracing::warn!("Improvement suggestions failed, using fallback: {}", e);
                fallback_improvements()
            }
        }
    }

    async fn request_suggestions(
        &self,
        ctx: &SuggestionContext<'_>,
    ) -> Result<Vec<String>, AdvisorError> {
        let prompt = format!(
            "You are a startup consultant AI. Based on the following startup data, \
             provide 4-6 specific, actionable improvement suggestions to increase \
             their success probability. Be concise and practical.\n\n\
             Startup: {}\n\
             Team Size: {}\n\
             Funding: ${:.2}M\n\
             Market Category: {}\n\
             Current Success Probability: {}%\n\
             Description Sentiment: {}\n\
             Description: {}\n\n\
             Respond with JSON in this format: {{ \"suggestions\": [\"suggestion 1\", \"suggestion 2\", ...] }}",
            ctx.startup_name,
            ctx.team_size,
            ctx.funding_amount / 1_000_000.0,
            ctx.market_category,
            ctx.success_probability.round(),
            ctx.sentiment.as_str(),
            ctx.description,
        );

        let content = self.chat(SUGGESTIONS_SYSTEM_PROMPT, &prompt).await?;
        let payload: SuggestionsPayload = serde_json::from_str(&content)?;
        Ok(payload.suggestions)
    }

    /// Single JSON-mode chat round trip, returning the assistant content
    async fn chat(&self, system: &str, user: &str) -> Result<String, AdvisorError> {
        let api_key = self.api_key.as_ref().ok_or(AdvisorError::NotConfigured)?;
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                format: "json_object",
            },
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdvisorError::BadStatus(response.status().as_u16()));
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AdvisorError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless_client() -> AdvisorClient {
        let config = Config {
            port: 0,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_timeout_seconds: 1,
            environment: "test".to_string(),
        };
        AdvisorClient::new(&config)
    }

    #[tokio::test]
    async fn test_keyless_sentiment_falls_back() {
        let client = keyless_client();
        let analysis = client.analyze_sentiment("A promising startup").await;
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.score, 0.5);
    }

    #[tokio::test]
    async fn test_keyless_suggestions_fall_back() {
        let client = keyless_client();
        let ctx = SuggestionContext {
            startup_name: "Acme",
            team_size: 5,
            funding_amount: 100_000.0,
            market_category: "SaaS",
            description: "A SaaS product",
            success_probability: 40.0,
            sentiment: Sentiment::Neutral,
        };
        let suggestions = client.improvement_suggestions(&ctx).await;
        assert_eq!(suggestions, fallback_improvements());
    }

    #[test]
    fn test_sentiment_payload_clamps_score() {
        let payload: SentimentPayload =
            serde_json::from_str(r#"{"sentiment": "Positive", "score": 1.7}"#).unwrap();
        let score = payload.score.unwrap_or(0.5).clamp(0.0, 1.0);
        assert_eq!(score, 1.0);
    }
}
