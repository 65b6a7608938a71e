//! In-memory prediction store
//!
//! Keeps every prediction for the lifetime of the process. There is no
//! durability requirement, so a map behind an RwLock is the whole store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::{NewPrediction, Prediction};

/// Thread-safe in-memory store, cheap to clone into handlers
#[derive(Clone, Default)]
pub struct MemoryStore {
    predictions: Arc<RwLock<HashMap<Uuid, Prediction>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, assigning its id and creation timestamp
    pub fn insert(&self, new: NewPrediction) -> Prediction {
        let prediction = Prediction {
            id: Uuid::new_v4(),
            startup_name: new.startup_name,
            founded_year: new.founded_year,
            team_size: new.team_size,
            market_category: new.market_category,
            location: new.location,
            funding_amount: new.funding_amount,
            description: new.description,
            success_probability: new.success_probability,
            sentiment: new.sentiment,
            sentiment_score: new.sentiment_score,
            feature_importance: new.feature_importance,
            improvements: new.improvements,
            created_at: Utc::now(),
        };

        self.predictions
            .write()
            .insert(prediction.id, prediction.clone());

        prediction
    }

    pub fn get(&self, id: Uuid) -> Option<Prediction> {
        self.predictions.read().get(&id).cloned()
    }

    /// All predictions, newest first
    pub fn list(&self) -> Vec<Prediction> {
        let mut all: Vec<Prediction> = self.predictions.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }
}
