use std::sync::Arc;

use crate::services::{ConsultationService, RecommendationEngine};

/// Shared application state
///
/// Everything in here is immutable once the server starts, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub consultation: Arc<ConsultationService>,
}

impl AppState {
    pub fn new(consultation: ConsultationService) -> Self {
        Self {
            engine: consultation.engine().clone(),
            consultation: Arc::new(consultation),
        }
    }
}
