use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{BusinessProfile, ConsultationResult, PlatformMetadata, Recommendation},
    services::platform_filter::FilterExplanation,
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    pub filter_explanation: FilterExplanation,
}

/// Unwraps a JSON body, turning malformed input into a 400
fn business_profile(
    payload: Result<Json<BusinessProfile>, JsonRejection>,
) -> AppResult<BusinessProfile> {
    let Json(profile) =
        payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    profile.validate()?;
    Ok(profile)
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// The platform catalog in catalog order
pub async fn list_platforms(State(state): State<AppState>) -> Json<Vec<PlatformMetadata>> {
    Json(state.engine.catalog().iter().cloned().collect())
}

/// Deterministic ranking only, without generated text
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<BusinessProfile>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let profile = business_profile(payload)?;

    let ranked = state.engine.recommend(&profile);
    tracing::info!(
        business_type = %profile.business_type,
        goal = %profile.goal,
        count = ranked.recommendations.len(),
        "Ranked platforms"
    );

    Ok(Json(RecommendationResponse {
        filter_explanation: state.engine.explain_filtering(&profile),
        recommendations: ranked.recommendations,
        advisory: ranked.advisory,
    }))
}

/// Full consultation with reasoning, content template, risks and persona
pub async fn consult(
    State(state): State<AppState>,
    payload: Result<Json<BusinessProfile>, JsonRejection>,
) -> AppResult<Json<ConsultationResult>> {
    let profile = business_profile(payload)?;
    let result = state.consultation.consult(&profile).await?;
    Ok(Json(result))
}
