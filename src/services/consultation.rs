//! End-to-end consultation: validate, rank, generate and persist.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    db::TemplateStore,
    error::AppResult,
    models::{BusinessProfile, ConsultationResult, ContentTemplate, Platform},
    services::{
        content::{fallback_template, ContentGenerator},
        ranking::{RecommendationEngine, NO_SUITABLE_PLATFORM},
    },
};

#[derive(Clone)]
pub struct ConsultationService {
    engine: Arc<RecommendationEngine>,
    generator: ContentGenerator,
    store: Option<Arc<dyn TemplateStore>>,
}

impl ConsultationService {
    pub fn new(engine: Arc<RecommendationEngine>, generator: ContentGenerator) -> Self {
        Self {
            engine,
            generator,
            store: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn TemplateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn engine(&self) -> &Arc<RecommendationEngine> {
        &self.engine
    }

    /// Produces a full consultation for `profile`
    ///
    /// Only input validation can fail. Generation and store failures are
    /// logged and replaced by fallbacks.
    #[instrument(
        skip(self, profile),
        fields(business_type = %profile.business_type, goal = %profile.goal)
    )]
    pub async fn consult(&self, profile: &BusinessProfile) -> AppResult<ConsultationResult> {
        profile.validate()?;

        let ranked = self.engine.recommend(profile);
        let Some(top) = ranked.top().map(|r| r.platform) else {
            let mut result = ConsultationResult {
                recommendations: vec![],
                strategic_advice: ranked
                    .advisory
                    .unwrap_or_else(|| NO_SUITABLE_PLATFORM.to_string()),
                risks: vec![],
                persona: String::new(),
                consultation_id: None,
            };
            result.consultation_id = self.record(profile, &result).await;
            return Ok(result);
        };

        let seed = self.seed_template(top).await;
        let platforms = ranked.platforms();

        let (explanations, template, risks, strategic_advice, persona) = tokio::join!(
            self.generator.explain_recommendations(profile, &platforms),
            self.generator
                .generate_content_template(profile, top, seed.as_ref()),
            self.generator.assess_risks(top),
            self.generator.generate_strategy(profile, top),
            self.generator.infer_persona(profile),
        );

        if seed.is_none() && template != fallback_template() {
            self.store_template(top, &template).await;
        }

        let mut template = Some(template);
        let recommendations = ranked
            .recommendations
            .into_iter()
            .map(|mut rec| {
                if let Some(text) = explanations.get(&rec.platform) {
                    rec.reasoning = text.clone();
                }
                if rec.rank == 1 {
                    rec.content_template = template.take();
                }
                rec
            })
            .collect();

        let mut result = ConsultationResult {
            recommendations,
            strategic_advice,
            risks,
            persona,
            consultation_id: None,
        };
        result.consultation_id = self.record(profile, &result).await;

        info!(
            top_platform = %top,
            consultation_id = ?result.consultation_id,
            "Consultation complete"
        );
        Ok(result)
    }

    async fn seed_template(&self, platform: Platform) -> Option<ContentTemplate> {
        let store = self.store.as_ref()?;
        match store.fetch_template(platform).await {
            Ok(template) => template,
            Err(e) => {
                warn!(%platform, error = %e, "Failed to fetch stored template");
                None
            }
        }
    }

    async fn store_template(&self, platform: Platform, template: &ContentTemplate) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save_template(platform, template).await {
            warn!(%platform, error = %e, "Failed to save generated template");
        }
    }

    async fn record(
        &self,
        profile: &BusinessProfile,
        result: &ConsultationResult,
    ) -> Option<uuid::Uuid> {
        let store = self.store.as_ref()?;
        store
            .save_consultation(profile, result)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to save consultation history"))
            .ok()
    }
}
