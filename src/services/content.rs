//! Text that accompanies a ranked result: per-platform reasoning, a ready-to-post
//! content template, risks, a strategic next step and a customer persona.
//!
//! Every operation degrades to a fixed fallback when generation fails, so the
//! caller always gets a complete consultation.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{BusinessProfile, ContentTemplate, Platform},
    services::{
        prompts,
        providers::{generate_logged, LlmClient},
    },
};

/// Cache TTL for generated reasoning (1 day)
pub const REASONING_CACHE_TTL: u64 = 86_400;

pub const FALLBACK_STRATEGY: &str =
    "Start with one consistent post each week on your top platform and review what gets responses after a month.";
pub const FALLBACK_PERSONA: &str = "Persona unavailable";
pub const FALLBACK_RISK: &str = "AI unavailable";

/// Template used when neither the store nor the model can provide one
pub fn fallback_template() -> ContentTemplate {
    ContentTemplate {
        hook: "Generated automatically".to_string(),
        caption: "Fallback content template".to_string(),
        cta: "CTA coming soon".to_string(),
        hashtags: vec!["#agent".to_string()],
    }
}

fn fallback_reasoning(business: &BusinessProfile, platform: Platform) -> String {
    format!(
        "Fallback reasoning for {} based on business: {}",
        platform, business.description
    )
}

#[derive(Clone)]
pub struct ContentGenerator {
    client: Arc<dyn LlmClient>,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl ContentGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            cache: None,
            cache_ttl: REASONING_CACHE_TTL,
        }
    }

    /// Enables Redis caching of reasoning and risks
    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    /// Explains why each platform was recommended
    ///
    /// Platforms are explained concurrently. A failure for one platform only
    /// replaces that platform's text with a fallback sentence.
    pub async fn explain_recommendations(
        &self,
        business: &BusinessProfile,
        platforms: &[Platform],
    ) -> HashMap<Platform, String> {
        let explanations = join_all(platforms.iter().map(|&platform| async move {
            let text = match self.reasoning(business, platform).await {
                Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
                Ok(_) => {
                    warn!(%platform, "Empty reasoning returned, using fallback");
                    fallback_reasoning(business, platform)
                }
                Err(e) => {
                    warn!(%platform, error = %e, "Reasoning generation failed, using fallback");
                    fallback_reasoning(business, platform)
                }
            };
            (platform, text)
        }))
        .await;

        explanations.into_iter().collect()
    }

    async fn reasoning(&self, business: &BusinessProfile, platform: Platform) -> AppResult<String> {
        let prompt = prompts::reasoning(business, platform);
        let key = CacheKey::Reasoning {
            platform,
            business_type: business.business_type,
            goal: business.goal,
        };
        self.cached_or_direct(key, "reasoning", &prompt).await
    }

    /// Generates through the cache when one is configured
    ///
    /// A cache failure falls through to direct generation.
    async fn cached_or_direct(
        &self,
        key: CacheKey,
        purpose: &'static str,
        prompt: &str,
    ) -> AppResult<String> {
        let Some(cache) = &self.cache else {
            return generate_logged(self.client.as_ref(), purpose, prompt).await;
        };

        match self.cached_generate(cache, key, purpose, prompt).await {
            Err(AppError::Cache(e)) => {
                warn!(purpose, error = %e, "Cache unavailable, generating directly");
                generate_logged(self.client.as_ref(), purpose, prompt).await
            }
            other => other,
        }
    }

    async fn cached_generate(
        &self,
        cache: &Cache,
        key: CacheKey,
        purpose: &'static str,
        prompt: &str,
    ) -> AppResult<String> {
        cached!(
            cache,
            key,
            self.cache_ttl,
            generate_logged(self.client.as_ref(), purpose, prompt)
        )
    }

    /// Generates a post template for `platform`
    ///
    /// The model is asked for JSON. When the reply can't be parsed the seed
    /// template is returned, or the fixed fallback if there is no seed.
    pub async fn generate_content_template(
        &self,
        business: &BusinessProfile,
        platform: Platform,
        seed: Option<&ContentTemplate>,
    ) -> ContentTemplate {
        let prompt = prompts::content_template(business, platform, seed);
        let parsed = generate_logged(self.client.as_ref(), "content_template", &prompt)
            .await
            .and_then(|text| parse_template(&text));

        match parsed {
            Ok(template) => template,
            Err(e) => {
                warn!(%platform, error = %e, "Content template generation failed, using fallback");
                seed.cloned().unwrap_or_else(fallback_template)
            }
        }
    }

    /// Lists the main risks of relying on `platform`
    pub async fn assess_risks(&self, platform: Platform) -> Vec<String> {
        let prompt = prompts::risks(platform);
        let generated = self
            .cached_or_direct(CacheKey::Risks(platform), "risks", &prompt)
            .await;

        let risks = match generated {
            Ok(text) => parse_risks(&text),
            Err(e) => {
                warn!(%platform, error = %e, "Risk assessment failed, using fallback");
                Vec::new()
            }
        };

        if risks.is_empty() {
            vec![FALLBACK_RISK.to_string()]
        } else {
            risks
        }
    }

    /// One actionable next step for the top platform
    pub async fn generate_strategy(
        &self,
        business: &BusinessProfile,
        platform: Platform,
    ) -> String {
        let prompt = prompts::strategy(business, platform);
        non_empty_or(
            generate_logged(self.client.as_ref(), "strategy", &prompt).await,
            FALLBACK_STRATEGY,
        )
    }

    pub async fn infer_persona(&self, business: &BusinessProfile) -> String {
        let prompt = prompts::persona(business);
        non_empty_or(
            generate_logged(self.client.as_ref(), "persona", &prompt).await,
            FALLBACK_PERSONA,
        )
    }
}

fn non_empty_or(generated: AppResult<String>, fallback: &str) -> String {
    match generated {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => fallback.to_string(),
        Err(e) => {
            debug!(error = %e, "Using fallback text");
            fallback.to_string()
        }
    }
}

/// Parses a model reply into a template, tolerating Markdown code fences
fn parse_template(text: &str) -> AppResult<ContentTemplate> {
    let body = strip_code_fence(text);
    let template: ContentTemplate = serde_json::from_str(body)
        .map_err(|e| AppError::ExternalApi(format!("Malformed content template: {}", e)))?;

    if template.hook.trim().is_empty() {
        return Err(AppError::ExternalApi(
            "Content template has an empty hook".to_string(),
        ));
    }
    Ok(template)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// One risk per line, with list markers removed and blank lines dropped
fn parse_risks(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('*').or_else(|| line.strip_prefix('-')) {
        return rest.trim();
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessType, MarketingGoal};
    use crate::services::providers::{MockLlmClient, OfflineClient};

    fn business() -> BusinessProfile {
        BusinessProfile {
            business_type: BusinessType::Retail,
            description: "Handmade candles".to_string(),
            location: "Austin, TX".to_string(),
            budget: 80.0,
            channels: vec![],
            goal: MarketingGoal::Awareness,
        }
    }

    fn generator_returning(text: &'static str) -> ContentGenerator {
        let mut mock = MockLlmClient::new();
        mock.expect_name().return_const("mock");
        mock.expect_generate()
            .returning(move |_| Ok(text.to_string()));
        ContentGenerator::new(Arc::new(mock))
    }

    fn failing_generator() -> ContentGenerator {
        let mut mock = MockLlmClient::new();
        mock.expect_name().return_const("mock");
        mock.expect_generate()
            .returning(|_| Err(AppError::ExternalApi("quota exceeded".to_string())));
        ContentGenerator::new(Arc::new(mock))
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("* Algorithm changes"), "Algorithm changes");
        assert_eq!(strip_list_marker("- Ad costs rise"), "Ad costs rise");
        assert_eq!(strip_list_marker("1. Low reach"), "Low reach");
        assert_eq!(strip_list_marker("12) Burnout"), "Burnout");
        assert_eq!(strip_list_marker("3D printing demand"), "3D printing demand");
    }

    #[test]
    fn test_parse_risks_drops_blank_lines() {
        let risks = parse_risks("1. Low reach\n\n  - Time cost  \n*\n");
        assert_eq!(risks, vec!["Low reach", "Time cost"]);
    }

    #[test]
    fn test_parse_template_with_code_fence() {
        let text = "```json\n{\"hook\":\"Hi\",\"caption\":\"C\",\"cta\":\"Go\",\"hashtags\":[\"#a\"]}\n```";
        let template = parse_template(text).unwrap();
        assert_eq!(template.hook, "Hi");
        assert_eq!(template.hashtags, vec!["#a"]);
    }

    #[test]
    fn test_parse_template_rejects_empty_hook() {
        assert!(parse_template(r#"{"hook":"","caption":"c","cta":"x","hashtags":[]}"#).is_err());
    }

    #[tokio::test]
    async fn test_explain_recommendations_covers_every_platform() {
        let generator = generator_returning("  Great fit.  ");
        let platforms = [Platform::Instagram, Platform::TikTok];

        let explanations = generator
            .explain_recommendations(&business(), &platforms)
            .await;

        assert_eq!(explanations.len(), 2);
        assert_eq!(explanations[&Platform::TikTok], "Great fit.");
    }

    #[tokio::test]
    async fn test_explain_recommendations_falls_back_per_platform() {
        let mut mock = MockLlmClient::new();
        mock.expect_name().return_const("mock");
        mock.expect_generate().returning(|prompt| {
            if prompt.contains("TikTok") {
                Err(AppError::ExternalApi("timeout".to_string()))
            } else {
                Ok("Reaches local shoppers.".to_string())
            }
        });
        let generator = ContentGenerator::new(Arc::new(mock));

        let explanations = generator
            .explain_recommendations(&business(), &[Platform::Facebook, Platform::TikTok])
            .await;

        assert_eq!(explanations[&Platform::Facebook], "Reaches local shoppers.");
        assert_eq!(
            explanations[&Platform::TikTok],
            "Fallback reasoning for TikTok based on business: Handmade candles"
        );
    }

    #[tokio::test]
    async fn test_content_template_falls_back_to_seed() {
        let generator = generator_returning("not json at all");
        let seed = ContentTemplate {
            hook: "Light up your evenings".to_string(),
            caption: "Small batch candles".to_string(),
            cta: "Shop now".to_string(),
            hashtags: vec!["#candles".to_string()],
        };

        let template = generator
            .generate_content_template(&business(), Platform::Instagram, Some(&seed))
            .await;

        assert_eq!(template, seed);
    }

    #[tokio::test]
    async fn test_content_template_falls_back_to_fixed_template() {
        let generator = failing_generator();
        let template = generator
            .generate_content_template(&business(), Platform::Instagram, None)
            .await;
        assert_eq!(template, fallback_template());
    }

    #[tokio::test]
    async fn test_assess_risks_failure_returns_fixed_list() {
        let risks = failing_generator().assess_risks(Platform::Facebook).await;
        assert_eq!(risks, vec![FALLBACK_RISK.to_string()]);
    }

    #[tokio::test]
    async fn test_assess_risks_parses_lines() {
        let generator = generator_returning("- Ad fatigue\n- Rising costs");
        let risks = generator.assess_risks(Platform::Facebook).await;
        assert_eq!(risks, vec!["Ad fatigue", "Rising costs"]);
    }

    #[tokio::test]
    async fn test_strategy_and_persona_fallbacks() {
        let generator = failing_generator();
        let b = business();
        assert_eq!(
            generator.generate_strategy(&b, Platform::Instagram).await,
            FALLBACK_STRATEGY
        );
        assert_eq!(generator.infer_persona(&b).await, FALLBACK_PERSONA);
    }

    fn generator_with_unreachable_cache() -> ContentGenerator {
        let redis = crate::db::create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(redis);
        ContentGenerator::new(Arc::new(OfflineClient::new())).with_cache(cache, 60)
    }

    #[tokio::test]
    async fn test_unreachable_cache_still_generates_risks() {
        let generator = generator_with_unreachable_cache();
        let risks = generator.assess_risks(Platform::Instagram).await;
        assert_eq!(risks.len(), 3);
        assert!(!risks.contains(&FALLBACK_RISK.to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_cache_still_generates_reasoning() {
        let generator = generator_with_unreachable_cache();
        let explanations = generator
            .explain_recommendations(&business(), &[Platform::Instagram])
            .await;
        assert!(!explanations[&Platform::Instagram].starts_with("Fallback reasoning"));
    }

    #[tokio::test]
    async fn test_blank_persona_uses_fallback() {
        let generator = generator_returning("   ");
        assert_eq!(generator.infer_persona(&business()).await, FALLBACK_PERSONA);
    }
}
