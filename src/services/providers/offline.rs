//! Canned text generation used when no LLM API key is configured.

use crate::{
    error::AppResult,
    services::{prompts::markers, providers::LlmClient},
};

#[derive(Debug, Clone, Default)]
pub struct OfflineClient;

impl OfflineClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl LlmClient for OfflineClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let response = if prompt.contains(markers::CONTENT_TEMPLATE) {
            r##"{
  "hook": "New week, new favourites!",
  "caption": "Here is a quick look at what we have been working on. Tell us what you think in the comments.",
  "cta": "Visit our page to learn more!",
  "hashtags": ["#smallbusiness", "#shoplocal", "#bizflow"]
}"##
            .to_string()
        } else if prompt.contains(markers::PERSONA) {
            "A busy local customer who values convenience and trusts recommendations from friends."
                .to_string()
        } else if prompt.contains(markers::REASONING) {
            "This platform reaches the audience you are targeting and fits the time and budget \
             you have available, which makes it a practical place to start."
                .to_string()
        } else if prompt.contains(markers::RISKS) {
            "1. Posting inconsistently reduces reach\n2. Algorithm changes can cut organic visibility\n3. Negative reviews or comments need quick responses"
                .to_string()
        } else if prompt.contains(markers::STRATEGY) {
            "Post three times this week and reply to every comment within a day. \
             Track which post drives the most enquiries and repeat its format."
                .to_string()
        } else {
            format!("Offline response for prompt: {}", prompt)
        };

        Ok(response)
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessProfile, BusinessType, ContentTemplate, MarketingGoal, Platform};
    use crate::services::prompts;

    fn business() -> BusinessProfile {
        BusinessProfile {
            business_type: BusinessType::Retail,
            description: "Vintage clothing".to_string(),
            location: "online".to_string(),
            budget: 40.0,
            channels: vec![],
            goal: MarketingGoal::Awareness,
        }
    }

    #[tokio::test]
    async fn test_content_template_response_is_valid_json() {
        let client = OfflineClient::new();
        let prompt = prompts::content_template(&business(), Platform::Instagram, None);
        let text = client.generate(&prompt).await.unwrap();
        let template: ContentTemplate = serde_json::from_str(&text).unwrap();
        assert!(!template.hook.is_empty());
        assert_eq!(template.hashtags.len(), 3);
    }

    #[tokio::test]
    async fn test_risks_response_has_one_risk_per_line() {
        let client = OfflineClient::new();
        let text = client.generate(&prompts::risks(Platform::TikTok)).await.unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_unknown_prompt_echoes() {
        let client = OfflineClient::new();
        let text = client.generate("hello").await.unwrap();
        assert_eq!(text, "Offline response for prompt: hello");
    }
}
