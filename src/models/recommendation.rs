use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Platform;

/// Example post for a platform: hook, caption, call to action and hashtags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTemplate {
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Per-strategy scores behind a composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub audience: f64,
    pub budget: f64,
    pub effort: f64,
    #[serde(rename = "return")]
    pub return_potential: f64,
}

/// A single ranked platform recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1-based, dense
    pub rank: u32,
    pub platform: Platform,
    pub score: f64,
    /// Filled in by content generation; empty when produced by the engine alone
    #[serde(default)]
    pub reasoning: String,
    /// Only ever present on the top recommendation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_template: Option<ContentTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
}

/// Ordered output of the recommendation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub recommendations: Vec<Recommendation>,
    /// Set only when no platform survived filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl RankedResult {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// The rank-1 recommendation, if any
    pub fn top(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.recommendations.iter().map(|r| r.platform).collect()
    }
}

/// Complete consultation returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationResult {
    pub recommendations: Vec<Recommendation>,
    pub strategic_advice: String,
    pub risks: Vec<String>,
    pub persona: String,
    /// Identifier of the stored history record, when persistence succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_template_omitted_when_absent() {
        let rec = Recommendation {
            rank: 2,
            platform: Platform::Facebook,
            score: 0.8,
            reasoning: String::new(),
            content_template: None,
            score_breakdown: None,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("content_template").is_none());
        assert_eq!(json["platform"], "Facebook");
    }

    #[test]
    fn test_score_breakdown_uses_return_key() {
        let breakdown = ScoreBreakdown {
            audience: 1.0,
            budget: 1.0,
            effort: 0.9,
            return_potential: 0.7,
        };
        let json = serde_json::to_value(breakdown).unwrap();
        assert_eq!(json["return"], 0.7);
    }
}
