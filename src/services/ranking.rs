use std::cmp::Ordering;
use std::sync::Arc;

use crate::models::{BusinessProfile, Platform, RankedResult, Recommendation, ScoreBreakdown};
use crate::services::{
    catalog::Catalog,
    constraints::ConstraintValidator,
    platform_filter::{FilterExplanation, PlatformFilter},
    scoring::{composite_score, score_breakdown},
};

/// Number of platforms returned to the caller
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Returned in place of recommendations when every platform was filtered out
pub const NO_SUITABLE_PLATFORM: &str = "No suitable marketing platforms were found based on your business profile. This might be due to very specific constraints.";

/// A candidate with its composite score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub platform: Platform,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Deterministic filter, score and rank pipeline over the platform catalog
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    validator: ConstraintValidator,
    filter: PlatformFilter,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Catalog::shared())
    }
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_validator(ConstraintValidator::new(catalog))
    }

    pub fn with_validator(validator: ConstraintValidator) -> Self {
        let catalog = validator.shared_catalog();
        Self {
            filter: PlatformFilter::new(catalog.clone()),
            catalog,
            validator,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn explain_filtering(&self, business: &BusinessProfile) -> FilterExplanation {
        self.filter.explain(business)
    }

    /// Runs every scoring strategy over each candidate, preserving input order
    pub fn score_candidates(
        &self,
        business: &BusinessProfile,
        candidates: &[Platform],
    ) -> Vec<ScoredCandidate> {
        candidates
            .iter()
            .map(|&platform| {
                let breakdown = score_breakdown(&self.validator, business, platform);
                ScoredCandidate {
                    platform,
                    score: composite_score(&breakdown),
                    breakdown,
                }
            })
            .collect()
    }

    /// Sorts by score descending, breaking ties by catalog order, and keeps the top entries
    pub fn rank(&self, mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.tie_break_key(a.platform).cmp(&self.tie_break_key(b.platform)))
        });
        scored.truncate(MAX_RECOMMENDATIONS);
        scored
    }

    fn tie_break_key(&self, platform: Platform) -> usize {
        self.catalog.position(platform).unwrap_or(usize::MAX)
    }

    /// Filters, scores and ranks platforms for a validated business profile
    pub fn recommend(&self, business: &BusinessProfile) -> RankedResult {
        let candidates = self.filter.apply_all_filters(business);

        if candidates.is_empty() {
            tracing::info!(
                business_type = %business.business_type,
                budget = business.budget,
                "No platform survived filtering"
            );
            return RankedResult {
                recommendations: vec![],
                advisory: Some(NO_SUITABLE_PLATFORM.to_string()),
            };
        }

        let ranked = self.rank(self.score_candidates(business, &candidates));

        let recommendations = ranked
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| Recommendation {
                rank: index as u32 + 1,
                platform: candidate.platform,
                score: candidate.score,
                reasoning: String::new(),
                content_template: None,
                score_breakdown: Some(candidate.breakdown),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            candidates = candidates.len(),
            top = ?recommendations.first().map(|r| r.platform),
            "Ranking completed"
        );

        RankedResult {
            recommendations,
            advisory: None,
        }
    }
}
