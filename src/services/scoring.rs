//! Scoring strategies for filtered candidates.
//!
//! The set of strategies is closed: [`ScoringStrategy::ALL`] is the registry
//! the ranking orchestrator iterates. Every strategy is stateless and returns
//! a score in `0.0..=1.0`.

use serde::Serialize;

use crate::models::{BusinessProfile, MarketingGoal, Platform, ScoreBreakdown};
use crate::services::constraints::ConstraintValidator;

/// Score given when the platform's audience does not match the business type.
/// Non-zero so that scoring alone never eliminates a candidate.
const POOR_AUDIENCE_FIT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    Audience,
    Budget,
    Effort,
    Return,
}

impl ScoringStrategy {
    pub const ALL: [ScoringStrategy; 4] = [
        ScoringStrategy::Audience,
        ScoringStrategy::Budget,
        ScoringStrategy::Effort,
        ScoringStrategy::Return,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScoringStrategy::Audience => "audience",
            ScoringStrategy::Budget => "budget",
            ScoringStrategy::Effort => "effort",
            ScoringStrategy::Return => "return",
        }
    }

    pub fn score(
        &self,
        validator: &ConstraintValidator,
        business: &BusinessProfile,
        platform: Platform,
    ) -> f64 {
        match self {
            ScoringStrategy::Audience => audience_score(validator, business, platform),
            ScoringStrategy::Budget => {
                invert(validator.validate_budget(business.budget, platform).penalty)
            }
            ScoringStrategy::Effort => {
                invert(validator.validate_effort(business, platform).penalty)
            }
            ScoringStrategy::Return => return_score(validator, business, platform),
        }
    }
}

fn invert(penalty: f64) -> f64 {
    (1.0 - penalty).max(0.0)
}

fn audience_score(
    validator: &ConstraintValidator,
    business: &BusinessProfile,
    platform: Platform,
) -> f64 {
    match validator.catalog().lookup(platform) {
        Some(metadata) if metadata.is_best_for(business.business_type) => 1.0,
        Some(_) => POOR_AUDIENCE_FIT,
        None => 0.0,
    }
}

fn return_score(
    validator: &ConstraintValidator,
    business: &BusinessProfile,
    platform: Platform,
) -> f64 {
    let Some(metadata) = validator.catalog().lookup(platform) else {
        return 0.0;
    };
    match business.goal {
        MarketingGoal::Awareness => f64::from(metadata.reach_potential) / 10.0,
        MarketingGoal::Sales => f64::from(metadata.conversion_focus) / 10.0,
        MarketingGoal::Unknown => 0.0,
    }
}

/// Runs every strategy for one candidate
pub fn score_breakdown(
    validator: &ConstraintValidator,
    business: &BusinessProfile,
    platform: Platform,
) -> ScoreBreakdown {
    ScoreBreakdown {
        audience: ScoringStrategy::Audience.score(validator, business, platform),
        budget: ScoringStrategy::Budget.score(validator, business, platform),
        effort: ScoringStrategy::Effort.score(validator, business, platform),
        return_potential: ScoringStrategy::Return.score(validator, business, platform),
    }
}

/// Arithmetic mean over all strategies
pub fn composite_score(breakdown: &ScoreBreakdown) -> f64 {
    let total =
        breakdown.audience + breakdown.budget + breakdown.effort + breakdown.return_potential;
    total / ScoringStrategy::ALL.len() as f64
}
