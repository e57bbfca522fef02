use std::sync::Arc;

use crate::models::{
    BudgetTier, BusinessProfile, BusinessType, EffortLevel, MarketingGoal, Platform,
    PlatformMetadata,
};
use crate::services::catalog::Catalog;

const MISSING_METADATA: &str = "Platform metadata not found";

/// Outcome of a single constraint check for a (business, platform) pair
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintCheck {
    pub is_valid: bool,
    pub reason: String,
    /// 0.0 is a perfect fit, 1.0 the worst
    pub penalty: f64,
}

impl ConstraintCheck {
    fn ok(reason: impl Into<String>, penalty: f64) -> Self {
        Self {
            is_valid: true,
            reason: reason.into(),
            penalty,
        }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
            penalty: 1.0,
        }
    }

    fn missing() -> Self {
        Self::invalid(MISSING_METADATA)
    }
}

/// Relative weight of each check in the combined penalty.
///
/// The defaults average the four checks equally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyWeights {
    pub budget: f64,
    pub effort: f64,
    pub visual: f64,
    pub goal: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            budget: 0.25,
            effort: 0.25,
            visual: 0.25,
            goal: 0.25,
        }
    }
}

/// Evaluates budget, effort, visual and goal feasibility of a platform
#[derive(Debug, Clone)]
pub struct ConstraintValidator {
    catalog: Arc<Catalog>,
    weights: PenaltyWeights,
}

impl ConstraintValidator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_weights(catalog, PenaltyWeights::default())
    }

    pub fn with_weights(catalog: Arc<Catalog>, weights: PenaltyWeights) -> Self {
        Self { catalog, weights }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle to the catalog this validator reads from
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }

    fn metadata(&self, platform: Platform) -> Option<&PlatformMetadata> {
        self.catalog.lookup(platform)
    }

    /// Checks whether the monthly budget can sustain the platform
    pub fn validate_budget(&self, budget: f64, platform: Platform) -> ConstraintCheck {
        let Some(metadata) = self.metadata(platform) else {
            return ConstraintCheck::missing();
        };

        if budget < metadata.min_budget {
            return ConstraintCheck::invalid(format!(
                "Budget (${:.2}/month) is below minimum required (${:.2}/month) for {}",
                budget, metadata.min_budget, platform
            ));
        }

        match BudgetTier::from_budget(budget) {
            BudgetTier::Low if !metadata.is_organic => {
                ConstraintCheck::ok("Low budget makes paid platforms less effective", 0.7)
            }
            BudgetTier::Low => {
                ConstraintCheck::ok("Perfect fit for low-budget organic marketing", 0.0)
            }
            BudgetTier::Medium if metadata.is_paid_only() => {
                ConstraintCheck::ok("Medium budget can support limited paid advertising", 0.3)
            }
            BudgetTier::Medium => {
                ConstraintCheck::ok("Good budget for consistent organic presence", 0.0)
            }
            BudgetTier::High => {
                ConstraintCheck::ok("Budget supports both organic and paid strategies", 0.0)
            }
        }
    }

    /// Checks whether a micro-business can keep up with the platform's workload
    pub fn validate_effort(
        &self,
        business: &BusinessProfile,
        platform: Platform,
    ) -> ConstraintCheck {
        let Some(metadata) = self.metadata(platform) else {
            return ConstraintCheck::missing();
        };

        if metadata.requires_video {
            // Retail has visual products, so video costs less for them
            if business.business_type == BusinessType::Retail {
                return ConstraintCheck::ok(
                    "Visual products are well-suited for video content",
                    0.2,
                );
            }
            return ConstraintCheck::ok(
                "Video content requires significant production effort for service/digital businesses",
                0.6,
            );
        }

        match metadata.effort_level {
            EffortLevel::High => ConstraintCheck::ok(
                "High-effort platform may strain micro-business resources",
                0.4,
            ),
            EffortLevel::Medium => ConstraintCheck::ok(
                "Moderate effort required, manageable for consistent posting",
                0.1,
            ),
            EffortLevel::Low => ConstraintCheck::ok(
                "Low-effort platform, ideal for resource-constrained businesses",
                0.0,
            ),
        }
    }

    /// Checks whether the business can produce the visuals the platform needs
    pub fn validate_visuals(
        &self,
        business: &BusinessProfile,
        platform: Platform,
    ) -> ConstraintCheck {
        let Some(metadata) = self.metadata(platform) else {
            return ConstraintCheck::missing();
        };

        if !metadata.requires_visuals {
            return ConstraintCheck::ok("Platform works well with text-based content", 0.0);
        }

        match business.business_type {
            BusinessType::Retail => ConstraintCheck::ok(
                "Retail products provide natural visual content opportunities",
                0.0,
            ),
            BusinessType::Service => ConstraintCheck::ok(
                "Services can create visual content (before/after, testimonials, team)",
                0.2,
            ),
            BusinessType::Digital => ConstraintCheck::ok(
                "Digital products may require creative approaches to visual content",
                0.3,
            ),
            BusinessType::Unknown => ConstraintCheck::ok("Unknown business type", 0.0),
        }
    }

    /// Checks how well the platform serves the marketing goal. Never invalidates.
    pub fn validate_goal_alignment(
        &self,
        goal: MarketingGoal,
        platform: Platform,
    ) -> ConstraintCheck {
        let Some(metadata) = self.metadata(platform) else {
            return ConstraintCheck::missing();
        };

        let (strength, excellent, moderate, limited) = match goal {
            MarketingGoal::Awareness => (
                metadata.reach_potential,
                "Excellent reach potential for awareness campaigns",
                "Moderate reach potential for awareness",
                "Limited reach potential for awareness goals",
            ),
            MarketingGoal::Sales => (
                metadata.conversion_focus,
                "Excellent conversion potential for sales goals",
                "Moderate conversion potential for sales",
                "Limited conversion potential for direct sales",
            ),
            MarketingGoal::Unknown => return ConstraintCheck::ok("Unknown goal", 0.0),
        };

        match strength {
            8.. => ConstraintCheck::ok(excellent, 0.0),
            6..=7 => ConstraintCheck::ok(moderate, 0.2),
            _ => ConstraintCheck::ok(limited, 0.4),
        }
    }

    /// Weighted mean of the four check penalties, always within [0, 1]
    pub fn combined_penalty(&self, business: &BusinessProfile, platform: Platform) -> f64 {
        let w = self.weights;
        let total_weight = w.budget + w.effort + w.visual + w.goal;
        if total_weight <= 0.0 {
            return 0.0;
        }

        let weighted = w.budget * self.validate_budget(business.budget, platform).penalty
            + w.effort * self.validate_effort(business, platform).penalty
            + w.visual * self.validate_visuals(business, platform).penalty
            + w.goal * self.validate_goal_alignment(business.goal, platform).penalty;

        (weighted / total_weight).clamp(0.0, 1.0)
    }

    /// True when no hard constraint is violated. Goal alignment only penalizes.
    pub fn is_valid_platform(&self, business: &BusinessProfile, platform: Platform) -> bool {
        self.validate_budget(business.budget, platform).is_valid
            && self.validate_effort(business, platform).is_valid
            && self.validate_visuals(business, platform).is_valid
    }
}
