mod business;
mod platform;
mod recommendation;

pub use business::{
    BudgetTier, BusinessProfile, BusinessType, MarketingGoal, HIGH_BUDGET_FLOOR,
    LOW_BUDGET_CEILING,
};
pub use platform::{EffortLevel, Platform, PlatformMetadata};
pub use recommendation::{
    ConsultationResult, ContentTemplate, RankedResult, Recommendation, ScoreBreakdown,
};
