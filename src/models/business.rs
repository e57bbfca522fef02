use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Monthly budget below which a business is treated as low-budget
pub const LOW_BUDGET_CEILING: f64 = 50.0;

/// Monthly budget above which a business is treated as high-budget
pub const HIGH_BUDGET_FLOOR: f64 = 200.0;

/// Kind of business asking for a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Retail,
    Service,
    Digital,
    /// Any unrecognized value. Rejected by [`BusinessProfile::validate`].
    #[serde(other)]
    Unknown,
}

impl Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessType::Retail => "retail",
            BusinessType::Service => "service",
            BusinessType::Digital => "digital",
            BusinessType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Primary marketing goal of the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketingGoal {
    Awareness,
    Sales,
    #[serde(other)]
    Unknown,
}

impl Display for MarketingGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarketingGoal::Awareness => "awareness",
            MarketingGoal::Sales => "sales",
            MarketingGoal::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Budget tier derived from the monthly budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// Under $50/month
    Low,
    /// $50 to $200/month inclusive
    Medium,
    /// Over $200/month
    High,
}

impl BudgetTier {
    pub fn from_budget(budget: f64) -> Self {
        if budget < LOW_BUDGET_CEILING {
            BudgetTier::Low
        } else if budget <= HIGH_BUDGET_FLOOR {
            BudgetTier::Medium
        } else {
            BudgetTier::High
        }
    }
}

/// A small business profile as submitted by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    #[serde(rename = "type", alias = "business_type")]
    pub business_type: BusinessType,
    /// Free text, passed through to content generation only
    #[serde(default)]
    pub description: String,
    /// Empty or "online" means the business has no physical presence
    #[serde(default)]
    pub location: String,
    /// Monthly marketing spend in dollars
    #[serde(alias = "monthly_budget")]
    pub budget: f64,
    /// Channels the business already uses
    #[serde(default)]
    pub channels: Vec<String>,
    pub goal: MarketingGoal,
}

impl BusinessProfile {
    /// Rejects profiles the pipeline cannot reason about
    pub fn validate(&self) -> AppResult<()> {
        if self.business_type == BusinessType::Unknown {
            return Err(AppError::InvalidInput(
                "type must be one of: retail, service, digital".to_string(),
            ));
        }

        if self.goal == MarketingGoal::Unknown {
            return Err(AppError::InvalidInput(
                "goal must be one of: awareness, sales".to_string(),
            ));
        }

        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "budget must be a non-negative number, got {}",
                self.budget
            )));
        }

        Ok(())
    }

    pub fn is_local(&self) -> bool {
        !self.is_online_only()
    }

    pub fn is_online_only(&self) -> bool {
        self.location.is_empty() || self.location == "online"
    }

    pub fn budget_tier(&self) -> BudgetTier {
        BudgetTier::from_budget(self.budget)
    }
}
