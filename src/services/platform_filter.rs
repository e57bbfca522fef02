use std::sync::Arc;

use serde::Serialize;

use crate::models::{BudgetTier, BusinessProfile, BusinessType, EffortLevel, Platform};
use crate::services::catalog::Catalog;

/// Human-readable account of why the candidate set looks the way it does
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterExplanation {
    pub business_type: String,
    pub budget: String,
    pub location: String,
}

/// Narrows the catalog down to platforms relevant for a business.
///
/// Stages run in a fixed order: business type, location, budget, effort.
/// Each stage is pure and preserves the order of its input.
#[derive(Debug, Clone)]
pub struct PlatformFilter {
    catalog: Arc<Catalog>,
}

impl PlatformFilter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Stage 1: platforms associated with the business type
    pub fn by_business_type(&self, business_type: BusinessType) -> Vec<Platform> {
        match business_type {
            BusinessType::Retail => vec![
                Platform::Instagram,
                Platform::Facebook,
                Platform::TikTok,
                Platform::GoogleMyBusiness,
            ],
            BusinessType::Service => vec![
                Platform::GoogleMyBusiness,
                Platform::Facebook,
                Platform::WhatsApp,
                Platform::Instagram,
            ],
            BusinessType::Digital => vec![
                Platform::LinkedIn,
                Platform::Email,
                Platform::YouTube,
                Platform::Instagram,
            ],
            BusinessType::Unknown => self.catalog.all_platform_ids(),
        }
    }

    /// Stage 2: local businesses always get Google My Business
    pub fn by_location(
        &self,
        business: &BusinessProfile,
        platforms: Vec<Platform>,
    ) -> Vec<Platform> {
        if business.is_local() {
            return ensure_included(platforms, Platform::GoogleMyBusiness);
        }
        platforms
    }

    /// Stage 3: drop platforms the budget cannot sustain
    pub fn by_budget(&self, business: &BusinessProfile, platforms: Vec<Platform>) -> Vec<Platform> {
        let tier = business.budget_tier();
        platforms
            .into_iter()
            .filter(|platform| {
                let Some(metadata) = self.catalog.lookup(*platform) else {
                    tracing::debug!(platform = %platform, "Dropping platform missing from catalog");
                    return false;
                };
                match tier {
                    // min_budget is never negative, so this keeps free platforms only
                    BudgetTier::Low => metadata.min_budget <= 0.0,
                    BudgetTier::Medium | BudgetTier::High => business.budget >= metadata.min_budget,
                }
            })
            .collect()
    }

    /// Stage 4: drop high-effort video platforms unless the business is retail
    pub fn by_effort(&self, business: &BusinessProfile, platforms: Vec<Platform>) -> Vec<Platform> {
        platforms
            .into_iter()
            .filter(|platform| {
                let Some(metadata) = self.catalog.lookup(*platform) else {
                    return false;
                };
                let heavy_video =
                    metadata.requires_video && metadata.effort_level == EffortLevel::High;
                !heavy_video || business.business_type == BusinessType::Retail
            })
            .collect()
    }

    /// Runs stages 2-4 over an existing candidate list
    pub fn refine(&self, business: &BusinessProfile, candidates: Vec<Platform>) -> Vec<Platform> {
        let platforms = self.by_location(business, candidates);
        let platforms = self.by_budget(business, platforms);
        self.by_effort(business, platforms)
    }

    /// Runs every stage and returns the surviving candidates. May be empty.
    pub fn apply_all_filters(&self, business: &BusinessProfile) -> Vec<Platform> {
        let candidates = self.by_business_type(business.business_type);
        let platforms = self.refine(business, candidates);

        tracing::debug!(
            business_type = %business.business_type,
            candidates = platforms.len(),
            "Platform filtering completed"
        );

        platforms
    }

    pub fn filtered_count(&self, business: &BusinessProfile) -> usize {
        self.apply_all_filters(business).len()
    }

    pub fn explain(&self, business: &BusinessProfile) -> FilterExplanation {
        let business_type = format!(
            "{} businesses are best suited for {}",
            business.business_type,
            format_platforms(&self.by_business_type(business.business_type))
        );

        let budget = match business.budget_tier() {
            BudgetTier::Low => "Low budget (<$50/month) limits platforms to organic-only channels",
            BudgetTier::Medium => {
                "Medium budget ($50-$200/month) allows organic and some paid channels"
            }
            BudgetTier::High => {
                "High budget (>$200/month) enables all channel types including paid advertising"
            }
        };

        let location = if business.is_local() {
            "Local business benefits from location-based platforms like Google My Business"
        } else {
            "Online-only business can leverage any platform regardless of location"
        };

        FilterExplanation {
            business_type,
            budget: budget.to_string(),
            location: location.to_string(),
        }
    }
}

fn ensure_included(mut platforms: Vec<Platform>, platform: Platform) -> Vec<Platform> {
    if !platforms.contains(&platform) {
        platforms.push(platform);
    }
    platforms
}

/// "A", "A and B", "A, B and C"
fn format_platforms(platforms: &[Platform]) -> String {
    match platforms {
        [] => "none".to_string(),
        [only] => only.to_string(),
        [rest @ .., last] => {
            let head: Vec<String> = rest.iter().map(ToString::to_string).collect();
            format!("{} and {}", head.join(", "), last)
        }
    }
}
