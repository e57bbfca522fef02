use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::BusinessType;

/// Marketing platform known to the recommender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    Facebook,
    TikTok,
    #[serde(rename = "Google My Business")]
    GoogleMyBusiness,
    #[serde(rename = "WhatsApp Business")]
    WhatsApp,
    #[serde(rename = "Email/Newsletter")]
    Email,
    LinkedIn,
    YouTube,
}

impl Platform {
    /// Human-readable name, identical to the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::TikTok => "TikTok",
            Platform::GoogleMyBusiness => "Google My Business",
            Platform::WhatsApp => "WhatsApp Business",
            Platform::Email => "Email/Newsletter",
            Platform::LinkedIn => "LinkedIn",
            Platform::YouTube => "YouTube",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How much ongoing work a platform demands from a micro-business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

/// Static description of a platform's cost, effort and audience fit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformMetadata {
    pub platform: Platform,
    pub requires_visuals: bool,
    pub requires_video: bool,
    /// Minimum monthly budget in dollars
    pub min_budget: f64,
    pub effort_level: EffortLevel,
    /// Business types this platform's audience fits well
    pub best_for: Vec<BusinessType>,
    pub supports_hashtags: bool,
    pub is_organic: bool,
    pub is_paid: bool,
    /// 1-10 scale
    pub reach_potential: u8,
    /// 1-10 scale
    pub conversion_focus: u8,
}

impl PlatformMetadata {
    pub fn is_best_for(&self, business_type: BusinessType) -> bool {
        self.best_for.contains(&business_type)
    }

    /// Paid advertising is the only way to use the platform
    pub fn is_paid_only(&self) -> bool {
        self.is_paid && !self.is_organic
    }
}
