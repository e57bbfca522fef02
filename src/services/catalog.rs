//! Static platform metadata table.
//!
//! The built-in catalog is constructed once per process and shared
//! read-only. Its ordering is the tie-break order used when ranking.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::models::{
    BusinessType::{Digital, Retail, Service},
    EffortLevel, Platform, PlatformMetadata,
};

static BUILTIN: OnceLock<Arc<Catalog>> = OnceLock::new();

/// Reasons a custom catalog is rejected
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("{0} has an empty best_for set")]
    EmptyAudience(Platform),
    #[error("{platform} has {field}={value}, expected 1-10")]
    OutOfRange {
        platform: Platform,
        field: &'static str,
        value: u8,
    },
    #[error("{0} has a negative or non-finite min_budget")]
    InvalidMinBudget(Platform),
    #[error("{0} appears more than once")]
    Duplicate(Platform),
}

/// Ordered, immutable table of platform metadata
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<PlatformMetadata>,
}

impl Catalog {
    /// Builds a catalog from entries, keeping their order
    pub fn new(entries: Vec<PlatformMetadata>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.platform) {
                return Err(CatalogError::Duplicate(entry.platform));
            }
            validate_entry(entry)?;
        }
        Ok(Self { entries })
    }

    /// The process-wide built-in catalog
    pub fn shared() -> Arc<Catalog> {
        BUILTIN.get_or_init(|| Arc::new(Self::builtin())).clone()
    }

    pub fn lookup(&self, platform: Platform) -> Option<&PlatformMetadata> {
        self.entries.iter().find(|m| m.platform == platform)
    }

    /// Platform identifiers in catalog order
    pub fn all_platform_ids(&self) -> Vec<Platform> {
        self.entries.iter().map(|m| m.platform).collect()
    }

    /// Index of the platform in catalog order
    pub fn position(&self, platform: Platform) -> Option<usize> {
        self.entries.iter().position(|m| m.platform == platform)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformMetadata> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn builtin() -> Self {
        let entries = vec![
            PlatformMetadata {
                platform: Platform::Instagram,
                requires_visuals: true,
                requires_video: false,
                min_budget: 0.0,
                effort_level: EffortLevel::Medium,
                best_for: vec![Retail, Service, Digital],
                supports_hashtags: true,
                is_organic: true,
                is_paid: true,
                reach_potential: 9,
                conversion_focus: 7,
            },
            PlatformMetadata {
                platform: Platform::Facebook,
                requires_visuals: true,
                requires_video: false,
                min_budget: 0.0,
                effort_level: EffortLevel::Medium,
                best_for: vec![Retail, Service],
                supports_hashtags: false,
                is_organic: true,
                is_paid: true,
                reach_potential: 8,
                conversion_focus: 8,
            },
            PlatformMetadata {
                platform: Platform::TikTok,
                requires_visuals: true,
                requires_video: true,
                min_budget: 0.0,
                effort_level: EffortLevel::High,
                best_for: vec![Retail, Digital],
                supports_hashtags: true,
                is_organic: true,
                is_paid: true,
                reach_potential: 10,
                conversion_focus: 6,
            },
            PlatformMetadata {
                platform: Platform::GoogleMyBusiness,
                requires_visuals: true,
                requires_video: false,
                min_budget: 0.0,
                effort_level: EffortLevel::Low,
                best_for: vec![Retail, Service],
                supports_hashtags: false,
                is_organic: true,
                is_paid: true,
                reach_potential: 7,
                conversion_focus: 9,
            },
            PlatformMetadata {
                platform: Platform::WhatsApp,
                requires_visuals: false,
                requires_video: false,
                min_budget: 0.0,
                effort_level: EffortLevel::Low,
                best_for: vec![Service],
                supports_hashtags: false,
                is_organic: true,
                is_paid: false,
                reach_potential: 5,
                conversion_focus: 8,
            },
            PlatformMetadata {
                platform: Platform::Email,
                requires_visuals: false,
                requires_video: false,
                min_budget: 0.0,
                effort_level: EffortLevel::Medium,
                best_for: vec![Retail, Service, Digital],
                supports_hashtags: false,
                is_organic: true,
                is_paid: true,
                reach_potential: 6,
                conversion_focus: 9,
            },
            PlatformMetadata {
                platform: Platform::LinkedIn,
                requires_visuals: true,
                requires_video: false,
                min_budget: 0.0,
                effort_level: EffortLevel::High,
                best_for: vec![Digital, Service],
                supports_hashtags: false,
                is_organic: true,
                is_paid: true,
                reach_potential: 7,
                conversion_focus: 8,
            },
            PlatformMetadata {
                platform: Platform::YouTube,
                requires_visuals: true,
                requires_video: true,
                min_budget: 0.0,
                effort_level: EffortLevel::High,
                best_for: vec![Retail, Digital],
                supports_hashtags: true,
                is_organic: true,
                is_paid: true,
                reach_potential: 9,
                conversion_focus: 7,
            },
        ];

        Self { entries }
    }
}

fn validate_entry(entry: &PlatformMetadata) -> Result<(), CatalogError> {
    if entry.best_for.is_empty() {
        return Err(CatalogError::EmptyAudience(entry.platform));
    }

    for (field, value) in [
        ("reach_potential", entry.reach_potential),
        ("conversion_focus", entry.conversion_focus),
    ] {
        if !(1..=10).contains(&value) {
            return Err(CatalogError::OutOfRange {
                platform: entry.platform,
                field,
                value,
            });
        }
    }

    if !entry.min_budget.is_finite() || entry.min_budget < 0.0 {
        return Err(CatalogError::InvalidMinBudget(entry.platform));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_satisfies_invariants() {
        let catalog = Catalog::shared();
        assert_eq!(catalog.len(), 8);
        for entry in catalog.iter() {
            assert_eq!(validate_entry(entry), Ok(()));
        }
        assert!(Catalog::new(catalog.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn test_all_platform_ids_in_stable_order() {
        let catalog = Catalog::shared();
        assert_eq!(
            catalog.all_platform_ids(),
            vec![
                Platform::Instagram,
                Platform::Facebook,
                Platform::TikTok,
                Platform::GoogleMyBusiness,
                Platform::WhatsApp,
                Platform::Email,
                Platform::LinkedIn,
                Platform::YouTube,
            ]
        );
        assert_eq!(catalog.position(Platform::Instagram), Some(0));
        assert_eq!(catalog.position(Platform::YouTube), Some(7));
    }

    #[test]
    fn test_shared_catalog_is_built_once() {
        assert!(Arc::ptr_eq(&Catalog::shared(), &Catalog::shared()));
    }

    #[test]
    fn test_lookup_miss_on_partial_catalog() {
        let partial: Vec<PlatformMetadata> = Catalog::shared()
            .iter()
            .filter(|m| m.platform != Platform::WhatsApp)
            .cloned()
            .collect();
        let catalog = Catalog::new(partial).unwrap();

        assert!(catalog.lookup(Platform::WhatsApp).is_none());
        assert!(catalog.position(Platform::WhatsApp).is_none());
        assert!(catalog.lookup(Platform::Email).is_some());
    }

    #[test]
    fn test_rejects_invalid_entries() {
        let mut entry = Catalog::shared()
            .lookup(Platform::TikTok)
            .cloned()
            .unwrap();
        entry.reach_potential = 11;
        assert_eq!(
            Catalog::new(vec![entry.clone()]).unwrap_err(),
            CatalogError::OutOfRange {
                platform: Platform::TikTok,
                field: "reach_potential",
                value: 11,
            }
        );

        entry.reach_potential = 10;
        entry.best_for.clear();
        assert_eq!(
            Catalog::new(vec![entry]).unwrap_err(),
            CatalogError::EmptyAudience(Platform::TikTok)
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let entry = Catalog::shared()
            .lookup(Platform::Email)
            .cloned()
            .unwrap();
        assert_eq!(
            Catalog::new(vec![entry.clone(), entry]).unwrap_err(),
            CatalogError::Duplicate(Platform::Email)
        );
    }
}
