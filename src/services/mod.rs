pub mod catalog;
pub mod constraints;
pub mod consultation;
pub mod content;
pub mod platform_filter;
pub mod prompts;
pub mod providers;
pub mod ranking;
pub mod scoring;

pub use catalog::Catalog;
pub use consultation::ConsultationService;
pub use content::ContentGenerator;
pub use ranking::RecommendationEngine;
