//! Marketing platform recommendations for micro-businesses.
//!
//! A deterministic engine filters, scores and ranks marketing platforms for a
//! business profile. A consultation layer adds generated reasoning, a content
//! template, risks and a persona, and records each consultation.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
