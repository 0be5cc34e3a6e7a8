//! Company recommendations for investors.
//!
//! Blends user-based collaborative filtering over view/save history with
//! content matching on declared industry and geography preferences.

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::{Config, EngineConfig};
pub use error::{RecommendationError, Result};
pub use models::{InteractionFact, Item, RecommendationOutcome, RecommendationSet, User};
pub use services::{RecommendationEngine, RecommendationService};
