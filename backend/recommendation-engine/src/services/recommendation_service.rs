use super::engine::RecommendationEngine;
use super::interaction_matrix::derive_facts;
use super::store::{Catalog, InteractionStore};
use crate::config::EngineConfig;
use crate::error::{RecommendationError, Result};
use crate::metrics::RecommendationMetrics;
use crate::models::{RecommendationOutcome, User};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Recommendation service: loads the catalog and interaction corpus through
/// the injected collaborators, then runs the engine on those snapshots.
pub struct RecommendationService {
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn InteractionStore>,
    engine: RecommendationEngine,
    metrics: RecommendationMetrics,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn InteractionStore>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            engine: RecommendationEngine::new(config),
            metrics: RecommendationMetrics::new(),
        }
    }

    pub async fn recommend(&self, user: &User) -> Result<RecommendationOutcome> {
        let result = self.recommend_inner(user).await;
        if let Err(e) = &result {
            self.metrics.record_error(e.as_str());
            if e.is_contract_violation() {
                error!(user_id = %user.id, error = %e, "Recommendation aborted");
            } else {
                warn!(user_id = %user.id, error = %e, "Recommendation failed");
            }
        }
        result
    }

    async fn recommend_inner(&self, user: &User) -> Result<RecommendationOutcome> {
        if user.id.trim().is_empty() {
            return Err(RecommendationError::InvalidInput(
                "user id must not be empty".to_string(),
            ));
        }

        // Newcomers short-circuit before any collaborator round-trip
        if derive_facts(user).is_empty() {
            let (outcome, report) = self.engine.recommend_with_report(user, &[], &[])?;
            self.metrics.record_outcome(&outcome, &report);
            info!(user_id = %user.id, "No interactions for user, collaborators not queried");
            return Ok(outcome);
        }

        let catalog = self
            .catalog
            .items()
            .await
            .map_err(|e| RecommendationError::Catalog(e.to_string()))?;
        let corpus = self
            .store
            .facts()
            .await
            .map_err(|e| RecommendationError::InteractionStore(e.to_string()))?;

        let (outcome, report) = self.engine.recommend_with_report(user, &catalog, &corpus)?;
        self.metrics.record_outcome(&outcome, &report);

        info!(
            "Recommendation completed: user_id={}, outcome={}, users={}, collaborative={}, content={}, total={}",
            user.id,
            outcome.as_str(),
            report.known_users,
            report.collaborative_count,
            report.content_count,
            report.final_count
        );

        Ok(outcome)
    }
}
