/// Recommendation Engine
///
/// Blends collaborative and content-based candidates for one investor.
///
/// # Workflow
/// 1. Derive the investor's interaction facts from `history` and `saveList`
/// 2. Short-circuit to `NoInteractions` when there are none
/// 3. Build the interaction matrix over the investor plus the corpus
/// 4. Cosine user similarity, then user-based collaborative filtering
/// 5. Content filtering over the catalog
/// 6. Union of both candidate sets
use super::collaborative::CollaborativeFilter;
use super::content::ContentFilter;
use super::interaction_matrix::{derive_facts, InteractionMatrix};
use super::similarity::SimilarityMatrix;
use crate::config::EngineConfig;
use crate::error::{RecommendationError, Result};
use crate::models::{InteractionFact, Item, RecommendationOutcome, RecommendationReport, User};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    collaborative: CollaborativeFilter,
}

impl RecommendationEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            collaborative: CollaborativeFilter::from_config(config),
        }
    }

    /// Recommend companies for `user`.
    ///
    /// `corpus` holds other investors' facts. Entries in it for `user.id` are
    /// replaced by the facts derived from the `user` snapshot.
    pub fn recommend(
        &self,
        user: &User,
        catalog: &[Item],
        corpus: &[InteractionFact],
    ) -> Result<RecommendationOutcome> {
        self.recommend_with_report(user, catalog, corpus)
            .map(|(outcome, _)| outcome)
    }

    pub fn recommend_with_report(
        &self,
        user: &User,
        catalog: &[Item],
        corpus: &[InteractionFact],
    ) -> Result<(RecommendationOutcome, RecommendationReport)> {
        match self.blend(user, catalog, corpus) {
            Ok(result) => Ok(result),
            Err(RecommendationError::EmptyInteractionCorpus { user_id }) => {
                info!(user_id = %user_id, "No interactions for user, skipping recommendations");
                Ok((
                    RecommendationOutcome::NoInteractions { user_id },
                    RecommendationReport::default(),
                ))
            }
            Err(e) => Err(e),
        }
    }

    fn blend(
        &self,
        user: &User,
        catalog: &[Item],
        corpus: &[InteractionFact],
    ) -> Result<(RecommendationOutcome, RecommendationReport)> {
        let own_facts = derive_facts(user);
        if own_facts.is_empty() {
            return Err(RecommendationError::EmptyInteractionCorpus {
                user_id: user.id.clone(),
            });
        }

        let facts: Vec<InteractionFact> = own_facts
            .into_iter()
            .chain(corpus.iter().filter(|f| f.user_id != user.id).cloned())
            .collect();

        let matrix = InteractionMatrix::from_facts(&facts);
        let similarity = SimilarityMatrix::compute(&matrix)?;
        let collaborative = self.collaborative.recommend(&user.id, &similarity, &matrix)?;
        let content = ContentFilter::for_user(user).recommend(catalog);

        let mut report = RecommendationReport {
            interaction_facts: facts.len(),
            known_users: matrix.users().len(),
            neighbors_consulted: collaborative.neighbors_consulted,
            collaborative_count: collaborative.items.len(),
            content_count: content.len(),
            final_count: 0,
        };

        let mut items = collaborative.items;
        items.extend(content);
        report.final_count = items.len();

        debug!(user_id = %user.id, ?report, "Recommendation blend completed");

        Ok((RecommendationOutcome::Recommended { items }, report))
    }
}
