use super::interaction_matrix::InteractionMatrix;
use super::similarity::SimilarityMatrix;
use crate::config::EngineConfig;
use crate::error::{RecommendationError, Result};
use crate::models::RecommendationSet;
use tracing::debug;

/// User-based Collaborative Filter
///
/// Algorithm:
/// 1. Rank every other user by similarity to the target (ties by user id)
/// 2. Walk neighbors in rank order
/// 3. Collect each item a neighbor has that the target has not
///
/// By default every neighbor is consulted, including ones with similarity 0.
/// `max_neighbors` / `min_similarity` narrow that when configured.
#[derive(Debug, Clone, Default)]
pub struct CollaborativeFilter {
    max_neighbors: Option<usize>,
    min_similarity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollaborativeCandidates {
    pub items: RecommendationSet,
    pub neighbors_consulted: usize,
}

impl CollaborativeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_neighbors: config.max_neighbors,
            min_similarity: config.min_neighbor_similarity,
        }
    }

    pub fn with_max_neighbors(mut self, max_neighbors: usize) -> Self {
        self.max_neighbors = Some(max_neighbors);
        self
    }

    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = Some(min_similarity);
        self
    }

    pub fn recommend(
        &self,
        target: &str,
        similarity: &SimilarityMatrix,
        matrix: &InteractionMatrix,
    ) -> Result<CollaborativeCandidates> {
        let neighbors = similarity.neighbors(target)?;
        let target_row = matrix
            .row_index(target)
            .ok_or_else(|| RecommendationError::UnknownUser(target.to_string()))?;
        let target_cells = matrix.row(target_row);

        let min_similarity = self.min_similarity;
        let consulted = neighbors
            .iter()
            .take_while(|n| min_similarity.map_or(true, |min| n.similarity >= min))
            .take(self.max_neighbors.unwrap_or(usize::MAX));

        let mut candidates = CollaborativeCandidates::default();
        for neighbor in consulted {
            candidates.neighbors_consulted += 1;
            let Some(row) = matrix.row_index(&neighbor.user_id) else {
                continue;
            };

            for ((cell, own), item) in matrix
                .row(row)
                .iter()
                .zip(target_cells.iter())
                .zip(matrix.items())
            {
                if *cell > 0.0 && *own == 0.0 {
                    candidates.items.insert(item.clone());
                }
            }
        }

        debug!(
            user_id = %target,
            neighbors = candidates.neighbors_consulted,
            candidates = candidates.items.len(),
            "Collaborative filtering completed"
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InteractionFact, InteractionSource};

    fn build(pairs: &[(&str, &str)]) -> (InteractionMatrix, SimilarityMatrix) {
        let facts: Vec<InteractionFact> = pairs
            .iter()
            .map(|(u, i)| InteractionFact::new(*u, *i, InteractionSource::History))
            .collect();
        let matrix = InteractionMatrix::from_facts(&facts);
        let similarity = SimilarityMatrix::compute(&matrix).unwrap();
        (matrix, similarity)
    }

    fn ids(items: &RecommendationSet) -> Vec<&str> {
        items.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_neighbor_items_not_yet_seen() {
        let (matrix, similarity) = build(&[("u1", "c1"), ("u2", "c1"), ("u2", "c2")]);

        let result = CollaborativeFilter::new()
            .recommend("u1", &similarity, &matrix)
            .unwrap();

        assert_eq!(ids(&result.items), vec!["c2"]);
        assert_eq!(result.neighbors_consulted, 1);
    }

    #[test]
    fn test_never_recommends_already_seen_items() {
        let (matrix, similarity) = build(&[
            ("u1", "c1"),
            ("u1", "c2"),
            ("u2", "c1"),
            ("u2", "c2"),
            ("u2", "c3"),
            ("u3", "c2"),
            ("u3", "c4"),
        ]);

        let result = CollaborativeFilter::new()
            .recommend("u1", &similarity, &matrix)
            .unwrap();

        for item in &result.items {
            assert_eq!(matrix.value("u1", item), 0);
        }
        assert_eq!(ids(&result.items), vec!["c3", "c4"]);
    }

    #[test]
    fn test_zero_similarity_neighbors_still_contribute() {
        // u2 shares nothing with u1
        let (matrix, similarity) = build(&[("u1", "c1"), ("u2", "c9")]);

        let result = CollaborativeFilter::new()
            .recommend("u1", &similarity, &matrix)
            .unwrap();

        assert_eq!(ids(&result.items), vec!["c9"]);
    }

    #[test]
    fn test_single_user_has_no_candidates() {
        let (matrix, similarity) = build(&[("u1", "c1"), ("u1", "c2")]);

        let result = CollaborativeFilter::new()
            .recommend("u1", &similarity, &matrix)
            .unwrap();

        assert!(result.items.is_empty());
        assert_eq!(result.neighbors_consulted, 0);
    }

    #[test]
    fn test_min_similarity_and_max_neighbors() {
        let (matrix, similarity) = build(&[
            ("u1", "c1"),
            ("u1", "c2"),
            ("u2", "c1"),
            ("u2", "c2"),
            ("u2", "c3"),
            ("u3", "c1"),
            ("u3", "c4"),
            ("u4", "c9"),
        ]);

        let result = CollaborativeFilter::new()
            .with_min_similarity(0.1)
            .recommend("u1", &similarity, &matrix)
            .unwrap();
        assert_eq!(ids(&result.items), vec!["c3", "c4"]);
        assert_eq!(result.neighbors_consulted, 2);

        let result = CollaborativeFilter::new()
            .with_max_neighbors(1)
            .recommend("u1", &similarity, &matrix)
            .unwrap();
        assert_eq!(ids(&result.items), vec!["c3"]);
    }

    #[test]
    fn test_unknown_target() {
        let (matrix, similarity) = build(&[("u1", "c1")]);

        let err = CollaborativeFilter::new()
            .recommend("nobody", &similarity, &matrix)
            .unwrap_err();

        assert!(matches!(err, RecommendationError::UnknownUser(_)));
    }
}
