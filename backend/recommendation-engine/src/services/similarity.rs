/// User Similarity
///
/// Pairwise cosine similarity between interaction rows.
///
/// A zero row has similarity 0 to every user, itself included, so a user
/// without interactions is never ranked as a close neighbor by accident.
use super::interaction_matrix::InteractionMatrix;
use crate::error::{RecommendationError, Result};
use ndarray::Array2;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Another user and their similarity to the target
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub user_id: String,
    pub similarity: f64,
}

#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    users: Vec<String>,
    index: HashMap<String, usize>,
    values: Array2<f64>,
}

impl SimilarityMatrix {
    pub fn compute(matrix: &InteractionMatrix) -> Result<Self> {
        if matrix.is_empty() {
            return Err(RecommendationError::InsufficientData);
        }

        let users = matrix.users().to_vec();
        let n = users.len();
        let norms: Vec<f64> = (0..n)
            .map(|i| {
                let row = matrix.row(i);
                row.dot(&row).sqrt()
            })
            .collect();

        let mut values = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            if norms[i] == 0.0 {
                continue;
            }
            values[[i, i]] = 1.0;

            for j in (i + 1)..n {
                if norms[j] == 0.0 {
                    continue;
                }
                let dot = matrix.row(i).dot(&matrix.row(j));
                let cosine = (dot / (norms[i] * norms[j])).clamp(-1.0, 1.0);
                values[[i, j]] = cosine;
                values[[j, i]] = cosine;
            }
        }

        let index = users
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Ok(Self {
            users,
            index,
            values,
        })
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.index.contains_key(user_id)
    }

    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        Some(self.values[[i, j]])
    }

    /// Every other user, most similar first. Ties are broken by ascending
    /// user id so the order is stable for a fixed input.
    pub fn neighbors(&self, target: &str) -> Result<Vec<Neighbor>> {
        let &row = self
            .index
            .get(target)
            .ok_or_else(|| RecommendationError::UnknownUser(target.to_string()))?;

        let mut neighbors: Vec<Neighbor> = self
            .users
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != row)
            .map(|(j, user_id)| Neighbor {
                user_id: user_id.clone(),
                similarity: self.values[[row, j]],
            })
            .collect();

        neighbors.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        Ok(neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InteractionFact, InteractionSource};

    const EPS: f64 = 1e-9;

    fn matrix(pairs: &[(&str, &str)]) -> InteractionMatrix {
        let facts: Vec<InteractionFact> = pairs
            .iter()
            .map(|(u, i)| InteractionFact::new(*u, *i, InteractionSource::History))
            .collect();
        InteractionMatrix::from_facts(&facts)
    }

    #[test]
    fn test_empty_matrix_is_insufficient() {
        let err = SimilarityMatrix::compute(&matrix(&[])).unwrap_err();
        assert!(matches!(err, RecommendationError::InsufficientData));
    }

    #[test]
    fn test_single_user_is_one_by_one() {
        let sim = SimilarityMatrix::compute(&matrix(&[("u1", "c1"), ("u1", "c2")])).unwrap();

        assert_eq!(sim.len(), 1);
        assert!((sim.similarity("u1", "u1").unwrap() - 1.0).abs() < EPS);
        assert!(sim.neighbors("u1").unwrap().is_empty());
    }

    #[test]
    fn test_cosine_values() {
        // u1 = [1, 0], u2 = [1, 1], u3 = [0, 1] over (c1, c2)
        let sim = SimilarityMatrix::compute(&matrix(&[
            ("u1", "c1"),
            ("u2", "c1"),
            ("u2", "c2"),
            ("u3", "c2"),
        ]))
        .unwrap();

        let half_sqrt2 = 1.0 / 2f64.sqrt();
        assert!((sim.similarity("u1", "u2").unwrap() - half_sqrt2).abs() < EPS);
        assert!((sim.similarity("u2", "u3").unwrap() - half_sqrt2).abs() < EPS);
        assert!(sim.similarity("u1", "u3").unwrap().abs() < EPS);
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let sim = SimilarityMatrix::compute(&matrix(&[
            ("a", "c1"),
            ("a", "c2"),
            ("b", "c2"),
            ("b", "c3"),
            ("c", "c1"),
            ("c", "c3"),
            ("c", "c4"),
        ]))
        .unwrap();

        for x in sim.users() {
            assert_eq!(sim.similarity(x, x), Some(1.0));
            for y in sim.users() {
                let xy = sim.similarity(x, y).unwrap();
                let yx = sim.similarity(y, x).unwrap();
                assert_eq!(xy, yx);
                assert!((0.0..=1.0).contains(&xy));
            }
        }
    }

    #[test]
    fn test_neighbors_ranked_with_id_tie_break() {
        // u2 and u3 are identical to each other and equally similar to u1
        let sim = SimilarityMatrix::compute(&matrix(&[
            ("u1", "c1"),
            ("u3", "c1"),
            ("u3", "c2"),
            ("u2", "c1"),
            ("u2", "c2"),
            ("u4", "c9"),
        ]))
        .unwrap();

        let neighbors = sim.neighbors("u1").unwrap();
        let ids: Vec<&str> = neighbors.iter().map(|n| n.user_id.as_str()).collect();

        assert_eq!(ids, vec!["u2", "u3", "u4"]);
        assert_eq!(neighbors[0].similarity, neighbors[1].similarity);
        assert_eq!(neighbors[2].similarity, 0.0);
    }

    #[test]
    fn test_zero_row_is_similar_to_nothing() {
        let facts = vec![
            InteractionFact::new("u1", "c1", InteractionSource::History),
            InteractionFact::new("u2", "c1", InteractionSource::History).with_strength(0),
        ];
        let sim = SimilarityMatrix::compute(&InteractionMatrix::from_facts(&facts)).unwrap();

        assert_eq!(sim.similarity("u2", "u2"), Some(0.0));
        assert_eq!(sim.similarity("u1", "u2"), Some(0.0));
        assert_eq!(sim.similarity("u2", "u1"), Some(0.0));
        assert_eq!(sim.similarity("u1", "u1"), Some(1.0));
        assert!(sim.users().iter().all(|a| sim
            .users()
            .iter()
            .all(|b| !sim.similarity(a, b).unwrap().is_nan())));
    }

    #[test]
    fn test_unknown_user() {
        let sim = SimilarityMatrix::compute(&matrix(&[("u1", "c1")])).unwrap();
        let err = sim.neighbors("ghost").unwrap_err();

        assert!(matches!(err, RecommendationError::UnknownUser(id) if id == "ghost"));
        assert!(sim.similarity("ghost", "u1").is_none());
    }
}
