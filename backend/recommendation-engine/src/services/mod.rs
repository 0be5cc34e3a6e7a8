pub mod collaborative;
pub mod content;
pub mod engine;
pub mod interaction_matrix;
pub mod recommendation_service;
pub mod similarity;
pub mod store;

pub use collaborative::{CollaborativeCandidates, CollaborativeFilter};
pub use content::ContentFilter;
pub use engine::RecommendationEngine;
pub use interaction_matrix::{derive_facts, InteractionMatrix};
pub use recommendation_service::RecommendationService;
pub use similarity::{Neighbor, SimilarityMatrix};
pub use store::{Catalog, InMemoryCatalog, InMemoryInteractionStore, InteractionStore};
