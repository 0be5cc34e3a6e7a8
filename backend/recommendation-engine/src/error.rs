use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendationError>;

#[derive(Debug, Error)]
pub enum RecommendationError {
    /// The requesting user has no derivable interaction facts
    #[error("No interactions recorded for user {user_id}")]
    EmptyInteractionCorpus { user_id: String },

    #[error("Insufficient data: similarity requires at least one user row")]
    InsufficientData,

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Interaction store error: {0}")]
    InteractionStore(String),
}

impl RecommendationError {
    /// Errors that only occur when the caller skipped the empty-corpus
    /// short-circuit. Retrying with the same input gives the same result.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            RecommendationError::InsufficientData | RecommendationError::UnknownUser(_)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationError::EmptyInteractionCorpus { .. } => "empty_interaction_corpus",
            RecommendationError::InsufficientData => "insufficient_data",
            RecommendationError::UnknownUser(_) => "unknown_user",
            RecommendationError::InvalidInput(_) => "invalid_input",
            RecommendationError::Catalog(_) => "catalog",
            RecommendationError::InteractionStore(_) => "interaction_store",
        }
    }
}
