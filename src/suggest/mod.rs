//! Where the output side's moves come from.

mod online;
mod random;

pub use online::{parse_best_move, OnlineSuggester};
pub use random::RandomSuggester;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::types::Move;

/// Everything a suggester may look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub fen: String,
    pub legal_moves: Vec<Move>,
}

/// Source of the next move for the side the session plays.
#[async_trait]
pub trait MoveSuggester: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Move, ServiceError>;
}

#[async_trait]
impl<S: MoveSuggester + ?Sized> MoveSuggester for Box<S> {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Move, ServiceError> {
        (**self).suggest(request).await
    }
}
