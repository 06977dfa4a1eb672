use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{MoveSuggester, SuggestionRequest};
use crate::error::ServiceError;
use crate::types::Move;

/// Picks uniformly among the legal moves. Works offline.
#[derive(Debug)]
pub struct RandomSuggester {
    rng: Mutex<StdRng>,
}

impl RandomSuggester {
    #[must_use]
    pub fn new() -> Self {
        RandomSuggester {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence of choices.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        RandomSuggester {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSuggester {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MoveSuggester for RandomSuggester {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Move, ServiceError> {
        let mut rng = self.rng.lock();
        request
            .legal_moves
            .choose(&mut *rng)
            .copied()
            .ok_or(ServiceError::NoMove)
    }
}
