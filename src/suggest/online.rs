use async_trait::async_trait;
use serde_json::Value;

use super::{MoveSuggester, SuggestionRequest};
use crate::config::Config;
use crate::error::ServiceError;
use crate::types::Move;

/// Extract the move from a best-move response body.
///
/// The body is JSON whose `data` field reads `"bestmove e2e4 ponder e7e5"`.
pub fn parse_best_move(body: &str) -> Result<Move, ServiceError> {
    let malformed = || ServiceError::Malformed {
        body: body.to_string(),
    };
    let response: Value = serde_json::from_str(body).map_err(|_| malformed())?;
    if response["success"].as_bool() == Some(false) {
        return Err(malformed());
    }
    let data = response["data"].as_str().ok_or_else(malformed)?;
    let notation = data.split_whitespace().nth(1).ok_or_else(malformed)?;
    if notation == "(none)" {
        return Err(ServiceError::NoMove);
    }
    notation.parse().map_err(|error| ServiceError::InvalidMove {
        notation: notation.to_string(),
        error,
    })
}

/// HTTP best-move service. One GET per move, no retries.
#[derive(Debug, Clone)]
pub struct OnlineSuggester {
    client: reqwest::Client,
    endpoint: String,
    depth: u32,
}

impl OnlineSuggester {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, depth: u32) -> Self {
        OnlineSuggester {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            depth,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone(), config.depth)
    }
}

#[async_trait]
impl MoveSuggester for OnlineSuggester {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Move, ServiceError> {
        log::debug!("requesting best move for '{}' at depth {}", request.fen, self.depth);
        let depth = self.depth.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("fen", request.fen.as_str()),
                ("depth", depth.as_str()),
                ("mode", "bestmove"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                code: status.as_u16(),
            });
        }
        let body = response.text().await?;
        let mv = parse_best_move(&body)?;
        log::debug!("service suggested {mv}");
        Ok(mv)
    }
}
