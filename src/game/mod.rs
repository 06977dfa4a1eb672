//! The turn-driving loop.

mod session;

pub use session::GameSession;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Side;

/// Where the session is between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoopState {
    /// Waiting for the first input symbol, which picks the side
    AwaitingSideAssignment,
    /// The assigned side is to move: suggest, encode, play
    Output,
    /// The other side is to move: decode from the input buffer
    Input,
    Terminal,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoopState::AwaitingSideAssignment => "awaiting side assignment",
            LoopState::Output => "output turn",
            LoopState::Input => "input turn",
            LoopState::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSummary {
    pub side: Option<Side>,
    /// Half-moves pushed since the session started or was last reset
    pub plies: usize,
    pub fen: String,
    pub outcome: Option<String>,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Some(side) => write!(f, "playing {side}, ")?,
            None => write!(f, "no side assigned, ")?,
        }
        write!(f, "{} plies", self.plies)?;
        if let Some(outcome) = &self.outcome {
            write!(f, ", result {outcome}")?;
        }
        write!(f, ", final position {}", self.fen)
    }
}
