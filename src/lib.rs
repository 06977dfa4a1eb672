//! Play chess by touch.
//!
//! Moves going out are encoded as dit/dah pulse patterns; moves coming in
//! are decoded from a stream of two input symbols. Both directions use the
//! same disambiguation scheme (see [`codec`]), relative to the side the
//! player was assigned.

pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod game;
pub mod pulse;
pub mod rules;
pub mod shell;
pub mod suggest;
pub mod sync;
pub mod types;

pub use buffer::{BitBuffer, BitSink};
pub use config::{Config, SuggesterKind};
pub use error::{ConfigError, Error, ProtocolViolation, RulesError, ServiceError};
pub use game::{GameSession, GameSummary, LoopState};
pub use pulse::{Actuator, LogActuator, PulsePattern, PulseScheduler, RecordingActuator};
pub use rules::{RulesEngine, StandardBoard};
pub use suggest::{MoveSuggester, OnlineSuggester, RandomSuggester, SuggestionRequest};
pub use sync::CloseSignal;
pub use types::{Bit, Move, PieceType, Side, Square};
