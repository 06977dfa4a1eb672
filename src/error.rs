//! Error types.
//!
//! `ProtocolViolation` and `ServiceError` are fatal to the half-move in which
//! they occur; the game loop does not try to recover from either. Waiting
//! for more input is never an error.

use std::fmt;

use crate::types::{PieceType, Square};

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Index out of bounds (must be 0-63)
    IndexOutOfBounds { index: u8 },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::IndexOutOfBounds { index } => {
                write!(f, "Square index {index} out of bounds (must be 0-63)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// The board and the bit stream disagree. Either side of the conversation
/// lost sync, or the buffer holds garbage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// No legal move reaches the destination square
    NoLegalMoves { square: Square },
    /// No candidate at the destination is moved by this piece type
    NoMatchingPiece { square: Square, piece: PieceType },
    /// A piece-type group decoded to an unused code (0 or 7)
    InvalidPieceCode { code: u8 },
    /// More than two same-type candidates share a destination
    TooManyCandidates { square: Square, count: usize },
    /// The move to encode is not among the legal moves to its destination
    UnknownMove { notation: String },
    /// The origin square of a candidate is empty
    EmptyOrigin { square: Square },
    /// A bit group of the wrong length was supplied
    GroupLength { expected: usize, found: usize },
    /// A pulse pattern does not have the shape of an encoded move
    MalformedPattern { pattern: String },
}

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolViolation::NoLegalMoves { square } => {
                write!(f, "No legal moves to {square}")
            }
            ProtocolViolation::NoMatchingPiece { square, piece } => {
                write!(f, "No legal move to {square} with piece '{piece}'")
            }
            ProtocolViolation::InvalidPieceCode { code } => {
                write!(f, "Invalid piece code {code:03b}")
            }
            ProtocolViolation::TooManyCandidates { square, count } => {
                write!(f, "{count} candidates of the same piece type reach {square}, expected at most 2")
            }
            ProtocolViolation::UnknownMove { notation } => {
                write!(f, "Move '{notation}' is not legal in this position")
            }
            ProtocolViolation::EmptyOrigin { square } => {
                write!(f, "No piece on origin square {square}")
            }
            ProtocolViolation::GroupLength { expected, found } => {
                write!(f, "Expected a group of {expected} bits, found {found}")
            }
            ProtocolViolation::MalformedPattern { pattern } => {
                write!(f, "Pattern '{pattern}' is not an encoded move")
            }
        }
    }
}

impl std::error::Error for ProtocolViolation {}

/// Error type for suggestion service failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request could not be sent or the body could not be read
    Request { message: String },
    /// Non-success HTTP status
    Status { code: u16 },
    /// The response body did not have the expected shape
    Malformed { body: String },
    /// The suggested move could not be parsed
    InvalidMove { notation: String, error: MoveParseError },
    /// The suggested move is not legal in the position
    IllegalSuggestion { notation: String },
    /// No move to suggest (e.g. no legal moves)
    NoMove,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Request { message } => write!(f, "Suggestion request failed: {message}"),
            ServiceError::Status { code } => write!(f, "Suggestion service returned HTTP {code}"),
            ServiceError::Malformed { body } => {
                write!(f, "Malformed suggestion response: {body}")
            }
            ServiceError::InvalidMove { notation, error } => {
                write!(f, "Invalid suggested move '{notation}': {error}")
            }
            ServiceError::IllegalSuggestion { notation } => {
                write!(f, "Suggested move '{notation}' is not legal")
            }
            ServiceError::NoMove => write!(f, "Suggestion service returned no move"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ServiceError::Status {
                code: status.as_u16(),
            },
            None => ServiceError::Request {
                message: e.to_string(),
            },
        }
    }
}

/// Error type for rules engine operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Invalid FEN string
    InvalidFen { fen: String, message: String },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::InvalidFen { fen, message } => {
                write!(f, "Invalid FEN '{fen}': {message}")
            }
            RulesError::IllegalMove { notation } => write!(f, "Illegal move '{notation}'"),
        }
    }
}

impl std::error::Error for RulesError {}

/// Error type for configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Option name not recognized
    UnknownOption { name: String },
    /// Option value could not be parsed
    InvalidValue { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownOption { name } => write!(f, "Unknown option '{name}'"),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level error for a game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Protocol(ProtocolViolation),
    Service(ServiceError),
    Rules(RulesError),
    Config(ConfigError),
    /// The session was closed while waiting for input
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Protocol(e) => write!(f, "Protocol violation: {e}"),
            Error::Service(e) => write!(f, "Service failure: {e}"),
            Error::Rules(e) => write!(f, "Rules engine error: {e}"),
            Error::Config(e) => write!(f, "Configuration error: {e}"),
            Error::Cancelled => write!(f, "Session cancelled"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Protocol(e) => Some(e),
            Error::Service(e) => Some(e),
            Error::Rules(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Cancelled => None,
        }
    }
}

impl From<ProtocolViolation> for Error {
    fn from(e: ProtocolViolation) -> Self {
        Error::Protocol(e)
    }
}

impl From<ServiceError> for Error {
    fn from(e: ServiceError) -> Self {
        Error::Service(e)
    }
}

impl From<RulesError> for Error {
    fn from(e: RulesError) -> Self {
        Error::Rules(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}
