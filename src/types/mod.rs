//! Core value types shared by the codec, the buffer and the game loop.
//!
//! - `Square` - board square (index 0-63, a1 = 0)
//! - `PieceType` and `Side` - piece kinds with their 3-bit codes, and colors
//! - `Move` - coordinate move as exchanged with the rules engine
//! - `Bit` - one input symbol

mod bit;
mod moves;
mod piece;
mod square;

pub use bit::Bit;
pub use moves::Move;
pub use piece::{PieceType, Side};
pub use square::Square;
