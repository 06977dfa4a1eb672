//! Pulse patterns and their rendering.
//!
//! A [`PulsePattern`] is what the codec produces: groups of dits (`0`) and
//! dahs (`1`) separated by spaces. The [`PulseScheduler`] turns it into timed
//! (pause, active) steps and hands them to an [`Actuator`].

mod actuator;
mod pattern;
mod schedule;

pub use actuator::{Actuator, LogActuator, RecordingActuator};
pub use pattern::{PatternError, PulsePattern};
pub use schedule::{schedule, total_duration, PulseScheduler, PulseStep, PulseTimings};
