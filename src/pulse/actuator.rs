//! Output devices.

use std::sync::Arc;

use parking_lot::Mutex;

use super::schedule::PulseStep;

/// Something that can play a pulse sequence, e.g. a vibration motor.
///
/// Playback is fire-and-forget: `actuate` should return promptly and the
/// device is expected to play the sequence on its own clock.
pub trait Actuator: Send + Sync {
    fn actuate(&self, steps: &[PulseStep]);
}

/// Writes each sequence to the log as dits and dahs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogActuator;

impl Actuator for LogActuator {
    fn actuate(&self, steps: &[PulseStep]) {
        let rendered: Vec<String> = steps
            .iter()
            .map(|step| {
                format!(
                    "{:.2}s/{:.2}s",
                    step.pause.as_secs_f64(),
                    step.active.as_secs_f64()
                )
            })
            .collect();
        log::info!("pulse sequence ({} steps): {}", steps.len(), rendered.join(" "));
    }
}

/// Keeps every sequence it is asked to play. Cloning shares the record.
#[derive(Debug, Default, Clone)]
pub struct RecordingActuator {
    played: Arc<Mutex<Vec<Vec<PulseStep>>>>,
}

impl RecordingActuator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sequence played so far, oldest first.
    #[must_use]
    pub fn played(&self) -> Vec<Vec<PulseStep>> {
        self.played.lock().clone()
    }

    /// Number of sequences played so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.played.lock().len()
    }
}

impl Actuator for RecordingActuator {
    fn actuate(&self, steps: &[PulseStep]) {
        self.played.lock().push(steps.to_vec());
    }
}

impl<A: Actuator + ?Sized> Actuator for Arc<A> {
    fn actuate(&self, steps: &[PulseStep]) {
        (**self).actuate(steps);
    }
}
