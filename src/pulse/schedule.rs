//! Pattern-to-timing conversion and playback.

use std::time::Duration;

use super::actuator::Actuator;
use super::pattern::PulsePattern;
use crate::config::Config;

/// One pulse: wait `pause`, then stay active for `active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseStep {
    pub pause: Duration,
    pub active: Duration,
}

/// Durations used when scheduling a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseTimings {
    pub dit: Duration,
    pub dah: Duration,
    pub intra_gap: Duration,
    pub inter_gap: Duration,
}

impl PulseTimings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        PulseTimings {
            dit: config.dit(),
            dah: config.dah(),
            intra_gap: config.intra_gap(),
            inter_gap: config.inter_gap(),
        }
    }
}

impl Default for PulseTimings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Convert a pattern into pulse steps.
///
/// The first pause is zero. Later pauses are the inter-group gap when the
/// preceding character was a separator, the intra-group gap otherwise.
#[must_use]
pub fn schedule(pattern: &PulsePattern, timings: &PulseTimings) -> Vec<PulseStep> {
    let mut steps = Vec::with_capacity(pattern.payload_len());
    let mut prev: Option<char> = None;
    for c in pattern.as_str().chars() {
        if c != ' ' {
            let pause = match prev {
                None => Duration::ZERO,
                Some(' ') => timings.inter_gap,
                Some(_) => timings.intra_gap,
            };
            let active = if c == '0' { timings.dit } else { timings.dah };
            steps.push(PulseStep { pause, active });
        }
        prev = Some(c);
    }
    steps
}

/// Time from the first pause to the end of the last pulse.
#[must_use]
pub fn total_duration(steps: &[PulseStep]) -> Duration {
    steps.iter().fold(Duration::ZERO, |total, s| {
        total.saturating_add(s.pause).saturating_add(s.active)
    })
}

/// Drives an [`Actuator`] with scheduled patterns.
pub struct PulseScheduler {
    actuator: Box<dyn Actuator>,
    timings: PulseTimings,
    await_playback: bool,
}

impl PulseScheduler {
    #[must_use]
    pub fn new(actuator: Box<dyn Actuator>, config: &Config) -> Self {
        PulseScheduler {
            actuator,
            timings: PulseTimings::from_config(config),
            await_playback: config.await_playback,
        }
    }

    #[must_use]
    pub fn timings(&self) -> &PulseTimings {
        &self.timings
    }

    /// Hand the pattern to the actuator. When playback is awaited, suspend
    /// for the length of the sequence before returning.
    pub async fn play(&self, pattern: &PulsePattern) {
        let steps = schedule(pattern, &self.timings);
        log::debug!("playing pattern '{pattern}'");
        self.actuator.actuate(&steps);
        if self.await_playback {
            tokio::time::sleep(total_duration(&steps)).await;
        }
    }

    /// The single-pulse acknowledgment / "need more input" signal.
    pub async fn signal(&self) {
        self.play(&PulsePattern::single()).await;
    }
}

impl std::fmt::Debug for PulseScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseScheduler")
            .field("timings", &self.timings)
            .field("await_playback", &self.await_playback)
            .finish_non_exhaustive()
    }
}
