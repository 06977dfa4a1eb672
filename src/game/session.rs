use crate::buffer::{BitBuffer, BitSink};
use crate::codec::{encode_move, DecodeStep, Decoder};
use crate::config::Config;
use crate::error::{Error, ServiceError};
use crate::pulse::{Actuator, PulseScheduler};
use crate::rules::RulesEngine;
use crate::suggest::{MoveSuggester, SuggestionRequest};
use crate::sync::CloseSignal;
use crate::types::{Bit, Move, Side};

use super::{GameSummary, LoopState};

/// One game: the board, the assigned side and the input buffer.
///
/// The session is the only consumer of its buffer. Producers get a
/// [`BitSink`] from [`GameSession::sink`].
pub struct GameSession<R> {
    rules: R,
    side: Option<Side>,
    state: LoopState,
    plies: usize,
    buffer: BitBuffer,
    pulses: PulseScheduler,
    suggester: Box<dyn MoveSuggester>,
}

impl<R: RulesEngine> GameSession<R> {
    pub fn new(
        rules: R,
        config: &Config,
        suggester: Box<dyn MoveSuggester>,
        actuator: Box<dyn Actuator>,
        close: CloseSignal,
    ) -> Self {
        GameSession {
            rules,
            side: None,
            state: LoopState::AwaitingSideAssignment,
            plies: 0,
            buffer: BitBuffer::new(config.poll_interval, close),
            pulses: PulseScheduler::new(actuator, config),
            suggester,
        }
    }

    #[must_use]
    pub fn sink(&self) -> BitSink {
        self.buffer.sink()
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn plies(&self) -> usize {
        self.plies
    }

    #[must_use]
    pub fn buffer(&self) -> &BitBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            side: self.side,
            plies: self.plies,
            fen: self.rules.fen(),
            outcome: self.rules.outcome(),
        }
    }

    /// Back to the start position with no side assigned and an empty buffer.
    pub fn reset(&mut self) {
        self.rules.reset();
        self.buffer.reset();
        self.side = None;
        self.plies = 0;
        self.state = LoopState::AwaitingSideAssignment;
        log::info!("session reset");
    }

    /// Run until the game is over or an error ends it.
    pub async fn run(&mut self) -> Result<GameSummary, Error> {
        while self.step().await? != LoopState::Terminal {}
        let summary = self.summary();
        log::info!("game over: {summary}");
        Ok(summary)
    }

    /// Perform the work of the current state and move to the next one.
    pub async fn step(&mut self) -> Result<LoopState, Error> {
        match (self.state, self.side) {
            (LoopState::AwaitingSideAssignment, _) | (_, None) => {
                self.assign_side().await?;
            }
            (LoopState::Output, Some(side)) => {
                let mv = self.output_turn(side).await?;
                self.record(mv);
            }
            (LoopState::Input, Some(side)) => {
                let mv = self.input_turn(side).await?;
                self.record(mv);
            }
            (LoopState::Terminal, Some(_)) => return Ok(LoopState::Terminal),
        }
        let next = self.next_state();
        if next != self.state {
            log::debug!("{} -> {}", self.state, next);
        }
        self.state = next;
        Ok(next)
    }

    /// Consume one symbol as the side (`0` white, `1` black), clear whatever
    /// else was entered, and acknowledge.
    pub async fn assign_side(&mut self) -> Result<Side, Error> {
        log::info!("waiting for side assignment");
        let bits = self.buffer.take(1).await?;
        let side = match bits.first() {
            Some(Bit::One) => Side::Black,
            _ => Side::White,
        };
        self.buffer.reset();
        self.side = Some(side);
        self.state = self.next_state();
        log::info!("assigned side {side}");
        self.pulses.signal().await;
        Ok(side)
    }

    fn next_state(&self) -> LoopState {
        match self.side {
            None => LoopState::AwaitingSideAssignment,
            Some(_) if self.rules.is_game_over() => LoopState::Terminal,
            Some(side) if self.rules.turn() == side => LoopState::Output,
            Some(_) => LoopState::Input,
        }
    }

    fn record(&mut self, mv: Move) {
        self.plies += 1;
        log::debug!("ply {}: {mv}, position {}", self.plies, self.rules.fen());
    }

    async fn output_turn(&mut self, side: Side) -> Result<Move, Error> {
        let request = SuggestionRequest {
            fen: self.rules.fen(),
            legal_moves: self.rules.legal_moves(),
        };
        let mv = self.suggester.suggest(&request).await.map_err(|e| {
            log::warn!("no suggestion for '{}': {e}", request.fen);
            e
        })?;
        let listed = request
            .legal_moves
            .iter()
            .any(|legal| legal.from == mv.from && legal.to == mv.to);
        if !listed {
            return Err(ServiceError::IllegalSuggestion {
                notation: mv.to_string(),
            }
            .into());
        }

        let pattern = encode_move(&self.rules, mv, side)?;
        log::info!("output {mv} as '{pattern}'");
        self.pulses.play(&pattern).await;
        self.rules.push(mv)?;
        Ok(mv)
    }

    async fn input_turn(&mut self, side: Side) -> Result<Move, Error> {
        log::info!("waiting for input move");
        let mv = {
            let mut decoder = Decoder::new(&self.rules, side);
            let mut step = decoder.step();
            loop {
                match step {
                    DecodeStep::Decoded(mv) => break mv,
                    DecodeStep::Need(demand) => {
                        if demand.ambiguous {
                            log::info!("ambiguous so far, need {} more bit(s)", demand.bits);
                            self.pulses.signal().await;
                        }
                        let bits = self.buffer.take(demand.bits).await?;
                        step = decoder.feed(&bits)?;
                    }
                }
            }
        };
        log::info!("input {mv}");
        self.rules.push(mv)?;
        Ok(mv)
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for GameSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("rules", &self.rules)
            .field("side", &self.side)
            .field("state", &self.state)
            .field("plies", &self.plies)
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pulse::RecordingActuator;
    use crate::rules::StandardBoard;
    use crate::suggest::RandomSuggester;
    use std::time::Duration;

    fn config() -> Config {
        Config::from_options([("await playback", "false"), ("poll interval ms", "5")]).unwrap()
    }

    fn session(actuator: RecordingActuator) -> GameSession<StandardBoard> {
        GameSession::new(
            StandardBoard::new(),
            &config(),
            Box::new(RandomSuggester::with_seed(3)),
            Box::new(actuator),
            CloseSignal::new(),
        )
    }

    #[tokio::test]
    async fn test_side_assignment_resets_buffer_and_acknowledges() {
        let actuator = RecordingActuator::new();
        let mut session = session(actuator.clone());
        session.sink().push_str("1 0110").unwrap();

        assert_eq!(session.step().await, Ok(LoopState::Input));
        assert_eq!(session.side(), Some(Side::Black));
        assert!(session.buffer().is_empty());
        assert_eq!(actuator.count(), 1);
        assert_eq!(actuator.played()[0].len(), 1);
        assert_eq!(actuator.played()[0][0].active, Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_white_plays_first_output_turn() {
        let actuator = RecordingActuator::new();
        let mut session = session(actuator.clone());
        session.sink().push(Bit::Zero);

        assert_eq!(session.step().await, Ok(LoopState::Output));
        assert_eq!(session.step().await, Ok(LoopState::Input));
        assert_eq!(session.plies(), 1);
        assert_eq!(session.rules().history().len(), 1);
        assert_eq!(actuator.count(), 2);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut session = session(RecordingActuator::new());
        session.sink().push(Bit::Zero);
        session.step().await.unwrap();
        session.step().await.unwrap();
        session.sink().push_str("01").unwrap();

        session.reset();
        assert_eq!(session.state(), LoopState::AwaitingSideAssignment);
        assert_eq!(session.side(), None);
        assert_eq!(session.plies(), 0);
        assert!(session.buffer().is_empty());
        assert!(session.rules().history().is_empty());
    }
}
