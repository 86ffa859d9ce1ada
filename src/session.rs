use rand::Rng;
use std::path::Path;

use crate::error::{OutOfTrials, SessionError};
use crate::logger::TrialLogger;
use crate::placer::RandomPlacer;
use crate::runtime::{InputEvent, USAGE_HINT};
use crate::sequencer::TrialSequencer;
use crate::trial::Trial;

pub const RECORDED_MESSAGE: &str = "Data has been recorded in the CSV file.";
pub const COMPLETED_MESSAGE: &str = "All frames have been completed.";
pub const FIRST_MESSAGE: &str = "Press Enter to place this frame again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingResponse,
    Complete,
}

/// What the surface should do after an input was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A response was logged and the next frame is pending.
    Recorded,
    /// Same frame with fresh positions, or a plain repaint after a resize.
    Redraw,
    /// Input was not understood; the status line carries the hint.
    Hint,
    /// Every frame has been answered.
    Completed,
    Quit,
}

/// One operator session: owns the side sequence, the placer and the log.
///
/// A pending trial is prepared as soon as its frame becomes current and is
/// only written to the log once a response is attached.
#[derive(Debug)]
pub struct Session<R: Rng> {
    sequencer: TrialSequencer,
    placer: RandomPlacer<R>,
    logger: TrialLogger,
    pending: Option<Trial>,
    state: SessionState,
    status: &'static str,
}

impl<R: Rng> Session<R> {
    pub fn new(sequencer: TrialSequencer, placer: RandomPlacer<R>, logger: TrialLogger) -> Self {
        log::info!("session started with {} trials", sequencer.len());
        let mut session = Self {
            sequencer,
            placer,
            logger,
            pending: None,
            state: SessionState::AwaitingResponse,
            status: FIRST_MESSAGE,
        };
        session.prepare();
        session
    }

    fn prepare(&mut self) {
        match self.sequencer.current() {
            Ok(side) => {
                let red_dot = self.placer.red_dot_position();
                let icon = self.placer.icon_box(side);
                let trial = Trial::new(self.sequencer.frame(), side, red_dot, icon);
                log::debug!("{}", trial.describe());
                self.pending = Some(trial);
                self.state = SessionState::AwaitingResponse;
            }
            Err(OutOfTrials) => {
                log::info!("session complete after {} responses", self.logger.rows());
                self.pending = None;
                self.state = SessionState::Complete;
                self.status = COMPLETED_MESSAGE;
            }
        }
    }

    pub fn dispatch(&mut self, input: InputEvent) -> Result<Outcome, SessionError> {
        if self.state == SessionState::Complete {
            return Ok(match input {
                InputEvent::Quit => Outcome::Quit,
                _ => Outcome::Completed,
            });
        }

        match input {
            InputEvent::Respond(response) => {
                let Some(trial) = self.pending.as_ref() else {
                    return Ok(Outcome::Completed);
                };
                self.logger.append(&trial.clone().respond(response))?;
                self.sequencer.advance();
                self.prepare();

                if self.state == SessionState::Complete {
                    Ok(Outcome::Completed)
                } else {
                    self.status = RECORDED_MESSAGE;
                    Ok(Outcome::Recorded)
                }
            }
            InputEvent::Redraw => {
                // new placement for the same frame, nothing is logged
                self.prepare();
                Ok(Outcome::Redraw)
            }
            InputEvent::Quit => {
                if let Some(trial) = &self.pending {
                    log::info!("quit with frame {} unanswered", trial.frame);
                }
                Ok(Outcome::Quit)
            }
            InputEvent::Unrecognized => {
                self.status = USAGE_HINT;
                Ok(Outcome::Hint)
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pending(&self) -> Option<&Trial> {
        self.pending.as_ref()
    }

    pub fn frame(&self) -> usize {
        self.sequencer.frame()
    }

    pub fn total(&self) -> usize {
        self.sequencer.len()
    }

    pub fn status(&self) -> &str {
        self.status
    }

    pub fn log_path(&self) -> &Path {
        self.logger.path()
    }

    pub fn recorded(&self) -> usize {
        self.logger.rows()
    }
}
