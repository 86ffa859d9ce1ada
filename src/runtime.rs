use std::sync::mpsc::{self, Receiver, RecvError};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};

use crate::asset::IconImage;
use crate::error::SessionError;
use crate::session::{Outcome, Session};
use crate::trial::Response;
use crate::ui::SessionView;

pub const USAGE_HINT: &str =
    "Invalid key. Press 'k' for こ, 't' for そ, 'a' for あ, and 'q' to quit.";

/// Raw terminal event as delivered by the surface
#[derive(Clone, Debug)]
pub enum SurfaceEvent {
    Key(KeyEvent),
    Resize,
}

/// Operator intent after key translation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Respond(Response),
    Redraw,
    Quit,
    Unrecognized,
}

impl InputEvent {
    /// Fixed key map: k/t/a answer, Enter redraws, q or Ctrl+C quits.
    pub fn from_key(key: KeyEvent) -> Self {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => InputEvent::Quit,
                _ => InputEvent::Unrecognized,
            };
        }
        match key.code {
            KeyCode::Char('k') => InputEvent::Respond(Response::Ko),
            KeyCode::Char('t') => InputEvent::Respond(Response::So),
            KeyCode::Char('a') => InputEvent::Respond(Response::A),
            KeyCode::Char('q') => InputEvent::Quit,
            KeyCode::Enter => InputEvent::Redraw,
            _ => InputEvent::Unrecognized,
        }
    }
}

/// Source of terminal events (keyboard, resize)
pub trait SurfaceEventSource: Send + 'static {
    /// Block until the next event. Errors once the source is gone for good.
    fn recv(&self) -> Result<SurfaceEvent, RecvError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<SurfaceEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(SurfaceEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(SurfaceEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceEventSource for CrosstermEventSource {
    fn recv(&self) -> Result<SurfaceEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SurfaceEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SurfaceEvent>) -> Self {
        Self { rx }
    }
}

impl SurfaceEventSource for TestEventSource {
    fn recv(&self) -> Result<SurfaceEvent, RecvError> {
        self.rx.recv()
    }
}

/// What the runner hands to the session loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Input(InputEvent),
    Resize,
}

/// Runner that pulls one event at a time from the surface
pub struct Runner<E: SurfaceEventSource> {
    event_source: E,
}

impl<E: SurfaceEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks for the next key press or resize. A closed source reads as a quit.
    pub fn step(&self) -> Step {
        loop {
            match self.event_source.recv() {
                Ok(SurfaceEvent::Key(key)) if key.kind != KeyEventKind::Press => continue,
                Ok(SurfaceEvent::Key(key)) => return Step::Input(InputEvent::from_key(key)),
                Ok(SurfaceEvent::Resize) => return Step::Resize,
                Err(RecvError) => return Step::Input(InputEvent::Quit),
            }
        }
    }

    /// Event loop: paint, handle one event, repaint, until the session completes or quits.
    pub fn run<B: Backend, R: Rng>(
        &self,
        terminal: &mut Terminal<B>,
        session: &mut Session<R>,
        icon: &IconImage,
    ) -> Result<Outcome, SessionError> {
        terminal.draw(|f| f.render_widget(&SessionView::new(session, icon), f.area()))?;

        loop {
            let outcome = match self.step() {
                Step::Resize => Outcome::Redraw,
                Step::Input(input) => session.dispatch(input)?,
            };

            match outcome {
                Outcome::Completed | Outcome::Quit => return Ok(outcome),
                Outcome::Recorded | Outcome::Redraw | Outcome::Hint => {
                    terminal
                        .draw(|f| f.render_widget(&SessionView::new(session, icon), f.area()))?;
                }
            }
        }
    }
}
