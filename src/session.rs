//! Game session
//!
//! Owns the simulation state and its two output collaborators. The host calls
//! [`GameSession::on_input`] for every activate event and
//! [`GameSession::advance`] once per display frame, both from the same thread.

use crate::audio::{AudioManager, SoundEffect};
use crate::render::{Frame, Renderer};
use crate::sim::{self, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

pub struct GameSession {
    state: GameState,
    audio: AudioManager,
    renderer: Box<dyn Renderer>,
    events: Vec<GameEvent>,
    render_failures: u64,
}

impl GameSession {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        audio: AudioManager,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        log::info!("Session created with seed {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            audio,
            renderer,
            events: Vec::new(),
            render_failures: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    /// Copy of the current drawable state
    pub fn snapshot(&self) -> Frame {
        Frame::capture(&self.state)
    }

    /// Render errors swallowed so far
    pub fn render_failures(&self) -> u64 {
        self.render_failures
    }

    /// One activate input: start, flap or restart depending on the phase
    pub fn on_input(&mut self) {
        sim::activate(&mut self.state, &mut self.events);
        self.dispatch_events();
    }

    /// Advance one frame and draw it
    ///
    /// Outside Running the state is left alone; the frame is still drawn so
    /// the start prompt and game-over overlay stay on screen.
    pub fn advance(&mut self) {
        sim::tick(&mut self.state, &mut self.events);
        self.dispatch_events();

        let frame = self.snapshot();
        if let Err(e) = self.renderer.draw(&frame) {
            self.render_failures += 1;
            log::warn!("Render failed: {e:#}");
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.events.drain(..) {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
        }
    }
}
