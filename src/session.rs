//! Session: one engine, one controller and the view that draws them.
//!
//! The session owns the engine outright and applies every [`Reaction`] the
//! controller produces, so a host only needs to feed it terminal key events
//! and frame ticks. Nothing here touches the terminal, which keeps a whole
//! game scriptable in tests.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::{Controller, Event, Reaction, Simulation};
use crate::input::{is_interrupt, is_quit_key, key_id};
use crate::term::{FrameBuffer, GameView, TileStats, Viewport};

/// Whether the host loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<S: Simulation> {
    sim: S,
    controller: Controller,
    view: GameView,
}

impl<S: Simulation> Session<S> {
    pub fn new(sim: S, controller: Controller, cell_size: u16) -> Self {
        let view = GameView::for_simulation(&sim, cell_size);
        Self {
            sim,
            controller,
            view,
        }
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    /// Fold one event and apply its engine commands.
    pub fn handle(&mut self, event: Event) -> Reaction {
        let reaction = self.controller.handle(event);
        reaction.apply_to(&mut self.sim);
        reaction
    }

    /// Frame callback. `now_ms` is milliseconds since the session started.
    pub fn tick(&mut self, now_ms: u64) -> Reaction {
        self.handle(Event::Tick { now_ms })
    }

    /// Route a terminal key event.
    ///
    /// Ctrl+C always quits; `q` quits only when nothing else handled it.
    pub fn on_key(&mut self, key: &KeyEvent) -> Flow {
        if is_interrupt(key) {
            return Flow::Quit;
        }
        let Some(id) = key_id(key) else {
            return Flow::Continue;
        };

        let quit_key = is_quit_key(&id);
        let event = match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Event::KeyDown(id),
            KeyEventKind::Release => Event::KeyUp(id),
        };
        let is_down = matches!(event, Event::KeyDown(_));
        let reaction = self.handle(event);

        if is_down && quit_key && !reaction.handled {
            tracing::info!(score = self.sim.current_score(), "quit requested");
            return Flow::Quit;
        }
        Flow::Continue
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) -> Option<TileStats> {
        if self.view.too_small(viewport) {
            self.view.render_too_small(viewport, fb);
            return None;
        }
        self.view
            .render_into(&self.sim, &self.controller, viewport, fb)
    }
}
