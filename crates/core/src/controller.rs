//! Controller - folds input, menu and frame events into engine commands.
//!
//! The controller owns every piece of presentation state (loop clock, overlay
//! state machine, binding table). Hosts feed it one [`Event`] at a time and
//! apply the returned [`Reaction`] to their engine; nothing here holds a
//! reference to the engine itself, which keeps the whole state machine
//! testable with synthetic event sequences.

use arrayvec::ArrayVec;

use blockfall_engine::Simulation;
use blockfall_input::{BindingTable, KeyId};

use crate::clock::{ClockConfig, ClockConfigError, LoopClock};
use crate::menu::{MenuState, Overlay, PauseButton, Trigger};
use crate::types::{Action, KEY_RELEASE_TIMEOUT_MS};

/// What the pause and settings panels can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Resume,
    Reset,
    OpenSettings,
    Rebind { action: Action, key: KeyId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    KeyDown(KeyId),
    KeyUp(KeyId),
    /// Host frame callback; `now_ms` is monotonic time since session start.
    Tick { now_ms: u64 },
    Menu(MenuAction),
}

/// A single call into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Reset,
    AdvanceStride,
    AdvanceFall,
    Rotate,
    ShiftLeft,
    ShiftRight,
}

impl EngineCommand {
    pub fn apply<S: Simulation + ?Sized>(self, sim: &mut S) {
        match self {
            EngineCommand::Reset => sim.reset_state(),
            EngineCommand::AdvanceStride => sim.advance_stride(),
            EngineCommand::AdvanceFall => sim.advance_fall(),
            EngineCommand::Rotate => sim.rotate_active_piece(),
            EngineCommand::ShiftLeft => sim.shift_left(),
            EngineCommand::ShiftRight => sim.shift_right(),
        }
    }
}

/// Result of folding one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reaction {
    /// Engine calls to make, in order.
    pub commands: ArrayVec<EngineCommand, 4>,
    /// The event was consumed; hosts must not give it a default meaning.
    pub handled: bool,
    /// A playing frame: the board should be repainted now.
    pub redraw: bool,
}

impl Reaction {
    fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    fn command(cmd: EngineCommand) -> Self {
        let mut r = Self::handled();
        r.commands.push(cmd);
        r
    }

    /// Apply every command to `sim`.
    pub fn apply_to<S: Simulation + ?Sized>(&self, sim: &mut S) {
        for cmd in &self.commands {
            cmd.apply(sim);
        }
    }
}

/// A soft drop that is currently held down.
#[derive(Debug, Clone)]
struct SoftDropHold {
    key: KeyId,
    last_seen_ms: u64,
}

#[derive(Debug)]
pub struct Controller {
    clock: LoopClock,
    menu: MenuState,
    bindings: BindingTable,
    soft_drop: Option<SoftDropHold>,
    release_timeout_ms: Option<u64>,
}

impl Controller {
    pub fn new(config: ClockConfig, bindings: BindingTable) -> Result<Self, ClockConfigError> {
        Ok(Self {
            clock: LoopClock::new(config)?,
            menu: MenuState::new(),
            bindings,
            soft_drop: None,
            release_timeout_ms: Some(KEY_RELEASE_TIMEOUT_MS),
        })
    }

    /// Release held keys implicitly after `timeout_ms` without a repeat.
    ///
    /// `None` for hosts that report key releases.
    pub fn with_release_timeout(mut self, timeout_ms: Option<u64>) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn clock(&self) -> &LoopClock {
        &self.clock
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn overlay(&self) -> Overlay {
        self.menu.overlay()
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn handle(&mut self, event: Event) -> Reaction {
        match event {
            Event::Tick { now_ms } => self.on_tick(now_ms),
            Event::KeyDown(key) => self.on_key_down(key),
            Event::KeyUp(key) => self.on_key_up(&key),
            Event::Menu(action) => self.on_menu(action),
        }
    }

    fn on_tick(&mut self, now_ms: u64) -> Reaction {
        let expired = match (&self.soft_drop, self.release_timeout_ms) {
            (Some(hold), Some(timeout)) => now_ms.saturating_sub(hold.last_seen_ms) > timeout,
            _ => false,
        };
        if expired {
            tracing::debug!("soft drop released by timeout");
            self.release_soft_drop();
        }

        let playing = self.menu.is_playing();
        let cadence = self.clock.tick(now_ms, playing);

        let mut r = Reaction::handled();
        if cadence.stride {
            r.commands.push(EngineCommand::AdvanceStride);
        }
        if cadence.fall {
            r.commands.push(EngineCommand::AdvanceFall);
        }
        r.redraw = playing;
        r
    }

    fn on_key_down(&mut self, key: KeyId) -> Reaction {
        if key.is_escape() {
            self.menu.apply(Trigger::TogglePause);
            return Reaction::handled();
        }

        if !self.menu.is_playing() {
            return self.on_menu_key(key);
        }

        // Looked up per event so a rebind applies to the very next key.
        match self.bindings.action_for(&key) {
            Some(Action::RotateCw) => Reaction::command(EngineCommand::Rotate),
            Some(Action::MoveLeft) => Reaction::command(EngineCommand::ShiftLeft),
            Some(Action::MoveRight) => Reaction::command(EngineCommand::ShiftRight),
            Some(Action::SoftDrop) => {
                let now = self.clock.previous_tick_ms();
                match &mut self.soft_drop {
                    Some(hold) => hold.last_seen_ms = now,
                    None => {
                        self.clock.engage_soft_drop();
                        self.soft_drop = Some(SoftDropHold {
                            key,
                            last_seen_ms: now,
                        });
                    }
                }
                Reaction::handled()
            }
            None => Reaction::default(),
        }
    }

    fn on_key_up(&mut self, key: &KeyId) -> Reaction {
        let held = self.soft_drop.as_ref().is_some_and(|h| &h.key == key);
        let level = self
            .bindings
            .action_for(key)
            .is_some_and(|a| a.is_level_triggered());
        if held || level {
            self.release_soft_drop();
            return Reaction::handled();
        }
        Reaction::default()
    }

    fn release_soft_drop(&mut self) {
        self.soft_drop = None;
        self.clock.release_soft_drop();
    }

    /// Keyboard navigation of the visible panel.
    fn on_menu_key(&mut self, key: KeyId) -> Reaction {
        if let Some(action) = self.menu.capturing() {
            return self.on_menu(MenuAction::Rebind { action, key });
        }

        match key.as_str() {
            "ArrowUp" => self.menu.move_focus(false),
            "ArrowDown" | "Tab" => self.menu.move_focus(true),
            "Enter" | " " => {
                return match self.menu.overlay() {
                    Overlay::Paused => {
                        let action = match self.menu.focused_button() {
                            PauseButton::Resume => MenuAction::Resume,
                            PauseButton::Reset => MenuAction::Reset,
                            PauseButton::Settings => MenuAction::OpenSettings,
                        };
                        self.on_menu(action)
                    }
                    Overlay::Settings => {
                        self.menu.begin_capture();
                        Reaction::handled()
                    }
                    Overlay::Playing => Reaction::default(),
                };
            }
            _ => return Reaction::default(),
        }
        Reaction::handled()
    }

    fn on_menu(&mut self, action: MenuAction) -> Reaction {
        match action {
            MenuAction::Resume => {
                if self.menu.overlay() == Overlay::Paused {
                    self.menu.apply(Trigger::TogglePause);
                }
                Reaction::handled()
            }
            MenuAction::Reset => {
                if self.menu.apply(Trigger::Reset) {
                    Reaction::command(EngineCommand::Reset)
                } else {
                    Reaction::handled()
                }
            }
            MenuAction::OpenSettings => {
                self.menu.apply(Trigger::OpenSettings);
                Reaction::handled()
            }
            MenuAction::Rebind { action, key } => {
                if self.menu.overlay() != Overlay::Settings {
                    tracing::debug!(action = action.as_str(), "rebind outside settings ignored");
                    return Reaction::default();
                }
                self.menu.end_capture();
                if let Err(e) = self.bindings.set(action, key) {
                    tracing::warn!(action = action.as_str(), error = %e, "rebind refused");
                }
                Reaction::handled()
            }
        }
    }
}
