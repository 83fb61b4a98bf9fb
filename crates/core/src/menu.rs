//! Overlay state machine.
//!
//! ```text
//!   Playing --toggle-pause--> Paused --toggle-pause--> Playing
//!                             Paused --open-settings--> Settings
//!                             Paused --reset----------> Playing   (+ engine reset)
//!   Settings --toggle-pause--> Paused
//! ```
//!
//! Any other pair is a no-op. Settings never returns to Playing directly.
//! Alongside the overlay this keeps the keyboard focus of the pause buttons
//! and settings selectors, since a terminal has no pointer to click with.

use crate::types::Action;

/// Which surface is visible. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Playing,
    Paused,
    Settings,
}

impl Overlay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overlay::Playing => "playing",
            Overlay::Paused => "paused",
            Overlay::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    TogglePause,
    OpenSettings,
    Reset,
}

/// Buttons on the pause panel, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseButton {
    Resume,
    Reset,
    Settings,
}

impl PauseButton {
    pub const ALL: [PauseButton; 3] = [PauseButton::Resume, PauseButton::Reset, PauseButton::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            PauseButton::Resume => "Resume",
            PauseButton::Reset => "Reset",
            PauseButton::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuState {
    overlay: Overlay,
    pause_focus: usize,
    settings_focus: usize,
    capturing: Option<Action>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn is_playing(&self) -> bool {
        self.overlay == Overlay::Playing
    }

    /// Apply a trigger. Returns whether the overlay changed.
    pub fn apply(&mut self, trigger: Trigger) -> bool {
        let next = match (self.overlay, trigger) {
            (Overlay::Playing, Trigger::TogglePause) => Overlay::Paused,
            (Overlay::Paused, Trigger::TogglePause) => Overlay::Playing,
            (Overlay::Paused, Trigger::OpenSettings) => Overlay::Settings,
            (Overlay::Paused, Trigger::Reset) => Overlay::Playing,
            (Overlay::Settings, Trigger::TogglePause) => Overlay::Paused,
            (from, trigger) => {
                tracing::debug!(from = from.as_str(), ?trigger, "ignored overlay trigger");
                return false;
            }
        };

        tracing::debug!(from = self.overlay.as_str(), to = next.as_str(), "overlay");
        match (self.overlay, next) {
            (Overlay::Playing, Overlay::Paused) => self.pause_focus = 0,
            (_, Overlay::Settings) => self.settings_focus = 0,
            _ => {}
        }
        self.capturing = None;
        self.overlay = next;
        true
    }

    pub fn focused_button(&self) -> PauseButton {
        PauseButton::ALL[self.pause_focus]
    }

    pub fn focused_action(&self) -> Action {
        Action::ALL[self.settings_focus]
    }

    /// Move focus within the visible panel, wrapping around.
    pub fn move_focus(&mut self, down: bool) {
        let (focus, len) = match self.overlay {
            Overlay::Playing => return,
            Overlay::Paused => (&mut self.pause_focus, PauseButton::ALL.len()),
            Overlay::Settings => {
                if self.capturing.is_some() {
                    return;
                }
                (&mut self.settings_focus, Action::ALL.len())
            }
        };
        *focus = if down {
            (*focus + 1) % len
        } else {
            (*focus + len - 1) % len
        };
    }

    /// Start waiting for a key for the focused selector.
    pub fn begin_capture(&mut self) {
        if self.overlay == Overlay::Settings {
            self.capturing = Some(self.focused_action());
        }
    }

    /// The selector currently waiting for a key.
    pub fn capturing(&self) -> Option<Action> {
        self.capturing
    }

    pub fn end_capture(&mut self) {
        self.capturing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(overlay: Overlay) -> MenuState {
        let mut m = MenuState::new();
        match overlay {
            Overlay::Playing => {}
            Overlay::Paused => {
                m.apply(Trigger::TogglePause);
            }
            Overlay::Settings => {
                m.apply(Trigger::TogglePause);
                m.apply(Trigger::OpenSettings);
            }
        }
        assert_eq!(m.overlay(), overlay);
        m
    }

    #[test]
    fn starts_playing() {
        assert!(MenuState::new().is_playing());
    }

    #[test]
    fn transition_table() {
        use Overlay::*;
        use Trigger::*;

        let cases = [
            (Playing, TogglePause, Paused, true),
            (Playing, OpenSettings, Playing, false),
            (Playing, Reset, Playing, false),
            (Paused, TogglePause, Playing, true),
            (Paused, OpenSettings, Settings, true),
            (Paused, Reset, Playing, true),
            (Settings, TogglePause, Paused, true),
            (Settings, OpenSettings, Settings, false),
            (Settings, Reset, Settings, false),
        ];

        for (from, trigger, to, changed) in cases {
            let mut m = at(from);
            assert_eq!(m.apply(trigger), changed, "{from:?} {trigger:?}");
            assert_eq!(m.overlay(), to, "{from:?} {trigger:?}");
        }
    }

    #[test]
    fn focus_wraps() {
        let mut m = at(Overlay::Paused);
        assert_eq!(m.focused_button(), PauseButton::Resume);
        m.move_focus(false);
        assert_eq!(m.focused_button(), PauseButton::Settings);
        m.move_focus(true);
        assert_eq!(m.focused_button(), PauseButton::Resume);
    }

    #[test]
    fn pausing_again_focuses_resume() {
        let mut m = at(Overlay::Paused);
        m.move_focus(true);
        assert_eq!(m.focused_button(), PauseButton::Reset);
        m.apply(Trigger::Reset);

        m.apply(Trigger::TogglePause);
        assert_eq!(m.focused_button(), PauseButton::Resume);
    }

    #[test]
    fn returning_from_settings_keeps_pause_focus() {
        let mut m = at(Overlay::Paused);
        m.move_focus(false);
        m.apply(Trigger::OpenSettings);
        m.apply(Trigger::TogglePause);
        assert_eq!(m.focused_button(), PauseButton::Settings);
    }

    #[test]
    fn capture_is_cleared_when_leaving_settings() {
        let mut m = at(Overlay::Settings);
        m.move_focus(true);
        m.begin_capture();
        assert_eq!(m.capturing(), Some(Action::MoveLeft));

        // Focus is locked while a key is awaited.
        m.move_focus(true);
        assert_eq!(m.focused_action(), Action::MoveLeft);

        m.apply(Trigger::TogglePause);
        assert_eq!(m.capturing(), None);
    }

    #[test]
    fn capture_only_in_settings() {
        let mut m = at(Overlay::Paused);
        m.begin_capture();
        assert_eq!(m.capturing(), None);
    }
}
