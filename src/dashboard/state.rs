//! Shared view state between the key listener and the render loop
//!
//! The listener is the only writer. The render loop reads the state once per
//! frame and acknowledges a pending refresh in the same critical section, so
//! a focus change and its refresh request are always observed together.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

/// What the dashboard should currently show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Cleared on quit; the render loop stops once it sees `false`
    pub running: bool,
    /// Set by key presses that should redraw immediately
    pub refresh_requested: bool,
    /// 0 = grid, 1-4 = a single focused panel
    pub focused_panel: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            running: true,
            refresh_requested: false,
            focused_panel: 0,
        }
    }
}

/// Interpretation of one keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    Focus(u8),
    Ignore,
}

impl KeyAction {
    /// Map a raw character to an action (`0x03` is Ctrl+C in raw mode)
    pub fn from_char(ch: char) -> Self {
        match ch {
            'q' | 'Q' | '\x03' => KeyAction::Quit,
            'r' => KeyAction::Refresh,
            '0'..='4' => KeyAction::Focus(ch as u8 - b'0'),
            _ => KeyAction::Ignore,
        }
    }
}

/// Cloneable handle to the view state plus a wake-up signal for the render loop
#[derive(Debug, Clone, Default)]
pub struct SharedView {
    state: Arc<Mutex<ViewState>>,
    wake: Arc<Notify>,
}

impl SharedView {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        // A panicked holder cannot leave the three fields half-written
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ViewState {
        *self.lock()
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Apply a keystroke and wake the render loop if it changed anything
    pub fn apply_key(&self, ch: char) -> KeyAction {
        let action = KeyAction::from_char(ch);
        {
            let mut state = self.lock();
            match action {
                KeyAction::Quit => state.running = false,
                KeyAction::Refresh => state.refresh_requested = true,
                KeyAction::Focus(panel) => {
                    state.focused_panel = panel;
                    state.refresh_requested = true;
                }
                KeyAction::Ignore => return action,
            }
        }
        self.wake.notify_one();
        action
    }

    /// Request shutdown from outside the listener (Ctrl+C, errors, tests)
    pub fn stop(&self) {
        self.lock().running = false;
        self.wake.notify_one();
    }

    /// State for the next frame; acknowledges any pending refresh request
    pub fn take_frame(&self) -> ViewState {
        let mut state = self.lock();
        let frame = *state;
        state.refresh_requested = false;
        frame
    }

    /// Resolves after the next state change
    ///
    /// A change made while nobody is waiting is remembered, so a key pressed
    /// during a redraw still cuts the following wait short.
    pub async fn changed(&self) {
        self.wake.notified().await;
    }
}
