//! Collaborator contracts for the terminal screen
//!
//! The screen never reaches for globals. Everything outside the core is
//! injected through these traits:
//!
//! - [`Clock`] - monotonic millisecond source for gesture timing
//! - [`ScreenManager`] - switches the active screen, owns the status bar
//! - [`CommandDispatcher`] - fire-and-forget textual command execution
//! - [`View`] - the create/destroy/input contract every screen implements

use super::event::InputEvent;
use std::rc::Rc;
use std::time::Instant;

// ─────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────

/// Monotonic millisecond timestamp source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Clock backed by `Instant`, counting from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

// ─────────────────────────────────────────────────────────────
// Screen manager
// ─────────────────────────────────────────────────────────────

/// Screens the device can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Scrolling log output
    Terminal,
    /// Options/menu screen shown after an emergency stop
    OptionsMenu,
}

impl ViewId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Terminal => "TerminalView",
            ViewId::OptionsMenu => "OptionsMenuView",
        }
    }
}

/// Display-side collaborator
pub trait ScreenManager {
    /// Make `view` the active screen
    fn switch_view(&self, view: ViewId);

    /// Show a status bar with `label`; cosmetic
    fn register_status_bar(&self, label: &str);
}

impl<T: ScreenManager + ?Sized> ScreenManager for Rc<T> {
    fn switch_view(&self, view: ViewId) {
        (**self).switch_view(view)
    }

    fn register_status_bar(&self, label: &str) {
        (**self).register_status_bar(label)
    }
}

// ─────────────────────────────────────────────────────────────
// Command dispatcher
// ─────────────────────────────────────────────────────────────

/// Executes textual commands; no result is awaited
pub trait CommandDispatcher {
    fn execute(&self, command: &str);
}

impl<T: CommandDispatcher + ?Sized> CommandDispatcher for Rc<T> {
    fn execute(&self, command: &str) {
        (**self).execute(command)
    }
}

// ─────────────────────────────────────────────────────────────
// View contract
// ─────────────────────────────────────────────────────────────

/// Input handler reference handed to the host's input dispatch
pub type InputCallback<V> = fn(&mut V, InputEvent);

/// Lifecycle and input contract for a screen
pub trait View {
    /// Stable name of the screen
    fn name(&self) -> &'static str;

    /// Allocate state; no-op when already created
    fn create(&mut self);

    /// Release state; no-op when not created
    fn destroy(&mut self);

    fn is_created(&self) -> bool;

    /// Handle one input event
    fn handle_input(&mut self, event: InputEvent);

    /// Function reference the host registers with its input dispatch
    fn input_callback(&self) -> InputCallback<Self>
    where
        Self: Sized,
    {
        Self::handle_input
    }
}
