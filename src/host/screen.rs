// Screen manager for the simulated device
//
// Tracks which screen is active and what the status bar says. The event
// loop reads this after every input and creates/destroys the terminal view
// to match.

use crate::terminal::{ScreenManager, ViewId};
use std::cell::{Cell, RefCell};

pub struct HostScreen {
    active: Cell<ViewId>,
    status_label: RefCell<Option<String>>,
}

impl HostScreen {
    pub fn new() -> Self {
        Self {
            active: Cell::new(ViewId::Terminal),
            status_label: RefCell::new(None),
        }
    }

    pub fn active(&self) -> ViewId {
        self.active.get()
    }

    pub fn status_label(&self) -> Option<String> {
        self.status_label.borrow().clone()
    }
}

impl Default for HostScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenManager for HostScreen {
    fn switch_view(&self, view: ViewId) {
        if self.active.replace(view) != view {
            tracing::info!("Switched to {}", view.as_str());
        }
    }

    fn register_status_bar(&self, label: &str) {
        *self.status_label.borrow_mut() = Some(label.to_string());
    }
}
