// Test doubles for the terminal collaborators

use super::traits::{Clock, CommandDispatcher, ScreenManager, ViewId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Clock that only moves when told to
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Records screen and dispatcher calls in one ordered log
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl ScreenManager for Recorder {
    fn switch_view(&self, view: ViewId) {
        self.0.borrow_mut().push(format!("switch:{}", view.as_str()));
    }

    fn register_status_bar(&self, label: &str) {
        self.0.borrow_mut().push(format!("status:{label}"));
    }
}

impl CommandDispatcher for Recorder {
    fn execute(&self, command: &str) {
        self.0.borrow_mut().push(format!("exec:{command}"));
    }
}
