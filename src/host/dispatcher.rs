// Command dispatcher for the simulated device
//
// Fire-and-forget: commands are logged, remembered for the options menu and
// pushed to whatever background task is listening. Nobody waits on them.

use crate::terminal::CommandDispatcher;
use std::cell::RefCell;
use tokio::sync::mpsc;

/// How many executed commands the options menu keeps
const HISTORY_LIMIT: usize = 16;

pub struct ChannelDispatcher {
    commands: mpsc::UnboundedSender<String>,
    history: RefCell<Vec<String>>,
}

impl ChannelDispatcher {
    pub fn new(commands: mpsc::UnboundedSender<String>) -> Self {
        Self {
            commands,
            history: RefCell::new(Vec::new()),
        }
    }

    /// Most recent commands, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl CommandDispatcher for ChannelDispatcher {
    fn execute(&self, command: &str) {
        tracing::info!("Executing command: {}", command);

        {
            let mut history = self.history.borrow_mut();
            if history.len() >= HISTORY_LIMIT {
                history.remove(0);
            }
            history.push(command.to_string());
        }

        // No listener is fine: nothing is running to stop
        let _ = self.commands.send(command.to_string());
    }
}
