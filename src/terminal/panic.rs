// Emergency stop sequence
//
// Leaves the terminal for the options menu, then tells every background
// subsystem to stop. Order is fixed; nothing is awaited.

use super::traits::{CommandDispatcher, ScreenManager, ViewId};

/// Stop commands, in the order they are issued
pub const STOP_COMMANDS: [&str; 7] = [
    "stop",
    "stopspam",
    "stopdeauth",
    "capture -stop",
    "stopportal",
    "gpsinfo -s",
    "blewardriving -s",
];

/// Screen shown once the sequence fires
pub const PANIC_TARGET: ViewId = ViewId::OptionsMenu;

/// Switch away from the terminal and issue every stop command
pub fn fire(screen: &dyn ScreenManager, dispatcher: &dyn CommandDispatcher) {
    tracing::warn!("Emergency stop: halting background tasks");

    screen.switch_view(PANIC_TARGET);
    for command in STOP_COMMANDS {
        dispatcher.execute(command);
    }
}
