// Input events delivered to the terminal screen
//
// The input dispatcher hands us one of two modalities: a touch with a
// vertical coordinate, or a hardware button press identified by a numeric
// code. Events are transient and consumed once.

/// Button code that fires the panic sequence on a single press
pub const BUTTON_PANIC: i32 = 1;

/// Button code that scrolls the log up
pub const BUTTON_UP: i32 = 2;

/// Button code that scrolls the log down
pub const BUTTON_DOWN: i32 = 4;

/// A single activation from the input dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Touch at vertical position `y` (device pixels, 0 = top of screen)
    Touch { y: i32 },

    /// Hardware button / joystick press
    ButtonPress { code: i32 },
}

impl InputEvent {
    pub fn touch(y: i32) -> Self {
        Self::Touch { y }
    }

    pub fn button(code: i32) -> Self {
        Self::ButtonPress { code }
    }
}
