// Gesture recognition for the terminal screen
//
// Classifies each activation against timing windows and screen zones.
// The guard owns no collaborators: it only answers "what should happen",
// and the view carries the answer out.
//
// Touch timeline for one activation at `now`:
//
//   elapsed > reset window  -> repeat counter zeroed (stale gesture)
//   elapsed < debounce      -> ignored, timestamp kept
//   otherwise               -> timestamp = now, then zone decides
//
// The middle-zone panic check compares the count *before* incrementing, so
// with a threshold of 5 the seventh qualifying tap fires.
//
// Buttons skip both timing windows entirely.

use super::event::{InputEvent, BUTTON_DOWN, BUTTON_PANIC, BUTTON_UP};
use super::scroll::Zone;
use crate::config::GestureConfig;

/// What an activation resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Arrived inside the debounce window; nothing changed
    Debounced,
    /// Scroll the log up one batch
    ScrollUp,
    /// Scroll the log down one batch
    ScrollDown,
    /// Middle-zone tap counted; carries the new repeat count
    Counted(u32),
    /// Fire the panic sequence
    Panic,
    /// Unrecognized activation; nothing changed
    Ignored,
}

/// Timing state for the repeated-tap gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureState {
    pub last_activation_ms: u64,
    pub repeat_count: u32,
}

/// Timing-gated activation classifier
#[derive(Debug, Clone)]
pub struct GestureGuard {
    state: GestureState,
    config: GestureConfig,
    display_height: u32,
}

impl GestureGuard {
    /// Fresh guard; `now_ms` counts as the last activation
    pub fn new(config: GestureConfig, display_height: u32, now_ms: u64) -> Self {
        Self {
            state: GestureState {
                last_activation_ms: now_ms,
                repeat_count: 0,
            },
            config,
            display_height,
        }
    }

    /// Classify one activation at `now_ms`, updating state
    pub fn classify(&mut self, event: InputEvent, now_ms: u64) -> Gesture {
        match event {
            InputEvent::Touch { y } => self.classify_touch(y, now_ms),
            InputEvent::ButtonPress { code } => self.classify_button(code),
        }
    }

    fn classify_touch(&mut self, y: i32, now_ms: u64) -> Gesture {
        let elapsed = now_ms.saturating_sub(self.state.last_activation_ms);

        if elapsed > self.config.reset_window_ms {
            self.state.repeat_count = 0;
        }

        if elapsed < self.config.debounce_ms {
            return Gesture::Debounced;
        }

        self.state.last_activation_ms = now_ms;

        match Zone::classify(y, self.display_height) {
            Zone::Top => {
                self.state.repeat_count = 0;
                Gesture::ScrollUp
            }
            Zone::Bottom => {
                self.state.repeat_count = 0;
                Gesture::ScrollDown
            }
            Zone::Middle if self.state.repeat_count > self.config.panic_threshold => {
                Gesture::Panic
            }
            Zone::Middle => {
                self.state.repeat_count += 1;
                Gesture::Counted(self.state.repeat_count)
            }
        }
    }

    fn classify_button(&mut self, code: i32) -> Gesture {
        match code {
            BUTTON_PANIC => Gesture::Panic,
            BUTTON_UP => {
                self.state.repeat_count = 0;
                Gesture::ScrollUp
            }
            BUTTON_DOWN => {
                self.state.repeat_count = 0;
                Gesture::ScrollDown
            }
            _ => Gesture::Ignored,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> GestureState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: u32 = 320;
    const TOP: i32 = 10;
    const MIDDLE: i32 = 160;
    const BOTTOM: i32 = 300;

    fn guard_at(now: u64) -> GestureGuard {
        GestureGuard::new(GestureConfig::default(), HEIGHT, now)
    }

    #[test]
    fn test_debounced_touch_changes_nothing() {
        let mut guard = guard_at(0);
        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 200), Gesture::Counted(1));

        let before = guard.state();
        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 300), Gesture::Debounced);
        assert_eq!(guard.state(), before);
    }

    #[test]
    fn test_debounce_is_measured_from_last_accepted_touch() {
        let mut guard = guard_at(0);
        guard.classify(InputEvent::touch(MIDDLE), 200);

        // 100ms and 149ms after the accepted tap are both inside the window
        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 300), Gesture::Debounced);
        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 349), Gesture::Debounced);
        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 350), Gesture::Counted(2));
    }

    #[test]
    fn test_touch_right_after_create_is_debounced() {
        let mut guard = guard_at(1_000);
        assert_eq!(guard.classify(InputEvent::touch(TOP), 1_050), Gesture::Debounced);
    }

    #[test]
    fn test_top_zone_resets_count() {
        let mut guard = guard_at(0);
        guard.classify(InputEvent::touch(MIDDLE), 200);
        guard.classify(InputEvent::touch(MIDDLE), 400);
        assert_eq!(guard.state().repeat_count, 2);

        assert_eq!(guard.classify(InputEvent::touch(TOP), 600), Gesture::ScrollUp);
        assert_eq!(guard.state().repeat_count, 0);

        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 800), Gesture::Counted(1));
    }

    #[test]
    fn test_bottom_zone_resets_count() {
        let mut guard = guard_at(0);
        guard.classify(InputEvent::touch(MIDDLE), 200);

        assert_eq!(guard.classify(InputEvent::touch(BOTTOM), 400), Gesture::ScrollDown);
        assert_eq!(guard.state().repeat_count, 0);
    }

    #[test]
    fn test_stale_gesture_resets_count() {
        let mut guard = guard_at(0);
        for i in 1..=4 {
            guard.classify(InputEvent::touch(MIDDLE), i * 200);
        }
        assert_eq!(guard.state().repeat_count, 4);

        // 1501ms later: counter starts over
        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 800 + 1_501), Gesture::Counted(1));
    }

    #[test]
    fn test_exactly_reset_window_keeps_count() {
        let mut guard = guard_at(0);
        guard.classify(InputEvent::touch(MIDDLE), 200);

        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 1_700), Gesture::Counted(2));
    }

    #[test]
    fn test_panic_fires_on_seventh_middle_tap() {
        let mut guard = guard_at(0);

        for tap in 1..=6 {
            let gesture = guard.classify(InputEvent::touch(MIDDLE), tap * 200);
            assert_eq!(gesture, Gesture::Counted(tap as u32));
        }

        assert_eq!(guard.classify(InputEvent::touch(MIDDLE), 7 * 200), Gesture::Panic);
    }

    #[test]
    fn test_panic_button_fires_immediately() {
        let mut guard = guard_at(0);
        // Inside the debounce window and with no prior taps
        assert_eq!(guard.classify(InputEvent::button(BUTTON_PANIC), 10), Gesture::Panic);
    }

    #[test]
    fn test_buttons_bypass_timing_windows() {
        let mut guard = guard_at(0);
        guard.classify(InputEvent::touch(MIDDLE), 200);
        let stamp = guard.state().last_activation_ms;

        assert_eq!(guard.classify(InputEvent::button(BUTTON_UP), 210), Gesture::ScrollUp);
        assert_eq!(guard.classify(InputEvent::button(BUTTON_DOWN), 220), Gesture::ScrollDown);
        assert_eq!(guard.state().repeat_count, 0);
        assert_eq!(guard.state().last_activation_ms, stamp);
    }

    #[test]
    fn test_unknown_button_is_ignored() {
        let mut guard = guard_at(0);
        guard.classify(InputEvent::touch(MIDDLE), 200);
        let before = guard.state();

        assert_eq!(guard.classify(InputEvent::button(3), 500), Gesture::Ignored);
        assert_eq!(guard.classify(InputEvent::button(-1), 900), Gesture::Ignored);
        assert_eq!(guard.state(), before);
    }
}
