//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, VERSION};

impl Config {
    /// Render the full config as a commented TOML document
    pub fn to_toml(&self) -> String {
        let mut output = format!(
            "# termscreen {} configuration\n\
             # Environment variables override these values:\n\
             #   TERMSCREEN_HEIGHT, TERMSCREEN_CAPTURE_LOGS, TERMSCREEN_DEMO, RUST_LOG\n",
            VERSION
        );

        output.push_str(&self.display_to_toml());
        output.push_str(&self.buffer_to_toml());
        output.push_str(&self.gesture_to_toml());
        output.push_str(&self.logging_to_toml());
        output
    }

    fn display_to_toml(&self) -> String {
        format!(
            r#"
[display]
# Vertical resolution of the device screen (touch zones are thirds)
height = {}
status_label = {:?}
"#,
            self.display.height, self.display.status_label
        )
    }

    fn buffer_to_toml(&self) -> String {
        format!(
            r#"
[buffer]
# A heartbeat "." clears the screen once the text is longer than this
heartbeat_clear_threshold = {}
# Hard cap on screen text (bytes)
max_len = {}
"#,
            self.buffer.heartbeat_clear_threshold, self.buffer.max_len
        )
    }

    fn gesture_to_toml(&self) -> String {
        format!(
            r#"
[gesture]
# Touches closer together than this are ignored
debounce_ms = {}
# Touches further apart than this restart the tap count
reset_window_ms = {}
# Middle-zone taps fire the emergency stop once the count exceeds this
panic_threshold = {}
# Lines moved per scroll
scroll_batch = {}
"#,
            self.gesture.debounce_ms,
            self.gesture.reset_window_ms,
            self.gesture.panic_threshold,
            self.gesture.scroll_batch
        )
    }

    fn logging_to_toml(&self) -> String {
        format!(
            r#"
[logging]
level = {:?}
file_enabled = {}
file_dir = {:?}
# hourly, daily or never
file_rotation = {:?}
file_prefix = {:?}
# Mirror log output onto the terminal screen while it is open
capture_to_screen = {}
"#,
            self.logging.level,
            self.logging.file_enabled,
            self.logging.file_dir.display().to_string(),
            self.logging.file_rotation.as_str(),
            self.logging.file_prefix,
            self.logging.capture_to_screen
        )
    }
}
