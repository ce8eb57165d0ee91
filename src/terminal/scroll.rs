// Scroll navigation for the terminal screen
//
// Maps a touch position or a button into a batch of cursor moves on the
// text buffer. Pure navigation: content is never touched.

use super::buffer::TextBuffer;

/// Vertical zone of a touch on the device screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Upper third: scroll up
    Top,
    /// Middle band: counts toward the panic gesture
    Middle,
    /// Lower third: scroll down
    Bottom,
}

impl Zone {
    /// Classify a touch `y` against the display height
    ///
    /// Boundaries (exactly `height / 3` or `2 * height / 3`) belong to the
    /// middle band.
    pub fn classify(y: i32, height: u32) -> Self {
        let height = i64::from(height);
        let y = i64::from(y);

        if y < height / 3 {
            Zone::Top
        } else if y > (height * 2) / 3 {
            Zone::Bottom
        } else {
            Zone::Middle
        }
    }
}

/// Moves the buffer cursor in fixed-size batches
#[derive(Debug, Clone, Copy)]
pub struct ScrollController {
    batch: usize,
}

impl ScrollController {
    pub fn new(batch: usize) -> Self {
        Self { batch }
    }

    pub fn scroll_up(&self, buffer: &mut TextBuffer) {
        for _ in 0..self.batch {
            buffer.cursor_up();
        }
    }

    pub fn scroll_down(&self, buffer: &mut TextBuffer) {
        for _ in 0..self.batch {
            buffer.cursor_down();
        }
    }
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(5)
    }
}
