// Text buffer backing the terminal screen
//
// Append-only log text with a cursor. Content is only ever changed by
// `append`; navigation moves the cursor between logical lines.
//
// Growth is bounded two ways:
// - A heartbeat marker (".") arriving once the buffer is past the clear
//   threshold wipes the buffer. High-rate packet ticks are what fill it up,
//   and clearing on a tick never drops half of a real line.
// - A hard cap: a line that would overflow it clears the buffer first.

use crate::config::BufferConfig;

/// Single-character liveness marker, exempt from the newline rule
pub const HEARTBEAT_MARKER: &str = ".";

/// Bounded log text with a cursor (byte offset, always on a char boundary)
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    limits: BufferConfig,
}

impl TextBuffer {
    pub fn new(limits: BufferConfig) -> Self {
        Self {
            text: String::with_capacity(limits.max_len),
            cursor: 0,
            limits,
        }
    }

    /// Append a chunk of output
    ///
    /// Regular text gets exactly one trailing newline. The heartbeat marker
    /// is appended bare, or clears the buffer when it is already past the
    /// clear threshold. The cursor always ends up at the end of the buffer.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if text == HEARTBEAT_MARKER {
            if self.text.len() > self.limits.heartbeat_clear_threshold
                || self.text.len() >= self.limits.max_len
            {
                self.text.clear();
            } else {
                self.text.push_str(HEARTBEAT_MARKER);
            }
        } else {
            self.push_line(text);
        }

        self.cursor_to_end();
    }

    fn push_line(&mut self, text: &str) {
        let needed = text.len() + 1;
        if self.text.len() + needed > self.limits.max_len {
            self.text.clear();
        }

        // A single line larger than the whole buffer keeps only its tail
        let line = if needed > self.limits.max_len {
            tail(text, self.limits.max_len.saturating_sub(1))
        } else {
            text
        };

        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Move the cursor one line up, keeping the column where possible
    pub fn cursor_up(&mut self) {
        let line_start = self.line_start(self.cursor);
        if line_start == 0 {
            return;
        }

        let column = self.text[line_start..self.cursor].chars().count();
        let prev_end = line_start - 1;
        let prev_start = self.line_start(prev_end);
        self.cursor = prev_start + byte_offset(&self.text[prev_start..prev_end], column);
    }

    /// Move the cursor one line down, keeping the column where possible
    pub fn cursor_down(&mut self) {
        let Some(newline) = self.text[self.cursor..].find('\n') else {
            return;
        };

        let line_start = self.line_start(self.cursor);
        let column = self.text[line_start..self.cursor].chars().count();
        let next_start = self.cursor + newline + 1;
        let next_end = self.text[next_start..]
            .find('\n')
            .map(|i| next_start + i)
            .unwrap_or(self.text.len());
        self.cursor = next_start + byte_offset(&self.text[next_start..next_end], column);
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[allow(dead_code)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero-based logical line the cursor sits on
    pub fn cursor_line(&self) -> usize {
        self.text[..self.cursor].matches('\n').count()
    }

    /// Byte offset where the line containing `pos` starts
    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(BufferConfig::default())
    }
}

/// Byte offset of `column` within `line`, clamped to the line end
fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Last `max` bytes of `s`, moved forward to a char boundary
fn tail(s: &str, max: usize) -> &str {
    let mut start = s.len().saturating_sub(max);
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
