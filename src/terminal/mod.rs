//! Terminal screen core
//!
//! A bounded log display driven by touch and button gestures.
//!
//! ```text
//!   InputEvent ──► GestureGuard ──┬─► ScrollController ──► TextBuffer (cursor)
//!                                 └─► panic::fire ──► ScreenManager + CommandDispatcher
//!
//!   log producer ──► TerminalView::append ──► TextBuffer (content)
//! ```
//!
//! Input never changes buffer content; only `append` does.

pub mod buffer;
pub mod event;
pub mod gesture;
pub mod panic;
pub mod scroll;
pub mod traits;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use event::InputEvent;
pub use traits::{CommandDispatcher, MonotonicClock, ScreenManager, View, ViewId};
pub use view::TerminalView;
