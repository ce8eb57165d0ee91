// Terminal view - lifecycle and input glue
//
// Owns the per-instance context (buffer + gesture state) between create and
// destroy. Every operation on a view that is not created is a silent no-op:
// log producers and input can race teardown and must never fail.

use super::buffer::TextBuffer;
use super::event::InputEvent;
use super::gesture::{Gesture, GestureGuard};
use super::panic;
use super::scroll::ScrollController;
use super::traits::{Clock, CommandDispatcher, ScreenManager, View, ViewId};
use crate::config::Config;
use crate::logging::LogCapture;

/// State that exists only while the view is created
#[derive(Debug)]
pub struct ViewContext {
    pub buffer: TextBuffer,
    pub gesture: GestureGuard,
}

/// Scrolling log screen with gesture-driven emergency stop
pub struct TerminalView {
    context: Option<ViewContext>,
    config: Config,
    scroll: ScrollController,
    clock: Box<dyn Clock>,
    screen: Box<dyn ScreenManager>,
    dispatcher: Box<dyn CommandDispatcher>,
    capture: Option<LogCapture>,
}

impl TerminalView {
    pub fn new(
        config: Config,
        clock: Box<dyn Clock>,
        screen: Box<dyn ScreenManager>,
        dispatcher: Box<dyn CommandDispatcher>,
    ) -> Self {
        Self {
            context: None,
            scroll: ScrollController::new(config.gesture.scroll_batch),
            config,
            clock,
            screen,
            dispatcher,
            capture: None,
        }
    }

    /// Attach the log redirection capability
    ///
    /// Only switched on at create when `logging.capture_to_screen` is set.
    pub fn with_log_capture(mut self, capture: LogCapture) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Text sink for log producers
    pub fn append(&mut self, text: &str) {
        if let Some(context) = self.context.as_mut() {
            context.buffer.append(text);
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(context) = self.context.as_mut() {
            self.scroll.scroll_up(&mut context.buffer);
        }
    }

    pub fn scroll_down(&mut self) {
        if let Some(context) = self.context.as_mut() {
            self.scroll.scroll_down(&mut context.buffer);
        }
    }

    /// Live context, `None` when not created
    pub fn context(&self) -> Option<&ViewContext> {
        self.context.as_ref()
    }

    fn capture_enabled(&self) -> Option<&LogCapture> {
        self.capture
            .as_ref()
            .filter(|_| self.config.logging.capture_to_screen)
    }
}

impl View for TerminalView {
    fn name(&self) -> &'static str {
        ViewId::Terminal.as_str()
    }

    fn create(&mut self) {
        if self.context.is_some() {
            return;
        }

        let now = self.clock.now_ms();
        self.context = Some(ViewContext {
            buffer: TextBuffer::new(self.config.buffer),
            gesture: GestureGuard::new(self.config.gesture, self.config.display.height, now),
        });

        if let Some(capture) = self.capture_enabled() {
            capture.install();
        }

        self.screen.register_status_bar(&self.config.display.status_label);

        tracing::debug!("{} created", self.name());
    }

    fn destroy(&mut self) {
        if let Some(capture) = self.capture.as_ref() {
            capture.uninstall();
        }

        if self.context.take().is_some() {
            tracing::debug!("{} destroyed", self.name());
        }
    }

    fn is_created(&self) -> bool {
        self.context.is_some()
    }

    fn handle_input(&mut self, event: InputEvent) {
        let now = self.clock.now_ms();
        let Some(context) = self.context.as_mut() else {
            return;
        };

        match context.gesture.classify(event, now) {
            Gesture::ScrollUp => self.scroll_up(),
            Gesture::ScrollDown => self.scroll_down(),
            // Reported as the count before this tap
            Gesture::Counted(count) => tracing::info!("Close count = {}", count - 1),
            Gesture::Panic => panic::fire(&*self.screen, &*self.dispatcher),
            Gesture::Debounced | Gesture::Ignored => {}
        }
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogHook;
    use crate::terminal::event::{BUTTON_DOWN, BUTTON_PANIC, BUTTON_UP};
    use crate::terminal::panic::STOP_COMMANDS;
    use crate::terminal::testing::{ManualClock, Recorder};
    use tokio::sync::mpsc;

    const MIDDLE: i32 = 160;
    const TOP: i32 = 10;

    fn view_with(config: Config) -> (TerminalView, ManualClock, Recorder) {
        let clock = ManualClock::new(1_000);
        let recorder = Recorder::new();
        let view = TerminalView::new(
            config,
            Box::new(clock.clone()),
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        );
        (view, clock, recorder)
    }

    fn created_view() -> (TerminalView, ManualClock, Recorder) {
        let (mut view, clock, recorder) = view_with(Config::default());
        view.create();
        (view, clock, recorder)
    }

    fn tap(view: &mut TerminalView, clock: &ManualClock, y: i32) {
        clock.advance(200);
        view.handle_input(InputEvent::touch(y));
    }

    fn expected_panic_calls() -> Vec<String> {
        let mut calls = vec!["switch:OptionsMenuView".to_string()];
        calls.extend(STOP_COMMANDS.iter().map(|c| format!("exec:{c}")));
        calls
    }

    #[test]
    fn test_create_registers_status_bar_once() {
        let (mut view, _clock, recorder) = view_with(Config::default());
        assert!(!view.is_created());

        view.create();
        view.create();

        assert!(view.is_created());
        assert_eq!(recorder.calls(), vec!["status:Terminal".to_string()]);
    }

    #[test]
    fn test_destroy_twice_is_safe() {
        let (mut view, _clock, _recorder) = created_view();
        view.destroy();
        view.destroy();
        assert!(!view.is_created());
    }

    #[test]
    fn test_append_before_create_and_after_destroy_is_noop() {
        let (mut view, _clock, _recorder) = view_with(Config::default());
        view.append("early line");
        assert!(view.context().is_none());

        view.create();
        view.append("kept");
        assert_eq!(view.context().map(|c| c.buffer.text()), Some("kept\n"));

        view.destroy();
        view.append("late line");
        assert!(view.context().is_none());
    }

    #[test]
    fn test_recreate_starts_with_empty_buffer() {
        let (mut view, _clock, _recorder) = created_view();
        view.append("old output");
        view.destroy();
        view.create();

        assert_eq!(view.context().map(|c| c.buffer.is_empty()), Some(true));
    }

    #[test]
    fn test_input_before_create_is_noop() {
        let (mut view, _clock, recorder) = view_with(Config::default());
        view.handle_input(InputEvent::button(BUTTON_PANIC));
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_seventh_middle_tap_fires_panic_in_order() {
        let (mut view, clock, recorder) = created_view();
        recorder.clear();

        for _ in 0..6 {
            tap(&mut view, &clock, MIDDLE);
        }
        assert!(recorder.calls().is_empty());
        assert_eq!(view.context().map(|c| c.gesture.state().repeat_count), Some(6));

        tap(&mut view, &clock, MIDDLE);
        assert_eq!(recorder.calls(), expected_panic_calls());
    }

    #[test]
    fn test_panic_button_fires_on_first_press() {
        let (mut view, _clock, recorder) = created_view();
        recorder.clear();

        // No time has passed since create
        view.handle_input(InputEvent::button(BUTTON_PANIC));
        assert_eq!(recorder.calls(), expected_panic_calls());
    }

    #[test]
    fn test_debounced_tap_does_not_scroll() {
        let (mut view, clock, _recorder) = created_view();
        for i in 0..20 {
            view.append(&format!("line {i}"));
        }

        tap(&mut view, &clock, TOP);
        let after_first = view.context().map(|c| c.buffer.cursor_line());
        assert_eq!(after_first, Some(15));

        clock.advance(50);
        view.handle_input(InputEvent::touch(TOP));
        assert_eq!(view.context().map(|c| c.buffer.cursor_line()), after_first);
    }

    #[test]
    fn test_top_tap_resets_count_before_middle_tap() {
        let (mut view, clock, _recorder) = created_view();
        tap(&mut view, &clock, MIDDLE);
        tap(&mut view, &clock, MIDDLE);
        tap(&mut view, &clock, TOP);
        tap(&mut view, &clock, MIDDLE);

        assert_eq!(view.context().map(|c| c.gesture.state().repeat_count), Some(1));
    }

    #[test]
    fn test_buttons_scroll_without_touching_content() {
        let (mut view, _clock, _recorder) = created_view();
        for i in 0..12 {
            view.append(&format!("line {i}"));
        }
        let text = view.context().map(|c| c.buffer.text().to_string());

        view.handle_input(InputEvent::button(BUTTON_UP));
        view.handle_input(InputEvent::button(BUTTON_UP));
        assert_eq!(view.context().map(|c| c.buffer.cursor_line()), Some(2));

        view.handle_input(InputEvent::button(BUTTON_DOWN));
        assert_eq!(view.context().map(|c| c.buffer.cursor_line()), Some(7));
        assert_eq!(view.context().map(|c| c.buffer.text().to_string()), text);
    }

    #[test]
    fn test_append_moves_cursor_back_to_end() {
        let (mut view, _clock, _recorder) = created_view();
        for i in 0..12 {
            view.append(&format!("line {i}"));
        }
        view.scroll_up();
        view.append("new");

        let context = view.context().expect("created");
        assert_eq!(context.buffer.cursor(), context.buffer.len());
    }

    #[test]
    fn test_input_callback_routes_to_handler() {
        let (mut view, _clock, recorder) = created_view();
        recorder.clear();

        let callback = view.input_callback();
        callback(&mut view, InputEvent::button(BUTTON_PANIC));

        assert_eq!(recorder.calls(), expected_panic_calls());
    }

    #[test]
    fn test_log_capture_follows_lifecycle_when_enabled() {
        let mut config = Config::default();
        config.logging.capture_to_screen = true;

        let hook = LogHook::new();
        let (tx, _rx) = mpsc::channel(8);
        let (view, _clock, _recorder) = view_with(config);
        let mut view = view.with_log_capture(LogCapture::new(hook.clone(), tx));

        assert!(!hook.is_installed());
        view.create();
        assert!(hook.is_installed());
        view.destroy();
        assert!(!hook.is_installed());
    }

    #[test]
    fn test_log_capture_stays_off_by_default() {
        let hook = LogHook::new();
        let (tx, _rx) = mpsc::channel(8);
        let (view, _clock, _recorder) = view_with(Config::default());
        let mut view = view.with_log_capture(LogCapture::new(hook.clone(), tx));

        view.create();
        assert!(!hook.is_installed());
    }

    #[test]
    fn test_close_count_logs_count_before_tap() {
        use crate::logging::ScreenLogLayer;
        use tracing_subscriber::layer::SubscriberExt;

        let hook = LogHook::new();
        let (tx, mut rx) = mpsc::channel(16);
        hook.install(tx);
        let subscriber = tracing_subscriber::registry().with(ScreenLogLayer::new(hook.clone()));

        let (mut view, clock, _recorder) = created_view();
        tracing::subscriber::with_default(subscriber, || {
            tap(&mut view, &clock, MIDDLE);
            tap(&mut view, &clock, MIDDLE);
        });

        let lines: Vec<String> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter(|line| line.contains("Close count"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Close count = 0"));
        assert!(lines[1].ends_with("Close count = 1"));
    }

    #[test]
    fn test_name() {
        let (view, _clock, _recorder) = view_with(Config::default());
        assert_eq!(view.name(), "TerminalView");
    }
}
