// Host module - runs the terminal screen on a desktop terminal
//
// Stands in for the device: ratatui draws the screen, crossterm mouse clicks
// become touches and keys become button presses. It handles:
// - Terminal initialization and cleanup
// - Event loop (input, redraw ticks, incoming log lines)
// - Creating/destroying the terminal view as the active screen changes
//
// The view lives on this loop only. Log lines produced elsewhere arrive over
// a channel and are appended here.

pub mod dispatcher;
pub mod input;
pub mod render;
pub mod screen;

use crate::config::Config;
use crate::logging::{LogCapture, LogHook};
use crate::terminal::traits::InputCallback;
use crate::terminal::{InputEvent, MonotonicClock, ScreenManager, TerminalView, View, ViewId};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dispatcher::ChannelDispatcher;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use screen::HostScreen;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Channels connecting the host loop to the rest of the program
pub struct HostChannels {
    /// Lines for the screen (log capture and demo producer)
    pub lines_tx: mpsc::Sender<String>,
    pub lines_rx: mpsc::Receiver<String>,
    /// Commands issued by the dispatcher
    pub commands_tx: mpsc::UnboundedSender<String>,
}

/// Device state owned by the event loop
struct Host {
    view: TerminalView,
    callback: InputCallback<TerminalView>,
    screen: Rc<HostScreen>,
    dispatcher: Rc<ChannelDispatcher>,
    display_height: u32,
    body: Rect,
    should_quit: bool,
}

impl Host {
    fn new(config: Config, hook: LogHook, channels: &HostChannels) -> Self {
        let screen = Rc::new(HostScreen::new());
        let dispatcher = Rc::new(ChannelDispatcher::new(channels.commands_tx.clone()));
        let display_height = config.display.height;

        let view = TerminalView::new(
            config,
            Box::new(MonotonicClock::new()),
            Box::new(screen.clone()),
            Box::new(dispatcher.clone()),
        )
        .with_log_capture(LogCapture::new(hook, channels.lines_tx.clone()));
        let callback = view.input_callback();

        Self {
            view,
            callback,
            screen,
            dispatcher,
            display_height,
            body: Rect::default(),
            should_quit: false,
        }
    }

    /// Bring the view lifecycle in line with the active screen
    fn sync_view(&mut self) {
        match (self.screen.active(), self.view.is_created()) {
            (ViewId::Terminal, false) => self.view.create(),
            (ViewId::OptionsMenu, true) => self.view.destroy(),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match self.screen.active() {
            ViewId::OptionsMenu => {
                if matches!(key.code, KeyCode::Char('t') | KeyCode::Enter) {
                    self.screen.switch_view(ViewId::Terminal);
                }
            }
            ViewId::Terminal => {
                if let Some(event) = input::key_to_event(key.code) {
                    self.dispatch(event);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen.active() != ViewId::Terminal {
            return;
        }

        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                input::touch_from_row(mouse.row, self.body, self.display_height)
            }
            // Wheel maps onto the scroll buttons
            MouseEventKind::ScrollUp => input::key_to_event(KeyCode::Up),
            MouseEventKind::ScrollDown => input::key_to_event(KeyCode::Down),
            _ => None,
        };

        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    /// Deliver an event through the registered input callback
    fn dispatch(&mut self, event: InputEvent) {
        let callback = self.callback;
        callback(&mut self.view, event);
    }
}

/// Run the simulated device screen
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal afterwards.
pub async fn run_host(config: Config, hook: LogHook, mut channels: HostChannels) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut host = Host::new(config, hook, &channels);
    host.sync_view();

    let result = run_event_loop(&mut terminal, &mut host, &mut channels.lines_rx).await;

    // Release the log hook before tearing the terminal down
    host.view.destroy();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop: input, redraw ticks and incoming lines
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    host: &mut Host,
    lines_rx: &mut mpsc::Receiver<String>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        let history = host.dispatcher.history();
        let mut body = host.body;
        terminal
            .draw(|f| body = render::draw(f, &host.screen, &host.view, &history))
            .context("Failed to draw terminal")?;
        host.body = body;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => host.handle_key(key),
                        Ok(Event::Mouse(mouse)) => host.handle_mouse(mouse),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {}

            Some(line) = lines_rx.recv() => {
                host.view.append(&line);
                // Drain whatever else queued up before the next redraw
                while let Ok(line) = lines_rx.try_recv() {
                    host.view.append(&line);
                }
            }
        }

        host.sync_view();

        if host.should_quit {
            break;
        }
    }

    Ok(())
}
