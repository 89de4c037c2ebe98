//! Full-screen fuzzy picker used for every menu, prompt and list.

pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, text::Text, Terminal};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};

use crate::app::Result;
use crate::config::ColorConfig;

pub use self::app::{Mode, PickerApp};
pub use self::event::Feed;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Pick one entry while a producer keeps streaming more in.
///
/// Returns the arrival index of the chosen entry, or `None` when the user
/// backs out. The picker stays open after the feed ends or fails so the
/// user can still choose among what has arrived.
pub async fn pick_streaming(
    prompt: &str,
    header: Option<Text<'static>>,
    feed: UnboundedReceiver<Feed>,
    colors: &ColorConfig,
) -> Result<Option<usize>> {
    let mut app = PickerApp::new(Mode::Select, prompt);
    if let Some(header) = header {
        app = app.with_header(header);
    }

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app, Some(feed), colors).await;
    restore_terminal(&mut terminal)?;

    Ok(result?.and_then(|_| app.selected()))
}

/// Pick one of a fixed set of options.
pub async fn pick(
    prompt: &str,
    header: Option<Text<'static>>,
    options: Vec<String>,
    colors: &ColorConfig,
) -> Result<Option<usize>> {
    let (tx, rx) = mpsc::unbounded_channel();
    // The receiver is alive until the picker returns.
    let _ = tx.send(Feed::Entries(options));
    let _ = tx.send(Feed::Done);
    pick_streaming(prompt, header, rx, colors).await
}

/// Read one line of free text.
pub async fn input(prompt: &str, colors: &ColorConfig) -> Result<Option<String>> {
    let mut app = PickerApp::new(Mode::Input, prompt);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app, None, colors).await;
    restore_terminal(&mut terminal)?;

    Ok(result?.map(|_| app.query))
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Drive the picker until Accept (`Some(())`) or Cancel (`None`).
async fn run_app(
    terminal: &mut Tui,
    app: &mut PickerApp,
    mut feed: Option<UnboundedReceiver<Feed>>,
    colors: &ColorConfig,
) -> Result<Option<()>> {
    let event_handler = EventHandler::new(Duration::from_millis(50));

    loop {
        if let Some(rx) = feed.as_mut() {
            if drain_feed(app, rx) {
                feed = None;
            }
        }

        terminal.draw(|frame| layout::render(frame, app, colors))?;

        if let AppEvent::Key(key) = event_handler.next()? {
            match Action::from(key) {
                Action::Cancel => return Ok(None),
                Action::Accept => match app.mode {
                    Mode::Input => return Ok(Some(())),
                    Mode::Select if app.selected().is_some() => return Ok(Some(())),
                    Mode::Select => {}
                },
                Action::MoveUp => app.move_up(),
                Action::MoveDown => app.move_down(),
                Action::Backspace => app.backspace(),
                Action::ClearQuery => app.clear_query(),
                Action::Insert(c) => app.insert_char(c),
                Action::None => {}
            }
        }

        // Let producer tasks run between frames.
        tokio::task::yield_now().await;
    }
}

/// Apply everything queued so far. Returns true once the feed has ended.
fn drain_feed(app: &mut PickerApp, rx: &mut UnboundedReceiver<Feed>) -> bool {
    loop {
        match rx.try_recv() {
            Ok(Feed::Entries(entries)) => app.push_entries(entries),
            Ok(Feed::Failed(message)) => {
                app.fail(message);
                return true;
            }
            Ok(Feed::Done) | Err(TryRecvError::Disconnected) => {
                app.finish_loading();
                return true;
            }
            Err(TryRecvError::Empty) => return false,
        }
    }
}
