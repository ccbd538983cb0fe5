//! Terminal screen event loop

use std::{
    io::{self, stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::state::AppState;
use super::view;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a key press asks the screen to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    /// Play when not running, pause when running
    PlayPause,
    Stop,
    Quit,
}

impl ScreenAction {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Self::Quit),
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('p') => Some(Self::PlayPause),
            KeyCode::Char('s') => Some(Self::Stop),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Run the terminal screen until the user quits or `shutdown` is set
pub fn run(state: Arc<AppState>, shutdown: Arc<AtomicBool>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_screen(&mut terminal, &state, &shutdown);
    let restored = restore_terminal(&mut terminal);

    result?;
    restored?;
    Ok(())
}

/// Undo raw mode, the alternate screen and the hidden cursor.
///
/// Every step runs even if an earlier one fails; the first error is returned.
fn restore_terminal<W: Write>(terminal: &mut Terminal<CrosstermBackend<W>>) -> io::Result<()> {
    let raw_mode = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw_mode.and(screen).and(cursor)
}

fn run_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &AppState,
    shutdown: &AtomicBool,
) -> anyhow::Result<()> {
    let mut snapshot_rx = state.subscribe_snapshots();
    let mut snapshot = snapshot_rx.borrow_and_update().clone();
    let mut needs_redraw = true;

    while !shutdown.load(Ordering::Relaxed) {
        if snapshot_rx.has_changed().unwrap_or(false) {
            snapshot = snapshot_rx.borrow_and_update().clone();
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| view::render(f, &snapshot))?;
            needs_redraw = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let result = match ScreenAction::from_key(key) {
                    Some(ScreenAction::PlayPause) => state.toggle(),
                    Some(ScreenAction::Stop) => state.stop(),
                    Some(ScreenAction::Quit) => {
                        info!("Quit requested from terminal screen");
                        break;
                    }
                    None => continue,
                };
                if let Err(e) = result {
                    error!("Failed to apply screen action: {}", e);
                }
            }
            Event::Resize(..) => needs_redraw = true,
            _ => {}
        }
    }

    Ok(())
}
