// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard/mouse input, animation ticks, nav notifications)
// - Rendering the deck

pub mod app;
pub mod clipboard;
pub mod format;
pub mod input;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::deck::Deck;
use crate::logging::LogBuffer;
use crate::nav::NavChanged;
use crate::record::InteractionLog;
use anyhow::{Context, Result};
use app::{App, BottomPanel};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::json;
use std::io;
use std::time::{Duration, Instant};
use theme::ThemeKind;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit. Blocks until the user quits.
pub async fn run_tui(
    deck: Deck,
    config: Config,
    log: InteractionLog,
    log_buffer: LogBuffer,
    deep_link: Option<String>,
    theme: ThemeKind,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // The navigation-changed channel: the navigator announces, the event
    // loop is the subscriber that records into the interaction log
    let (nav_tx, mut nav_rx) = mpsc::channel::<NavChanged>(64);

    let mut app = App::new(deck, &config, log, log_buffer, nav_tx, deep_link, theme)?;

    let result = run_event_loop(&mut terminal, &mut app, &mut nav_rx, config.tick_interval()).await;

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

/// Main event loop
///
/// tokio::select! waits on three sources at once: terminal input, the
/// animation tick, and navigation notifications. The tick doubles as the
/// frame scheduler for running counter animations.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    nav_rx: &mut mpsc::Receiver<NavChanged>,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Animation/visibility tick
            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }

            // Navigation notifications feed the interaction log
            Some(changed) = nav_rx.recv() => {
                app.log.append(
                    "section_navigation",
                    json!({ "section_id": changed.section_id }),
                );
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    match key_event.kind {
        KeyEventKind::Press => {
            let key = key_event.code;
            if !app.key_pressed(key) {
                return;
            }

            // Help overlay absorbs everything except its dismiss keys
            if app.show_help {
                if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                    app.show_help = false;
                }
                return;
            }

            match key {
                KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,

                // Section navigation
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.prev_section(),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_section(),
                KeyCode::Char(c @ '1'..='9') => {
                    app.select_section(c as usize - '1' as usize);
                }

                // Panel scrolling
                KeyCode::Up => app.scroll_by(-1),
                KeyCode::Down => app.scroll_by(1),
                KeyCode::PageUp => app.scroll_by(-10),
                KeyCode::PageDown => app.scroll_by(10),
                KeyCode::Home => app.scroll_top(),
                KeyCode::End => app.scroll_bottom(),

                // Element selection and activation
                KeyCode::Char('k') => app.select_prev(),
                KeyCode::Char('j') => app.select_next(),
                KeyCode::Enter | KeyCode::Char(' ') => app.activate(),

                // Chrome
                KeyCode::Char('e') => app.toggle_bottom_panel(BottomPanel::Events),
                KeyCode::Char('g') => app.toggle_bottom_panel(BottomPanel::Logs),
                KeyCode::Char('t') => app.next_theme(),
                KeyCode::Char('y') => app.copy_log_to_clipboard(),
                KeyCode::Char('?') => app.show_help = true,
                _ => {}
            }
        }
        KeyEventKind::Release => {
            app.key_released(key_event.code);
        }
        _ => {}
    }
}

/// Handle mouse input - wheel scrolls the content panel
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.scroll_by(-3),
        MouseEventKind::ScrollDown => app.scroll_by(3),
        _ => {}
    }
}
