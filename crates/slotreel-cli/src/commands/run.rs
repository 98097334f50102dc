use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use slotreel_core::AppConfig;
use slotreel_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    ui,
};

pub fn run(config: AppConfig) -> Result<()> {
    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.timing.tick_rate_ms, config.timing.animation_fps);

    // Create app state before touching the terminal so config errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    enter_screen(&mut stdout, disable_raw_mode)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            return Err(e.into());
        }
    };

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let session = app.machine.session();
    let stats = &session.stats;
    tracing::info!(
        spins = stats.total_spins,
        bet = stats.total_bet,
        won = stats.total_win,
        "Session finished"
    );

    result
}

/// Switch to the alternate screen, undoing raw mode if that fails
fn enter_screen<W: Write>(
    out: &mut W,
    leave_raw_mode: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    if let Err(e) = execute!(out, EnterAlternateScreen, SetTitle("slotreel")) {
        leave_raw_mode()?;
        return Err(e.into());
    }
    Ok(())
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    let mut needs_redraw = true;

    loop {
        needs_redraw |= app.update_animations();

        if needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            needs_redraw = false;
        }

        // Poll fast only while something animates
        let event = if app.needs_animation_frame() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    app.handle_action(action);
                    needs_redraw = true;
                }
                AppEvent::Resize(_, _) => {
                    app.invalidate_layout();
                    needs_redraw = true;
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
