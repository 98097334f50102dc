use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Mode};
use crate::widgets::{PopupWidget, ReelsWidget, StatusBarWidget};

/// Draw one full screen
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    ReelsWidget::render(frame, chunks[0], app);
    StatusBarWidget::render(frame, chunks[1], app);

    if app.mode == Mode::Paytable {
        PopupWidget::render_paytable(frame, app);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use slotreel_core::animation::{FrameHost, ManualClock};
    use slotreel_core::AppConfig;

    use super::*;
    use crate::input::Action;

    fn screen_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for row in 0..buf.area.height {
            for col in 0..buf.area.width {
                text.push_str(buf[(col, row)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> (Rc<ManualClock>, App) {
        let clock = Rc::new(ManualClock::new());
        let mut config = AppConfig::default();
        config.game.seed = Some(11);
        let app = App::with_host(config, FrameHost::new(clock.clone())).unwrap();
        (clock, app)
    }

    #[test]
    fn test_draw_idle_screen() {
        let (_, mut app) = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains(" slotreel "));
        assert!(text.contains("READY"));
        assert!(text.contains("CASH 100"));
        assert!(text.contains("BET 10"));
        assert!(text.contains("space:spin"));
        // Three reel windows
        assert_eq!(text.matches('┌').count(), 3);
    }

    #[test]
    fn test_paytable_popup() {
        let (_, mut app) = app();
        app.handle_action(Action::TogglePaytable);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("Paytable (bet 10)"));
        assert!(text.contains("1000000"));
        assert!(text.contains("PAYTABLE"));
    }

    /// Column where `needle` starts on the ASCII status row
    fn status_col(buf: &Buffer, needle: &str) -> Option<u16> {
        let row = buf.area.height - 1;
        let text: String = (0..buf.area.width).map(|col| buf[(col, row)].symbol()).collect();
        text.find(needle).map(|i| i as u16)
    }

    #[test]
    fn test_status_colors_result_and_warning() {
        let (clock, mut app) = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        app.handle_action(Action::Spin);
        app.handle_action(Action::Spin);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let col = status_col(&buf, "Reels are still spinning").unwrap();
        assert_eq!(buf[(col, 23)].fg, app.theme.warning);

        while app.needs_animation_frame() {
            clock.advance(Duration::from_millis(16));
            app.update_animations();
        }
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let buf = terminal.backend().buffer().clone();

        let result = app.machine.last_result().unwrap();
        let col = status_col(&buf, &crate::app::describe_result(&result)).unwrap();
        let expected = if result.combo.is_win() { app.theme.win } else { app.theme.loss };
        assert_eq!(buf[(col, 23)].fg, expected);
        assert!(status_col(&buf, "Reels are still spinning").is_none());
    }

    #[test]
    fn test_balance_hidden_mid_fade() {
        let (clock, mut app) = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        app.handle_action(Action::Spin);

        // Halfway through the 800ms fade the balance is invisible
        clock.advance(Duration::from_millis(400));
        app.update_animations();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("SPINNING"));
        assert!(!text.contains("CASH"));
    }
}
