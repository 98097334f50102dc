use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{describe_result, App, Mode};

/// Below this opacity the balance is not drawn at all
const HIDDEN_OPACITY: f64 = 0.25;
/// Below this opacity the balance is drawn dim
const DIM_OPACITY: f64 = 0.75;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let session = app.machine.session();

        let mode_str = match app.mode {
            Mode::Paytable => "PAYTABLE",
            Mode::Normal if session.spinning => "SPINNING",
            Mode::Normal => "READY",
        };

        let cash = format!("CASH {}", session.display.shown);
        let base = Style::default().fg(theme.fg0).bg(theme.bg2);
        let cash_span = match session.display.opacity {
            o if o < HIDDEN_OPACITY => Span::styled(" ".repeat(cash.width()), base),
            o if o < DIM_OPACITY => Span::styled(cash, base.add_modifier(Modifier::DIM)),
            _ => Span::styled(cash, base.add_modifier(Modifier::BOLD)),
        };

        let (message, message_style) = match (&app.status_message, &session.last_result) {
            (Some(msg), _) => (msg.clone(), Style::default().fg(theme.warning).bg(theme.bg2)),
            (None, Some(result)) => {
                let color = if result.combo.is_win() { theme.win } else { theme.loss };
                (describe_result(result), Style::default().fg(color).bg(theme.bg2))
            }
            (None, None) => ("Press space to spin".to_string(), base),
        };

        let head = format!(" {} | ", mode_str);
        let middle = format!(" | BET {} | ", session.bet);
        let help_hint = " space:spin p:paytable q:quit ";

        let used = head.width() + cash_span.width() + middle.width() + message.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(head, base),
            cash_span,
            Span::styled(middle, base),
            Span::styled(message, message_style),
            Span::styled(" ".repeat(padding_len), base),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
