use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the payout table for the current bet
    pub fn render_paytable(frame: &mut Frame, app: &App) {
        let area = frame.area();
        let theme = &app.theme;
        let bet = app.machine.session().bet;
        let paytable = app.machine.paytable();

        let lines: Vec<Line> = paytable
            .rows()
            .map(|(weight, symbol, multiplier)| {
                let pays = multiplier.saturating_mul(bet) / 10;
                Line::from(vec![
                    Span::styled(
                        format!(" {:<7}", weight.pattern(symbol)),
                        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("{:<13}", weight), Style::default().fg(theme.grey2)),
                    Span::styled(format!("{:>10} ", pays), Style::default().fg(theme.win)),
                ])
            })
            .collect();

        let popup_width = 36u16.min(area.width.saturating_sub(4));
        let popup_height = (lines.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" Paytable (bet {}) ", bet))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Rows
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let hint = Paragraph::new(Line::from(Span::styled(
            "p/esc: close",
            Style::default().fg(theme.grey1),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[1]);
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
