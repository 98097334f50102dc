use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};

use crate::app::App;
use crate::surface::TerminalSurface;

pub struct ReelsWidget;

impl ReelsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let border_color = if app.machine.is_spinning() {
            app.theme.accent
        } else {
            app.theme.grey1
        };

        let block = Block::default()
            .title(" slotreel ")
            .title_alignment(Alignment::Center)
            .title_style(
                Style::default()
                    .fg(app.theme.fg0)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(app.theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        app.ensure_layout(inner);
        let mut surface = TerminalSurface::new(frame.buffer_mut(), inner, &app.theme);
        app.machine.draw(&mut surface);
    }
}
