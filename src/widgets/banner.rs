use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::AppState;

/// Top banner: centered logo with a separating bottom border. The
/// border picks up the accent color while a request is in flight.
pub fn draw_banner(f: &mut Frame, area: Rect, state: &AppState) {
    let busy = state.loading || state.submitting;
    let border = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(if busy {
            state.theme.accent
        } else {
            state.theme.muted
        }));
    let inner = border.inner(area);

    let logo = if state.logo_lines.is_empty() {
        vec!["Catálogo de productos".to_string()]
    } else {
        state.logo_lines.clone()
    };
    let lines: Vec<Line> = logo
        .iter()
        .map(|s| {
            Line::from(Span::styled(
                s.clone(),
                Style::default()
                    .fg(state.theme.fg)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    let p = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
    f.render_widget(p, inner);
    f.render_widget(border, area);
}
