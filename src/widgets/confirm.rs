use ratatui::layout::Rect;
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::ui::PendingDelete;

fn centered_rect(width: u16, height: u16, screen: Rect) -> Rect {
    let w = width.min(screen.width);
    let h = height.min(screen.height);
    Rect {
        x: screen.x + (screen.width.saturating_sub(w)) / 2,
        y: screen.y + (screen.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

/// Modal confirmation for a delete. Captures all keys until answered.
pub fn draw_confirm(f: &mut Frame, screen: Rect, pending: &PendingDelete, theme: &Theme) {
    let question = match &pending.nombre {
        Some(nombre) => format!("¿Eliminar el producto «{}» (#{})?", nombre, pending.id),
        None => format!("¿Eliminar el producto #{}?", pending.id),
    };
    let width = (question.chars().count() as u16 + 6).max(34);
    let area = centered_rect(width, 5, screen);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.text_error())
        .title("Confirmar eliminación");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines = vec![
        Line::from(Span::raw(question)),
        Line::from(Span::styled(
            "[s] Sí    [n] No",
            theme.text_muted(),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
