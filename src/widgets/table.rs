use crate::model::Producto;
use crate::theme::Theme;
use crate::widgets::chrome::panel_block;
use crate::widgets::sanitize_text;
use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

pub const EMPTY_PLACEHOLDER: &str = "No hay productos disponibles";

/// Render the product list in server order, one row per record.
pub fn draw_table(
    f: &mut Frame,
    area: Rect,
    productos: &[Producto],
    selected: usize,
    focused: bool,
    theme: &Theme,
) {
    let title = format!("Productos ({})", productos.len());
    let block = panel_block(&title, focused, theme);

    if productos.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
            .style(theme.text_muted())
            .alignment(Alignment::Center);
        f.render_widget(placeholder, inner);
        return;
    }

    let header = Row::new(["ID", "Nombre", "Precio", "Acciones"]).style(theme.title_style());
    let rows: Vec<Row> = productos
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.id.to_string()),
                Cell::from(sanitize_text(&p.nombre)),
                Cell::from(format!("{:.2} EUR", p.precio)),
                Cell::from("[e]ditar [d]eliminar"),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(6),
        Constraint::Min(12),
        Constraint::Length(12),
        Constraint::Length(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme.list_cursor_style())
        .block(block);
    let mut ts = TableState::default();
    if focused {
        ts.select(Some(selected.min(productos.len().saturating_sub(1))));
    }
    f.render_stateful_widget(table, area, &mut ts);
}
