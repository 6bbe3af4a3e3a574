use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::AppState;

const SPINNER: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

/// Footer line: in-flight indicator, success toast, key help.
pub fn draw_footer(f: &mut Frame, area: Rect, state: &AppState, help_text: &str) {
    let mut spans: Vec<Span> = Vec::new();
    if state.submitting || state.loading {
        let spinner = SPINNER[state.tick as usize % SPINNER.len()];
        let msg = if state.submitting {
            "Guardando…"
        } else {
            "Cargando…"
        };
        spans.push(Span::raw(format!(" {spinner} {msg}  |  ")));
    }
    if let Some(t) = &state.toast {
        let color = state.theme.toast_color(t.level);
        spans.push(Span::styled(
            "[OK] ",
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  |  ", t.text),
            Style::default().fg(color),
        ));
    }
    spans.push(Span::styled(
        help_text.to_string(),
        state.theme.text_muted(),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Error banner line. No auto-hide: it stays until explicitly cleared.
pub fn draw_error_banner(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(err) = &state.last_error else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(
            "[ERROR] ",
            state.theme.text_error().add_modifier(Modifier::BOLD),
        ),
        Span::styled(err.clone(), state.theme.text_error()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Toast, ToastLevel};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_line(draw: impl Fn(&mut Frame<'_>, Rect)) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, f.area())).unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn footer_shows_toast_text() {
        let mut state = AppState::default();
        state.toast = Some(Toast {
            text: "Producto creado correctamente".into(),
            level: ToastLevel::Success,
            expires_at_tick: 15,
        });
        let text = render_line(|f, area| draw_footer(f, area, &state, "q salir"));
        assert!(text.contains("[OK]"));
        assert!(text.contains("Producto creado correctamente"));
        assert!(text.contains("q salir"));
    }

    #[test]
    fn error_banner_renders_the_message() {
        let mut state = AppState::default();
        state.last_error = Some("Error al cargar productos: HTTP 500".into());
        let text = render_line(|f, area| draw_error_banner(f, area, &state));
        assert!(text.contains("[ERROR]"));
        assert!(text.contains("Error al cargar productos"));
    }
}
