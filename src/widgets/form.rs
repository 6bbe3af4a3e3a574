use crate::model::Producto;
use crate::theme::Theme;
use crate::widgets::chrome::panel_block;
use crate::widgets::sanitize_text;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Nombre,
    Precio,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Nombre => Field::Precio,
            Field::Precio => Field::Nombre,
        }
    }
}

/// The compose form. The hidden identifier decides create vs update:
/// `edit_id` present means the next submit is an update.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub edit_id: Option<u64>,
    pub nombre: String,
    pub precio: String,
    pub selected: Field,
    pub editing: bool,
    pub disabled: bool,
}

impl ProductForm {
    pub fn is_edit(&self) -> bool {
        self.edit_id.is_some()
    }

    /// Back to create mode with empty fields.
    pub fn reset(&mut self) {
        self.edit_id = None;
        self.nombre.clear();
        self.precio.clear();
        self.selected = Field::Nombre;
        self.editing = false;
    }

    /// Populate from an existing record for editing.
    pub fn load(&mut self, p: &Producto) {
        self.edit_id = Some(p.id);
        self.nombre = sanitize_text(&p.nombre);
        self.precio = format!("{:.2}", p.precio);
        self.selected = Field::Nombre;
        self.editing = false;
    }

    fn selected_value_mut(&mut self) -> &mut String {
        match self.selected {
            Field::Nombre => &mut self.nombre,
            Field::Precio => &mut self.precio,
        }
    }

    // The price field only admits characters a decimal number could
    // contain; whether the result is a valid price is for validation.
    fn accepts(&self, c: char) -> bool {
        match self.selected {
            Field::Nombre => !c.is_control(),
            Field::Precio => c.is_ascii_digit() || c == '.' || c == '-',
        }
    }

    /// Returns true when the key was consumed by the form.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.disabled {
            return false;
        }
        if self.editing {
            match code {
                KeyCode::Char(c) if self.accepts(c) => {
                    self.selected_value_mut().push(c);
                    true
                }
                KeyCode::Backspace => {
                    self.selected_value_mut().pop();
                    true
                }
                KeyCode::Enter | KeyCode::Esc => {
                    self.editing = false;
                    true
                }
                _ => false,
            }
        } else {
            match code {
                KeyCode::Up | KeyCode::Down => {
                    self.selected = self.selected.next();
                    true
                }
                KeyCode::Enter => {
                    self.editing = true;
                    true
                }
                _ => false,
            }
        }
    }
}

fn field_line<'a>(
    label: &'a str,
    value: &'a str,
    selected: bool,
    editing: bool,
    cursor_on: bool,
    theme: &Theme,
) -> Line<'a> {
    let marker = if selected { "▸ " } else { "  " };
    let label_style = if selected && editing {
        theme.text_editing_bold()
    } else if selected {
        theme.title_style()
    } else {
        theme.text_muted()
    };
    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label:<8}"), label_style),
        Span::raw(value),
    ];
    if selected && editing && cursor_on {
        spans.push(Span::styled("█", theme.text_editing_bold()));
    }
    Line::from(spans)
}

pub fn draw_form(f: &mut Frame, area: Rect, form: &ProductForm, focused: bool, theme: &Theme, tick: u64) {
    let title = match form.edit_id {
        Some(id) => format!("Editar producto #{id}"),
        None => "Nuevo producto".to_string(),
    };
    let block = panel_block(&title, focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cursor_on = tick % 2 == 0;
    let mut lines = vec![
        field_line(
            "Nombre",
            &form.nombre,
            form.selected == Field::Nombre,
            form.editing,
            cursor_on,
            theme,
        ),
        field_line(
            "Precio",
            &form.precio,
            form.selected == Field::Precio,
            form.editing,
            cursor_on,
            theme,
        ),
        Line::raw(""),
    ];
    let hint = if form.disabled {
        Line::from(Span::styled("Guardando…", theme.text_editing_bold()))
    } else {
        let save_label = if form.is_edit() {
            "Ctrl+S Actualizar"
        } else {
            "Ctrl+S Guardar"
        };
        Line::from(Span::styled(
            format!("Enter editar campo  {save_label}  Ctrl+L Limpiar"),
            theme.text_muted(),
        ))
    };
    lines.push(hint);

    let style = if form.disabled {
        theme.text_muted()
    } else {
        Style::default()
    };
    f.render_widget(Paragraph::new(lines).style(style), inner);
}
