use crate::app::{update, AppMsg, Effect};
use crate::model::{AppConfig, Producto};
use crate::services::api::{self, ApiClient};
use crate::theme::Theme;
use crate::widgets::form::ProductForm;
use crate::widgets::{banner, confirm, form, status_bar, table};
use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Wrap};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    #[allow(dead_code)]
    Info,
}

#[derive(Debug)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

#[derive(Debug)]
pub struct PendingDelete {
    pub id: u64,
    pub nombre: Option<String>,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    #[default]
    Form,
    Table,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) api: Option<ApiClient>,
    pub(crate) header_h: u16,
    pub(crate) logo_lines: Vec<String>,
    pub(crate) productos: Vec<Producto>,
    pub(crate) form: ProductForm,
    pub(crate) focus: Focus,
    pub(crate) table_selected: usize,
    pub(crate) loading: bool,
    pub(crate) submitting: bool,
    pub(crate) last_error: Option<String>,
    pub(crate) toast: Option<Toast>,
    pub(crate) confirm: Option<PendingDelete>,
    pub(crate) tick: u64,
    tx: Option<Sender<AppMsg>>,
    rx: Option<Receiver<AppMsg>>,
    pub(crate) theme: Theme,
    pub(crate) show_debug: bool,
    pub(crate) debug_log: VecDeque<String>,
}

impl AppState {
    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }

    pub fn selected_producto(&self) -> Option<&Producto> {
        self.productos.get(self.table_selected)
    }

    /// Show is a no-op on empty text. Replacing a visible toast keeps
    /// the original deadline: the first timer fires at its original
    /// elapsed time.
    pub fn show_toast(&mut self, text: &str, level: ToastLevel, seconds: u64) {
        if text.is_empty() {
            return;
        }
        let expires_at_tick = match &self.toast {
            Some(t) => t.expires_at_tick,
            None => self.tick.saturating_add(seconds.saturating_mul(5)), // ~200ms tick
        };
        self.toast = Some(Toast {
            text: text.to_string(),
            level,
            expires_at_tick,
        });
    }

    pub fn expire_toast(&mut self) {
        if let Some(t) = &self.toast {
            if self.tick >= t.expires_at_tick {
                self.toast = None;
            }
        }
    }
}

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::LoadProducts => {
                state.dbg("GET /productos");
                if let (Some(api), Some(tx)) = (state.api.clone(), state.tx.clone()) {
                    api::spawn_list(api, tx);
                }
            }
            Effect::FetchProduct(id) => {
                state.dbg(format!("GET /productos/{id}"));
                if let (Some(api), Some(tx)) = (state.api.clone(), state.tx.clone()) {
                    api::spawn_fetch(api, id, tx);
                }
            }
            Effect::Save { id, input } => {
                match id {
                    Some(id) => state.dbg(format!("PUT /productos/{id}")),
                    None => state.dbg("POST /productos"),
                }
                if let (Some(api), Some(tx)) = (state.api.clone(), state.tx.clone()) {
                    api::spawn_save(api, id, input, tx);
                }
            }
            Effect::Delete(id) => {
                state.dbg(format!("DELETE /productos/{id}"));
                if let (Some(api), Some(tx)) = (state.api.clone(), state.tx.clone()) {
                    api::spawn_delete(api, id, tx);
                }
            }
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                state.show_toast(&text, level, seconds);
            }
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub(crate) fn load_config() -> Result<AppConfig> {
    if let Ok(path) = std::env::var("CATALOGO_CONFIG") {
        let s = fs::read_to_string(&path).with_context(|| format!("leyendo {path}"))?;
        return serde_yaml::from_str(&s).with_context(|| format!("interpretando {path}"));
    }
    let p = PathBuf::from("catalogo.yaml");
    if p.exists() {
        let s = fs::read_to_string(&p).context("leyendo catalogo.yaml")?;
        return serde_yaml::from_str(&s).context("interpretando catalogo.yaml");
    }
    Ok(AppConfig::default())
}

fn init_logo_and_header(state: &mut AppState) {
    let mut lines: Vec<String> = Vec::new();
    if let Some(path) = state.config.logo.clone() {
        let pb = PathBuf::from(&path);
        let full = if pb.is_absolute() {
            pb
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(&path)
        };
        if let Ok(s) = fs::read_to_string(&full) {
            lines = s.lines().map(|l| l.to_string()).collect();
        }
    }
    if lines.is_empty() {
        lines = vec!["Catálogo de productos".to_string()];
    }
    // One extra row for the banner's bottom border.
    state.header_h = (lines.len() as u16).saturating_add(1);
    state.logo_lines = lines;
}

pub fn run() -> Result<()> {
    let cfg = load_config()?;
    let base_url = api::resolve_api_url(&cfg);
    let mut state = AppState {
        config: cfg,
        api: Some(ApiClient::new(base_url)),
        header_h: 2,
        theme: Theme::dark(),
        ..Default::default()
    };
    init_logo_and_header(&mut state);
    let (tx, rx) = mpsc::channel::<AppMsg>();
    state.tx = Some(tx);
    state.rx = Some(rx);

    // Headless smoke mode
    if env_flag("CATALOGO_HEADLESS") {
        let ticks: u64 = std::env::var("CATALOGO_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend)?;
        let effs = update(&mut state, AppMsg::ReloadRequested);
        run_effects(&mut state, effs);
        for _ in 0..ticks {
            terminal.draw(|f| ui(f, &mut state))?;
            drain_messages(&mut state);
            state.tick = state.tick.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(200));
        }
        if env_flag("CATALOGO_SMOKE_SUMMARY") {
            let summary = serde_json::json!({
                "ok": state.last_error.is_none(),
                "rows": state.productos.len(),
                "loading": state.loading,
            });
            println!("{summary}");
        }
        return Ok(());
    }

    // Setup terminal (interactive)
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    // Initial load
    let effs = update(&mut state, AppMsg::ReloadRequested);
    run_effects(&mut state, effs);

    let res: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| ui(f, &mut state)) {
            break Err(e.into());
        }
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if handle_key(&mut state, key) {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }
        drain_messages(&mut state);
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

// Pump request completions; each one is applied even when a later
// action has superseded it (last response wins).
fn drain_messages(state: &mut AppState) {
    let mut drained: Vec<AppMsg> = Vec::new();
    if let Some(rx) = &state.rx {
        while let Ok(msg) = rx.try_recv() {
            drained.push(msg);
        }
    }
    for msg in drained {
        let effects = update(state, msg);
        run_effects(state, effects);
    }
}

fn dispatch(state: &mut AppState, msg: AppMsg) {
    let effects = update(state, msg);
    run_effects(state, effects);
}

/// Returns true when the app should quit.
pub(crate) fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    // The confirm modal blocks everything else until answered.
    if state.confirm.is_some() {
        let accepted = matches!(
            key.code,
            KeyCode::Char('s') | KeyCode::Char('y') | KeyCode::Enter
        );
        let declined = matches!(key.code, KeyCode::Char('n') | KeyCode::Esc);
        if accepted || declined {
            dispatch(state, AppMsg::ConfirmAnswered { accepted });
        }
        return false;
    }
    // Editing a form field gates the global shortcuts
    let editing = matches!(state.focus, Focus::Form) && state.form.editing;
    if !editing {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                state.focus = match state.focus {
                    Focus::Form => Focus::Table,
                    Focus::Table => Focus::Form,
                };
                return false;
            }
            KeyCode::F(12) => {
                state.show_debug = !state.show_debug;
                return false;
            }
            _ => {}
        }
    }
    match state.focus {
        Focus::Form => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('s') => dispatch(state, AppMsg::SubmitPressed),
                    KeyCode::Char('l') => dispatch(state, AppMsg::ClearPressed),
                    _ => {}
                }
                return false;
            }
            state.form.handle_key(key.code);
        }
        Focus::Table => {
            let msg = match key.code {
                KeyCode::Up => {
                    state.table_selected = state.table_selected.saturating_sub(1);
                    None
                }
                KeyCode::Down => {
                    if state.table_selected + 1 < state.productos.len() {
                        state.table_selected += 1;
                    }
                    None
                }
                KeyCode::Char('e') | KeyCode::Enter => state
                    .selected_producto()
                    .map(|p| AppMsg::EditRequested(p.id)),
                KeyCode::Char('d') | KeyCode::Delete => state
                    .selected_producto()
                    .map(|p| AppMsg::DeleteRequested(p.id)),
                KeyCode::Char('r') => Some(AppMsg::ReloadRequested),
                KeyCode::Char('n') => {
                    state.focus = Focus::Form;
                    Some(AppMsg::ClearPressed)
                }
                _ => None,
            };
            if let Some(msg) = msg {
                dispatch(state, msg);
            }
        }
    }
    false
}

fn ui(f: &mut Frame, state: &mut AppState) {
    state.expire_toast();

    let screen = f.area();
    let bg = Block::default().style(state.theme.base_style());
    f.render_widget(bg, screen);

    let mut constraints = vec![
        Constraint::Length(state.header_h.max(1)),
        Constraint::Length(6),
    ];
    let has_error = state.last_error.is_some();
    if has_error {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(3));
    if state.show_debug {
        constraints.push(Constraint::Length(4));
    }
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(screen);

    let mut idx = 0;
    banner::draw_banner(f, chunks[idx], state);
    idx += 1;
    form::draw_form(
        f,
        chunks[idx],
        &state.form,
        matches!(state.focus, Focus::Form),
        &state.theme,
        state.tick,
    );
    idx += 1;
    if has_error {
        status_bar::draw_error_banner(f, chunks[idx], state);
        idx += 1;
    }
    table::draw_table(
        f,
        chunks[idx],
        &state.productos,
        state.table_selected,
        matches!(state.focus, Focus::Table),
        &state.theme,
    );
    idx += 1;
    if state.show_debug {
        draw_debug(f, chunks[idx], state);
        idx += 1;
    }
    let help_text = match state.focus {
        Focus::Form => "Tab tabla  ↑/↓ campo  Enter editar  Ctrl+S guardar  Ctrl+L limpiar  q salir",
        Focus::Table => "Tab formulario  ↑/↓ fila  e editar  d eliminar  r recargar  n nuevo  q salir",
    };
    status_bar::draw_footer(f, chunks[idx], state, help_text);

    if let Some(pending) = &state.confirm {
        confirm::draw_confirm(f, screen, pending, &state.theme);
    }
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(ratatui::widgets::Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            "Debug",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
    // Take last `area.height` lines
    let h = area.height as usize;
    let total = state.debug_log.len();
    let start = total.saturating_sub(h);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(start)
        .map(|s| Line::raw(s.clone()))
        .collect();
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}
