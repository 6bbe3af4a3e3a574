use crate::model::{
    validate_input, Producto, ProductoInput, MSG_CREATED, MSG_DELETED, MSG_UPDATED,
};
use crate::ui::{AppState, Focus, PendingDelete, ToastLevel};

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

#[derive(Debug)]
pub enum AppMsg {
    // User intents
    ReloadRequested,
    SubmitPressed,
    ClearPressed,
    EditRequested(u64),
    DeleteRequested(u64),
    ConfirmAnswered { accepted: bool },
    // Request completions, delivered over the channel
    ProductsLoaded(Result<Vec<Producto>, String>),
    ProductFetched(Result<Producto, String>),
    SaveDone {
        kind: SaveKind,
        outcome: Result<Producto, String>,
    },
    DeleteDone(Result<(), String>),
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    LoadProducts,
    FetchProduct(u64),
    Save {
        id: Option<u64>,
        input: ProductoInput,
    },
    Delete(u64),
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        ReloadRequested => {
            // User-initiated reload clears both banners before fetching.
            state.last_error = None;
            state.toast = None;
            state.loading = true;
            effects.push(Effect::LoadProducts);
        }
        SubmitPressed => {
            if state.submitting {
                return effects;
            }
            state.last_error = None;
            state.toast = None;
            match validate_input(&state.form.nombre, &state.form.precio) {
                Err(e) => {
                    // Validation failures never reach the network.
                    state.last_error = Some(e);
                }
                Ok(input) => {
                    // Create vs update is decided by id presence alone.
                    let id = state.form.edit_id;
                    state.submitting = true;
                    state.form.disabled = true;
                    state.form.editing = false;
                    effects.push(Effect::Save { id, input });
                }
            }
        }
        ClearPressed => {
            // Both buttons are disabled while a save is in flight.
            if state.submitting {
                return effects;
            }
            // Back to create mode; a visible success toast is left alone.
            state.form.reset();
            state.last_error = None;
        }
        EditRequested(id) => {
            state.last_error = None;
            state.dbg(format!("edit requested #{id}"));
            effects.push(Effect::FetchProduct(id));
        }
        DeleteRequested(id) => {
            // Nothing is issued until the user confirms.
            let nombre = state
                .productos
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.nombre.clone());
            state.confirm = Some(PendingDelete { id, nombre });
        }
        ConfirmAnswered { accepted } => {
            if let Some(pending) = state.confirm.take() {
                if accepted {
                    state.last_error = None;
                    state.dbg(format!("delete confirmed #{}", pending.id));
                    effects.push(Effect::Delete(pending.id));
                } else {
                    state.dbg(format!("delete declined #{}", pending.id));
                }
            }
        }
        ProductsLoaded(outcome) => {
            state.loading = false;
            match outcome {
                Ok(items) => {
                    state.dbg(format!("loaded {} productos", items.len()));
                    // Server order is kept as-is.
                    state.productos = items;
                    if state.table_selected >= state.productos.len() {
                        state.table_selected = state.productos.len().saturating_sub(1);
                    }
                }
                Err(e) => {
                    // The table keeps its previous rows on a failed load.
                    state.dbg(format!("load failed: {e}"));
                    state.last_error = Some(format!("Error al cargar productos: {e}"));
                }
            }
        }
        ProductFetched(outcome) => match outcome {
            Ok(p) => {
                state.dbg(format!("editing #{}", p.id));
                state.form.load(&p);
                state.focus = Focus::Form;
            }
            Err(e) => {
                state.dbg(format!("fetch failed: {e}"));
                state.last_error = Some(format!("Error al cargar el producto: {e}"));
            }
        },
        SaveDone { kind, outcome } => {
            state.submitting = false;
            state.form.disabled = false;
            match outcome {
                Ok(p) => {
                    state.dbg(format!("saved #{}", p.id));
                    let text = match kind {
                        SaveKind::Created => MSG_CREATED,
                        SaveKind::Updated => MSG_UPDATED,
                    };
                    effects.push(Effect::ShowToast {
                        text: text.to_string(),
                        level: ToastLevel::Success,
                        seconds: 3,
                    });
                    state.form.reset();
                    state.loading = true;
                    effects.push(Effect::LoadProducts);
                }
                Err(e) => {
                    state.dbg(format!("save failed: {e}"));
                    state.last_error = Some(format!("Error al guardar: {e}"));
                }
            }
        }
        DeleteDone(outcome) => match outcome {
            Ok(()) => {
                state.dbg("deleted");
                effects.push(Effect::ShowToast {
                    text: MSG_DELETED.to_string(),
                    level: ToastLevel::Success,
                    seconds: 3,
                });
                state.loading = true;
                effects.push(Effect::LoadProducts);
            }
            Err(e) => {
                state.dbg(format!("delete failed: {e}"));
                state.last_error = Some(format!("Error al eliminar: {e}"));
            }
        },
    }
    effects
}
