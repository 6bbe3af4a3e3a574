use super::*;
use crate::model::{MSG_NAME_REQUIRED, MSG_PRICE_INVALID};
use crate::ui::AppState;

fn producto(id: u64, nombre: &str, precio: f64) -> Producto {
    Producto {
        id,
        nombre: nombre.into(),
        precio,
    }
}

fn state_with_form(nombre: &str, precio: &str, edit_id: Option<u64>) -> AppState {
    let mut st = AppState::default();
    st.form.nombre = nombre.to_string();
    st.form.precio = precio.to_string();
    st.form.edit_id = edit_id;
    st
}

#[test]
fn reload_clears_banners_and_loads() {
    let mut st = AppState::default();
    st.last_error = Some("old".into());
    st.show_toast("old toast", ToastLevel::Success, 3);
    let effects = update(&mut st, AppMsg::ReloadRequested);
    assert_eq!(effects, vec![Effect::LoadProducts]);
    assert!(st.last_error.is_none());
    assert!(st.toast.is_none());
    assert!(st.loading);
}

#[test]
fn submit_with_empty_name_issues_no_request() {
    let mut st = state_with_form("   ", "10", None);
    let effects = update(&mut st, AppMsg::SubmitPressed);
    assert!(effects.is_empty());
    assert_eq!(st.last_error.as_deref(), Some(MSG_NAME_REQUIRED));
    assert!(!st.submitting);
}

#[test]
fn submit_with_bad_price_issues_no_request() {
    for precio in ["-1", "abc", ""] {
        let mut st = state_with_form("Gadget", precio, None);
        let effects = update(&mut st, AppMsg::SubmitPressed);
        assert!(effects.is_empty(), "price {precio:?} must not submit");
        assert_eq!(st.last_error.as_deref(), Some(MSG_PRICE_INVALID));
    }
}

#[test]
fn submit_clears_previous_banners_before_validating() {
    let mut st = state_with_form("", "x", None);
    st.show_toast("stale", ToastLevel::Success, 3);
    let _ = update(&mut st, AppMsg::SubmitPressed);
    // The stale toast is gone; the new validation error is in place.
    assert!(st.toast.is_none());
    assert_eq!(st.last_error.as_deref(), Some(MSG_NAME_REQUIRED));
}

#[test]
fn submit_without_id_creates() {
    let mut st = state_with_form("Gadget", "15", None);
    let effects = update(&mut st, AppMsg::SubmitPressed);
    assert_eq!(
        effects,
        vec![Effect::Save {
            id: None,
            input: ProductoInput {
                nombre: "Gadget".into(),
                precio: 15.0
            }
        }]
    );
    assert!(st.submitting);
    assert!(st.form.disabled);
}

#[test]
fn submit_with_id_updates() {
    let mut st = state_with_form("Gadget", "15", Some(7));
    let effects = update(&mut st, AppMsg::SubmitPressed);
    assert_eq!(
        effects,
        vec![Effect::Save {
            id: Some(7),
            input: ProductoInput {
                nombre: "Gadget".into(),
                precio: 15.0
            }
        }]
    );
}

#[test]
fn submit_while_in_flight_is_ignored() {
    let mut st = state_with_form("Gadget", "15", None);
    st.submitting = true;
    let effects = update(&mut st, AppMsg::SubmitPressed);
    assert!(effects.is_empty());
}

#[test]
fn clear_while_in_flight_is_ignored() {
    let mut st = state_with_form("Gadget", "15", Some(7));
    st.submitting = true;
    st.form.disabled = true;
    let effects = update(&mut st, AppMsg::ClearPressed);
    assert!(effects.is_empty());
    assert_eq!(st.form.edit_id, Some(7));
    assert_eq!(st.form.nombre, "Gadget");
}

#[test]
fn save_done_created_toasts_resets_and_reloads_once() {
    let mut st = state_with_form("Gadget", "15", None);
    st.submitting = true;
    st.form.disabled = true;
    let effects = update(
        &mut st,
        AppMsg::SaveDone {
            kind: SaveKind::Created,
            outcome: Ok(producto(4, "Gadget", 15.0)),
        },
    );
    assert_eq!(
        effects,
        vec![
            Effect::ShowToast {
                text: MSG_CREATED.into(),
                level: ToastLevel::Success,
                seconds: 3
            },
            Effect::LoadProducts,
        ]
    );
    // Form is back in create mode and re-enabled.
    assert!(st.form.edit_id.is_none());
    assert!(st.form.nombre.is_empty());
    assert!(!st.form.disabled);
    assert!(!st.submitting);
}

#[test]
fn save_done_updated_uses_the_update_message() {
    let mut st = state_with_form("Gadget", "15", Some(7));
    st.submitting = true;
    let effects = update(
        &mut st,
        AppMsg::SaveDone {
            kind: SaveKind::Updated,
            outcome: Ok(producto(7, "Gadget", 15.0)),
        },
    );
    assert!(matches!(
        &effects[0],
        Effect::ShowToast { text, .. } if text == MSG_UPDATED
    ));
}

#[test]
fn save_done_error_sets_prefixed_error_and_reenables() {
    let mut st = state_with_form("Gadget", "15", Some(7));
    st.submitting = true;
    st.form.disabled = true;
    let effects = update(
        &mut st,
        AppMsg::SaveDone {
            kind: SaveKind::Updated,
            outcome: Err("HTTP 500".into()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(st.last_error.as_deref(), Some("Error al guardar: HTTP 500"));
    assert!(!st.submitting);
    assert!(!st.form.disabled);
    // The form keeps what the user typed.
    assert_eq!(st.form.nombre, "Gadget");
    assert_eq!(st.form.edit_id, Some(7));
}

#[test]
fn products_loaded_replaces_rows_in_server_order() {
    let mut st = AppState::default();
    st.loading = true;
    let _ = update(
        &mut st,
        AppMsg::ProductsLoaded(Ok(vec![
            producto(2, "Raton", 29.99),
            producto(1, "Portatil", 999.99),
        ])),
    );
    assert!(!st.loading);
    assert_eq!(st.productos.len(), 2);
    assert_eq!(st.productos[0].id, 2);
}

#[test]
fn products_load_error_keeps_previous_rows() {
    let mut st = AppState::default();
    st.productos = vec![producto(1, "Portatil", 999.99)];
    let _ = update(&mut st, AppMsg::ProductsLoaded(Err("HTTP 500".into())));
    assert_eq!(st.productos.len(), 1);
    assert_eq!(
        st.last_error.as_deref(),
        Some("Error al cargar productos: HTTP 500")
    );
}

#[test]
fn products_loaded_clamps_table_selection() {
    let mut st = AppState::default();
    st.table_selected = 5;
    let _ = update(&mut st, AppMsg::ProductsLoaded(Ok(vec![producto(1, "X", 1.0)])));
    assert_eq!(st.table_selected, 0);
}

#[test]
fn fetched_product_populates_form_and_focuses_it() {
    let mut st = AppState::default();
    st.focus = crate::ui::Focus::Table;
    let _ = update(
        &mut st,
        AppMsg::ProductFetched(Ok(producto(3, "Teclado", 99.9))),
    );
    assert_eq!(st.form.edit_id, Some(3));
    assert_eq!(st.form.nombre, "Teclado");
    assert_eq!(st.form.precio, "99.90");
    assert_eq!(st.focus, crate::ui::Focus::Form);
}

#[test]
fn fetch_error_surfaces_as_error_banner() {
    let mut st = AppState::default();
    let _ = update(
        &mut st,
        AppMsg::ProductFetched(Err("Producto no encontrado".into())),
    );
    assert_eq!(
        st.last_error.as_deref(),
        Some("Error al cargar el producto: Producto no encontrado")
    );
    assert!(st.form.edit_id.is_none());
}

#[test]
fn delete_request_only_opens_the_confirm_modal() {
    let mut st = AppState::default();
    st.productos = vec![producto(3, "Teclado", 99.9)];
    let effects = update(&mut st, AppMsg::DeleteRequested(3));
    assert!(effects.is_empty());
    let pending = st.confirm.as_ref().unwrap();
    assert_eq!(pending.id, 3);
    assert_eq!(pending.nombre.as_deref(), Some("Teclado"));
}

#[test]
fn declining_the_confirm_is_a_no_op() {
    let mut st = AppState::default();
    st.productos = vec![producto(3, "Teclado", 99.9)];
    let _ = update(&mut st, AppMsg::DeleteRequested(3));
    let effects = update(&mut st, AppMsg::ConfirmAnswered { accepted: false });
    assert!(effects.is_empty());
    assert!(st.confirm.is_none());
    assert_eq!(st.productos.len(), 1);
}

#[test]
fn accepting_the_confirm_issues_the_delete() {
    let mut st = AppState::default();
    st.productos = vec![producto(3, "Teclado", 99.9)];
    let _ = update(&mut st, AppMsg::DeleteRequested(3));
    let effects = update(&mut st, AppMsg::ConfirmAnswered { accepted: true });
    assert_eq!(effects, vec![Effect::Delete(3)]);
    assert!(st.confirm.is_none());
}

#[test]
fn delete_done_toasts_and_reloads() {
    let mut st = AppState::default();
    let effects = update(&mut st, AppMsg::DeleteDone(Ok(())));
    assert_eq!(
        effects,
        vec![
            Effect::ShowToast {
                text: MSG_DELETED.into(),
                level: ToastLevel::Success,
                seconds: 3
            },
            Effect::LoadProducts,
        ]
    );
}

#[test]
fn delete_error_uses_its_own_prefix() {
    let mut st = AppState::default();
    let _ = update(&mut st, AppMsg::DeleteDone(Err("HTTP 404".into())));
    assert_eq!(st.last_error.as_deref(), Some("Error al eliminar: HTTP 404"));
}

#[test]
fn clear_resets_form_and_error_but_keeps_success_toast() {
    let mut st = state_with_form("Gadget", "15", Some(7));
    st.last_error = Some("boom".into());
    st.show_toast("Producto creado correctamente", ToastLevel::Success, 3);
    let effects = update(&mut st, AppMsg::ClearPressed);
    assert!(effects.is_empty());
    assert!(st.form.edit_id.is_none());
    assert!(st.form.nombre.is_empty());
    assert!(st.last_error.is_none());
    // Success banners only go away via their own timeout.
    assert!(st.toast.is_some());
}

#[test]
fn edit_request_clears_error_and_fetches() {
    let mut st = AppState::default();
    st.last_error = Some("old".into());
    let effects = update(&mut st, AppMsg::EditRequested(5));
    assert_eq!(effects, vec![Effect::FetchProduct(5)]);
    assert!(st.last_error.is_none());
}

#[test]
fn toast_expires_after_fifteen_ticks() {
    let mut st = AppState::default();
    st.show_toast("hecho", ToastLevel::Success, 3);
    assert_eq!(st.toast.as_ref().unwrap().expires_at_tick, 15);
    st.tick = 14;
    st.expire_toast();
    assert!(st.toast.is_some());
    st.tick = 15;
    st.expire_toast();
    assert!(st.toast.is_none());
}

#[test]
fn replacing_a_toast_keeps_the_original_deadline() {
    let mut st = AppState::default();
    st.show_toast("primero", ToastLevel::Success, 3);
    st.tick = 5;
    st.show_toast("segundo", ToastLevel::Success, 3);
    let t = st.toast.as_ref().unwrap();
    assert_eq!(t.text, "segundo");
    // Still the first toast's deadline, not 5 + 15.
    assert_eq!(t.expires_at_tick, 15);
}

#[test]
fn empty_toast_text_is_a_no_op() {
    let mut st = AppState::default();
    st.show_toast("", ToastLevel::Success, 3);
    assert!(st.toast.is_none());
}

#[test]
fn error_banner_never_auto_hides() {
    let mut st = AppState::default();
    st.last_error = Some("persistente".into());
    st.tick = 1000;
    st.expire_toast();
    assert_eq!(st.last_error.as_deref(), Some("persistente"));
}
