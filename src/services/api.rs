use crate::app::{AppMsg, SaveKind};
use crate::model::{AppConfig, Producto, ProductoInput};
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::sync::mpsc::Sender;
use std::thread;

pub const DEFAULT_API_URL: &str = "http://localhost:7070/api";

// Expand ${VAR} references in a configured URL from the environment.
fn expand_env(raw: &str) -> String {
    let re = Regex::new(r"\$\{([A-Z0-9_]+)\}").unwrap();
    let env_map: HashMap<String, String> = env::vars().collect();
    re.replace_all(raw, |caps: &regex::Captures| {
        env_map.get(&caps[1]).cloned().unwrap_or_default()
    })
    .to_string()
}

/// Base URL precedence: CATALOGO_API_URL, then the config file, then
/// the default local backend address.
pub fn resolve_api_url(cfg: &AppConfig) -> String {
    if let Ok(v) = env::var("CATALOGO_API_URL") {
        if !v.is_empty() {
            return v;
        }
    }
    if let Some(url) = &cfg.api_url {
        if !url.is_empty() {
            return expand_env(url);
        }
    }
    DEFAULT_API_URL.to_string()
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/productos", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/productos/{}", self.base_url, id)
    }

    pub fn list(&self) -> Result<Vec<Producto>> {
        let resp = self
            .http
            .get(self.collection_url())
            .send()
            .context("conectando con el servidor")?;
        let resp = check_status(resp)?;
        resp.json::<Vec<Producto>>()
            .context("decodificando la lista de productos")
    }

    pub fn get(&self, id: u64) -> Result<Producto> {
        let resp = self
            .http
            .get(self.item_url(id))
            .send()
            .context("conectando con el servidor")?;
        let resp = check_status(resp)?;
        resp.json::<Producto>().context("decodificando el producto")
    }

    pub fn create(&self, input: &ProductoInput) -> Result<Producto> {
        let resp = self
            .http
            .post(self.collection_url())
            .json(input)
            .send()
            .context("conectando con el servidor")?;
        let resp = check_status(resp)?;
        resp.json::<Producto>()
            .context("decodificando el producto creado")
    }

    pub fn update(&self, id: u64, input: &ProductoInput) -> Result<Producto> {
        let resp = self
            .http
            .put(self.item_url(id))
            .json(input)
            .send()
            .context("conectando con el servidor")?;
        let resp = check_status(resp)?;
        resp.json::<Producto>()
            .context("decodificando el producto actualizado")
    }

    // The delete response body is ignored; only the status matters.
    pub fn delete(&self, id: u64) -> Result<()> {
        let resp = self
            .http
            .delete(self.item_url(id))
            .send()
            .context("conectando con el servidor")?;
        check_status(resp).map(|_| ())
    }
}

// Success is the HTTP success range. The backend reports failures as
// {"error": "..."}; surface its message when that shape is present.
fn check_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let server_msg = resp
        .json::<serde_json::Value>()
        .ok()
        .and_then(|v| v.get("error").and_then(|s| s.as_str()).map(String::from));
    match server_msg {
        Some(m) => Err(anyhow!(m)),
        None => Err(anyhow!("HTTP {status}")),
    }
}

fn err_chain(e: anyhow::Error) -> String {
    format!("{e:#}")
}

// Each request runs on its own thread; the completion message is always
// delivered, even when a later action has superseded it.

pub fn spawn_list(api: ApiClient, tx: Sender<AppMsg>) {
    thread::spawn(move || {
        let outcome = api.list().map_err(err_chain);
        let _ = tx.send(AppMsg::ProductsLoaded(outcome));
    });
}

pub fn spawn_fetch(api: ApiClient, id: u64, tx: Sender<AppMsg>) {
    thread::spawn(move || {
        let outcome = api.get(id).map_err(err_chain);
        let _ = tx.send(AppMsg::ProductFetched(outcome));
    });
}

pub fn spawn_save(api: ApiClient, id: Option<u64>, input: ProductoInput, tx: Sender<AppMsg>) {
    thread::spawn(move || {
        let (kind, outcome) = match id {
            None => (SaveKind::Created, api.create(&input).map_err(err_chain)),
            Some(id) => (SaveKind::Updated, api.update(id, &input).map_err(err_chain)),
        };
        let _ = tx.send(AppMsg::SaveDone { kind, outcome });
    });
}

pub fn spawn_delete(api: ApiClient, id: u64, tx: Sender<AppMsg>) {
    thread::spawn(move || {
        let outcome = api.delete(id).map_err(err_chain);
        let _ = tx.send(AppMsg::DeleteDone(outcome));
    });
}
