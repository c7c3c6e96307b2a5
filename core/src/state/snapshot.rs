//! 状态快照和恢复
//!
//! The snapshot is one JSON document stored under the configured root key.
//! Only whitelisted sub-states are written, and only whitelisted sub-states
//! are honoured when reading one back.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::types::{RootState, SubState};
use crate::cart::{CartLine, PersistedCart};
use crate::catalog::{CatalogItem, CatalogState, PersistedCatalog};
use crate::error::StoreError;

/// Snapshot layout version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot as read back from storage. Every sub-state is optional; a
/// missing one leaves the seeded default in place.
#[derive(Debug, Clone, Default)]
pub struct PersistedState {
    pub version: Option<u32>,
    pub saved_at: Option<DateTime<Utc>>,
    pub catalog_beans: Option<PersistedCatalog>,
    pub catalog_coffee: Option<PersistedCatalog>,
    pub cart: Option<PersistedCart>,
}

impl PersistedState {
    /// Parses a stored snapshot.
    ///
    /// Fails only when the document is not a JSON object. A sub-state that
    /// does not have the expected shape is logged and treated as absent.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(mut map) = root else {
            return Err(StoreError::SnapshotShape(
                "snapshot root is not an object".to_string(),
            ));
        };

        let version = map
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok());
        let saved_at = map
            .get("savedAt")
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        Ok(Self {
            version,
            saved_at,
            catalog_beans: take_sub_state(&mut map, SubState::CatalogBeans, "beans"),
            catalog_coffee: take_sub_state(&mut map, SubState::CatalogCoffee, "coffee"),
            cart: take_sub_state(&mut map, SubState::Cart, "cart"),
        })
    }

    /// Drops every sub-state not named in `whitelist`.
    pub fn restricted_to(mut self, whitelist: &[SubState]) -> Self {
        if !whitelist.contains(&SubState::CatalogBeans) {
            self.catalog_beans = None;
        }
        if !whitelist.contains(&SubState::CatalogCoffee) {
            self.catalog_coffee = None;
        }
        if !whitelist.contains(&SubState::Cart) {
            self.cart = None;
        }
        self
    }

    /// Sub-states present in this snapshot.
    pub fn present(&self) -> Vec<SubState> {
        let mut out = Vec::new();
        if self.catalog_beans.is_some() {
            out.push(SubState::CatalogBeans);
        }
        if self.catalog_coffee.is_some() {
            out.push(SubState::CatalogCoffee);
        }
        if self.cart.is_some() {
            out.push(SubState::Cart);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}

fn take_sub_state<T>(
    map: &mut serde_json::Map<String, Value>,
    sub_state: SubState,
    legacy_key: &str,
) -> Option<T>
where
    T: serde::de::DeserializeOwned,
{
    let value = map
        .remove(sub_state.key())
        .or_else(|| map.remove(legacy_key))?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(sub_state = sub_state.key(), error = %e, "Ignoring malformed snapshot sub-state");
            None
        }
    }
}

/// Array stored under the first of `keys` that is present. A value of any
/// other type is logged and read as empty.
pub(crate) fn list_field(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Vec<Value> {
    let Some((key, value)) = keys.iter().find_map(|k| map.get(*k).map(|v| (*k, v))) else {
        return Vec::new();
    };
    match value {
        Value::Array(entries) => entries.clone(),
        Value::Null => Vec::new(),
        other => {
            warn!(field = key, found = json_type(other), "Ignoring snapshot field that is not a list");
            Vec::new()
        }
    }
}

/// Number stored under the first of `keys` that is present.
pub(crate) fn number_field(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<f64> {
    let (key, value) = keys.iter().find_map(|k| map.get(*k).map(|v| (*k, v)))?;
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Null => None,
        other => {
            warn!(field = key, found = json_type(other), "Ignoring snapshot field that is not a number");
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Serialize)]
struct CatalogOut<'a> {
    items: Vec<&'a CatalogItem>,
    favorites: &'a [String],
}

impl<'a> CatalogOut<'a> {
    fn new(state: &'a CatalogState) -> Self {
        Self {
            items: state.items.iter().map(|i| i.as_ref()).collect(),
            favorites: &state.favorites,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartOut<'a> {
    lines: &'a [CartLine],
    total_price: f64,
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    #[serde(rename = "savedAt")]
    saved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_beans: Option<CatalogOut<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_coffee: Option<CatalogOut<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart: Option<CartOut<'a>>,
}

/// Serializes the whitelisted sub-states of `state`.
pub fn encode_snapshot(state: &RootState, whitelist: &[SubState]) -> Result<String, StoreError> {
    let out = SnapshotOut {
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        catalog_beans: whitelist
            .contains(&SubState::CatalogBeans)
            .then(|| CatalogOut::new(&state.beans)),
        catalog_coffee: whitelist
            .contains(&SubState::CatalogCoffee)
            .then(|| CatalogOut::new(&state.coffee)),
        cart: whitelist.contains(&SubState::Cart).then(|| CartOut {
            lines: &state.cart.lines,
            total_price: state.cart.total_price,
        }),
    };
    Ok(serde_json::to_string(&out)?)
}
