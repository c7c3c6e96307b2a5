//! 状态类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::action::ActionKind;
use crate::cart::CartState;
use crate::catalog::{CatalogItem, CatalogState, Collection, ItemKind};

/// Whole store state. Each branch is shared so a transition only rebuilds
/// the branch it touches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub beans: Arc<CatalogState>,
    pub coffee: Arc<CatalogState>,
    pub cart: Arc<CartState>,
}

impl RootState {
    pub fn new(beans: CatalogState, coffee: CatalogState) -> Self {
        Self {
            beans: Arc::new(beans),
            coffee: Arc::new(coffee),
            cart: Arc::new(CartState::default()),
        }
    }

    pub fn catalog(&self, collection: Collection) -> &CatalogState {
        match collection {
            Collection::Beans => &self.beans,
            Collection::Coffee => &self.coffee,
        }
    }

    /// Current catalog item of `kind` with `id`.
    pub fn item(&self, kind: ItemKind, id: &str) -> Option<&CatalogItem> {
        self.catalog(kind.collection()).get(id)
    }

    /// Favorites of both collections, beans first, each in index order.
    pub fn favorite_items(&self) -> Vec<&CatalogItem> {
        let mut out = self.beans.favorite_items();
        out.extend(self.coffee.favorite_items());
        out
    }
}

/// Durable sub-states, named as in the snapshot and the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubState {
    CatalogBeans,
    CatalogCoffee,
    Cart,
}

impl SubState {
    pub const ALL: [SubState; 3] = [SubState::CatalogBeans, SubState::CatalogCoffee, SubState::Cart];

    pub fn key(self) -> &'static str {
        match self {
            SubState::CatalogBeans => "catalog_beans",
            SubState::CatalogCoffee => "catalog_coffee",
            SubState::Cart => "cart",
        }
    }
}

/// 状态事件
#[derive(Debug, Clone)]
pub enum StateEvent {
    /// 启动快照已合并，门控打开
    Rehydrated {
        revision: u64,
        restored: Vec<SubState>,
        state: Arc<RootState>,
        timestamp: DateTime<Utc>,
    },
    /// 用户动作改变了状态
    Changed {
        revision: u64,
        action: ActionKind,
        state: Arc<RootState>,
        timestamp: DateTime<Utc>,
    },
    /// 结账成功（购物车随后被清空）
    CheckoutCompleted {
        transaction_ref: String,
        amount_minor: u64,
        currency: String,
        timestamp: DateTime<Utc>,
    },
}

impl StateEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Rehydrated { timestamp, .. } => *timestamp,
            Self::Changed { timestamp, .. } => *timestamp,
            Self::CheckoutCompleted { timestamp, .. } => *timestamp,
        }
    }

    /// State carried by the event, if it describes a transition.
    pub fn state(&self) -> Option<(u64, &Arc<RootState>)> {
        match self {
            Self::Rehydrated {
                revision, state, ..
            }
            | Self::Changed {
                revision, state, ..
            } => Some((*revision, state)),
            Self::CheckoutCompleted { .. } => None,
        }
    }
}
