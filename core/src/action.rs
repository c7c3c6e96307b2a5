//! The closed set of state-transition requests.

use serde::Serialize;

use crate::cart::CartLine;
use crate::catalog::Collection;
use crate::state::snapshot::PersistedState;

#[derive(Debug, Clone)]
pub enum Action {
    ToggleFavorite {
        collection: Collection,
        id: String,
    },
    AddToCart(CartLine),
    RemoveFromCart {
        id: String,
        size: String,
    },
    UpdateCartQuantity {
        id: String,
        size: String,
        quantity: u32,
    },
    ClearCart,
    /// Takes charged lines out of the cart. Quantities added since the
    /// charge stay behind.
    SettleCart(Vec<CartLine>),
    /// Loaded snapshot delivered once at startup.
    Rehydrate(Box<PersistedState>),
}

/// Payload-free tag of an [`Action`], used in events and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ToggleFavorite,
    AddToCart,
    RemoveFromCart,
    UpdateCartQuantity,
    ClearCart,
    SettleCart,
    Rehydrate,
}

impl Action {
    pub fn toggle_favorite(collection: Collection, id: impl Into<String>) -> Self {
        Action::ToggleFavorite {
            collection,
            id: id.into(),
        }
    }

    pub fn remove_from_cart(id: impl Into<String>, size: impl Into<String>) -> Self {
        Action::RemoveFromCart {
            id: id.into(),
            size: size.into(),
        }
    }

    pub fn update_cart_quantity(
        id: impl Into<String>,
        size: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Action::UpdateCartQuantity {
            id: id.into(),
            size: size.into(),
            quantity,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ToggleFavorite { .. } => ActionKind::ToggleFavorite,
            Action::AddToCart(_) => ActionKind::AddToCart,
            Action::RemoveFromCart { .. } => ActionKind::RemoveFromCart,
            Action::UpdateCartQuantity { .. } => ActionKind::UpdateCartQuantity,
            Action::ClearCart => ActionKind::ClearCart,
            Action::SettleCart(_) => ActionKind::SettleCart,
            Action::Rehydrate(_) => ActionKind::Rehydrate,
        }
    }
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::ToggleFavorite => "toggle_favorite",
            ActionKind::AddToCart => "add_to_cart",
            ActionKind::RemoveFromCart => "remove_from_cart",
            ActionKind::UpdateCartQuantity => "update_cart_quantity",
            ActionKind::ClearCart => "clear_cart",
            ActionKind::SettleCart => "settle_cart",
            ActionKind::Rehydrate => "rehydrate",
        }
    }
}
