//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `brewcart_core::api` instead of reaching into internal modules.

pub use crate::action::{Action, ActionKind};
pub use crate::cart::{CartLine, CartState};
pub use crate::catalog::{
    categories, filter_by_category, search, CatalogItem, CatalogState, Collection, ImageRef,
    ItemKind, PriceTier, ALL_CATEGORIES,
};
pub use crate::checkout::{
    BillingDetails, CheckoutPricing, CheckoutProvider, CheckoutRequest, Receipt,
};
pub use crate::config::{
    get_brewcart_data_dir, load_default, load_from_path, AppConfig, CheckoutConfig,
    LoggingConfig, PersistenceConfig,
};
pub use crate::error::{CheckoutError, CliError, StoreError};
pub use crate::persist::{MemoryEngine, PersistenceEngine};
pub use crate::seed::{SeedProvider, StaticSeed};
pub use crate::state::{
    PendingStore, PersistedState, RootState, StateEvent, Store, StoreOptions, StorePhase,
    SubState,
};
