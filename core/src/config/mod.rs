mod load;
mod types;

pub use load::{get_brewcart_data_dir, load_default, load_from_path};
pub use types::{
    AppConfig, CatalogConfig, CheckoutConfig, LoggingConfig, PersistenceConfig, StoreConfig,
};
