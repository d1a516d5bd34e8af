pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use std::time::Duration;

pub use application::cart_store::CartStore;
pub use application::handle::CartHandle;
pub use domain::cart::{Cart, CartEntry, Product, ProductId, StockLevel, CART_STORAGE_KEY};
pub use domain::errors::CartError;
pub use errors::{Notice, StartupError};

use infrastructure::file_store::FileStore;
use infrastructure::http_stock::HttpStockService;

pub type HttpCartStore = CartStore<HttpStockService, FileStore>;

/// Build a cart store backed by the catalog API and a file store in `storage_dir`.
///
/// The saved cart, if any, is loaded before this returns.
pub fn build_store(
    api_url: &str,
    storage_dir: &std::path::Path,
    timeout: Duration,
) -> Result<HttpCartStore, StartupError> {
    let stock = HttpStockService::new(api_url, timeout)?;
    let storage = FileStore::open(storage_dir)?;
    Ok(CartStore::new(stock, storage))
}
