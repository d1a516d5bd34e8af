use async_trait::async_trait;

use super::cart::{Product, ProductId, StockLevel};
use super::errors::CartError;

/// Remote source of stock counts and catalog data.
#[async_trait]
pub trait StockService: Send + Sync + 'static {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, CartError>;
    async fn get_product(&self, product_id: ProductId) -> Result<Product, CartError>;
}

/// Durable key-value storage. Writes must be all-or-nothing.
pub trait PersistenceStore: Send + Sync + 'static {
    fn load(&self, key: &str) -> Result<Option<String>, CartError>;
    fn save(&self, key: &str, value: &str) -> Result<(), CartError>;
}
