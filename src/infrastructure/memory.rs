use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::cart::{Product, ProductId, StockLevel};
use crate::domain::errors::CartError;
use crate::domain::ports::{PersistenceStore, StockService};

// Every write is a single map operation, so a poisoned lock still guards
// consistent data and is recovered rather than reported.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Persistence store backed by a shared map. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, CartError> {
        Ok(read(&self.values).get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), CartError> {
        write(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Catalog and stock levels held in memory. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockService {
    products: Arc<RwLock<HashMap<ProductId, (Product, u32)>>>,
}

impl InMemoryStockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product, amount: u32) {
        self.insert_as(product.id, product, amount);
    }

    /// Registers `product` under `product_id` regardless of the product's own id.
    pub fn insert_as(&self, product_id: ProductId, product: Product, amount: u32) {
        write(&self.products).insert(product_id, (product, amount));
    }

    pub fn set_stock(&self, product_id: ProductId, amount: u32) {
        if let Some((_, stock)) = write(&self.products).get_mut(&product_id) {
            *stock = amount;
        }
    }

    pub fn remove(&self, product_id: ProductId) {
        write(&self.products).remove(&product_id);
    }

    fn lookup(&self, product_id: ProductId) -> Result<(Product, u32), CartError> {
        read(&self.products)
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CartError::stock_unavailable(product_id, "unknown product"))
    }
}

#[async_trait]
impl StockService for InMemoryStockService {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, CartError> {
        let (_, amount) = self.lookup(product_id)?;
        Ok(StockLevel { amount })
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, CartError> {
        let (product, _) = self.lookup(product_id)?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_clones_share_values() {
        let store = InMemoryStore::new();
        let other = store.clone();

        store.save("k", "v1").expect("save");
        other.save("k", "v2").expect("save");

        assert_eq!(store.load("k").expect("load").as_deref(), Some("v2"));
        assert_eq!(store.load("missing").expect("load"), None);
    }

    #[tokio::test]
    async fn poisoned_catalog_keeps_working() {
        let stock = InMemoryStockService::new();
        stock.insert(Product::new(ProductId(1)), 2);
        let products = Arc::clone(&stock.products);
        let _ = std::thread::spawn(move || {
            let _guard = products.write().expect("lock");
            panic!("poison the catalog lock");
        })
        .join();
        assert!(stock.products.is_poisoned());

        stock.set_stock(ProductId(1), 4);
        stock.insert(Product::new(ProductId(2)), 1);
        stock.remove(ProductId(2));

        assert_eq!(stock.get_stock(ProductId(1)).await.expect("stock").amount, 4);
        assert!(stock.get_product(ProductId(2)).await.is_err());
    }

    #[test]
    fn poisoned_store_keeps_working() {
        let store = InMemoryStore::new();
        let values = Arc::clone(&store.values);
        let _ = std::thread::spawn(move || {
            let _guard = values.write().expect("lock");
            panic!("poison the store lock");
        })
        .join();

        store.save("k", "v").expect("save");

        assert_eq!(store.load("k").expect("load").as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn stock_service_serves_products_and_levels() {
        let stock = InMemoryStockService::new();
        stock.insert(Product::new(ProductId(1)).with_detail("title", "Boot"), 2);
        stock.set_stock(ProductId(1), 6);

        let level = stock.get_stock(ProductId(1)).await.expect("stock");
        let product = stock.get_product(ProductId(1)).await.expect("product");

        assert_eq!(level.amount, 6);
        assert_eq!(product.details["title"], "Boot");
        assert!(matches!(
            stock.get_stock(ProductId(2)).await,
            Err(CartError::StockUnavailable { .. })
        ));
    }
}
