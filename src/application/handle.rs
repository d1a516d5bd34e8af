use std::sync::Arc;

use tokio::sync::Mutex;

use super::cart_store::CartStore;
use crate::domain::cart::{Cart, ProductId};
use crate::domain::errors::CartError;
use crate::domain::ports::{PersistenceStore, StockService};

/// Shared handle to a [`CartStore`].
///
/// The lock is held for the whole operation, stock lookups included, so
/// overlapping calls are applied one after the other.
pub struct CartHandle<S, P> {
    inner: Arc<Mutex<CartStore<S, P>>>,
}

impl<S, P> Clone for CartHandle<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StockService, P: PersistenceStore> CartHandle<S, P> {
    pub fn new(store: CartStore<S, P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn snapshot(&self) -> Cart {
        self.inner.lock().await.cart().clone()
    }

    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        self.inner.lock().await.add_product(product_id).await
    }

    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        self.inner.lock().await.remove_product(product_id)
    }

    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        self.inner
            .lock()
            .await
            .update_product_amount(product_id, amount)
            .await
    }
}
