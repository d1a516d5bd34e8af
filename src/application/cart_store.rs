use std::num::NonZeroU32;

use log::{debug, info, warn};

use crate::domain::cart::{Cart, CartEntry, ProductId, CART_STORAGE_KEY};
use crate::domain::errors::CartError;
use crate::domain::ports::{PersistenceStore, StockService};

/// Owns the cart and keeps it in step with the persistence store.
///
/// Every mutation works on a copy of the entry list. The copy is saved first and
/// only replaces the live cart once the save succeeded, so a failed operation
/// leaves both the in-memory and the persisted cart untouched.
pub struct CartStore<S, P> {
    stock: S,
    storage: P,
    cart: Cart,
}

impl<S: StockService, P: PersistenceStore> CartStore<S, P> {
    pub fn new(stock: S, storage: P) -> Self {
        let cart = load_cart(&storage);
        Self {
            stock,
            storage,
            cart,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let mut updated = self.cart.clone();

        let stock = self.stock.get_stock(product_id).await?;
        let requested = u64::from(updated.quantity_of(product_id)) + 1;

        if requested > u64::from(stock.amount) {
            info!("Product {product_id}: {requested} requested, {} in stock", stock.amount);
            return Err(CartError::InsufficientStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        if let Some(entry) = updated.get_mut(product_id) {
            entry.quantity = entry
                .quantity
                .checked_add(1)
                .ok_or_else(|| CartError::InsufficientStock {
                    product_id,
                    requested,
                    available: stock.amount,
                })?;
        } else {
            let product = self.stock.get_product(product_id).await?;
            if product.id != product_id {
                return Err(CartError::stock_unavailable(
                    product_id,
                    format!("catalog returned product {}", product.id),
                ));
            }
            updated
                .entries_mut()
                .push(CartEntry::new(product, NonZeroU32::MIN));
        }

        self.commit(updated)
    }

    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let mut updated = self.cart.clone();

        let index = updated
            .position(product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;
        updated.entries_mut().remove(index);

        self.commit(updated)
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// Amounts of zero or below are ignored and leave the cart as it is.
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            debug!("Ignoring amount {amount} for product {product_id}");
            return Ok(());
        }

        let stock = self.stock.get_stock(product_id).await?;
        let insufficient = || CartError::InsufficientStock {
            product_id,
            requested: amount.unsigned_abs(),
            available: stock.amount,
        };

        if amount > i64::from(stock.amount) {
            info!("Product {product_id}: {amount} requested, {} in stock", stock.amount);
            return Err(insufficient());
        }
        let quantity = u32::try_from(amount)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(insufficient)?;

        let mut updated = self.cart.clone();
        let entry = updated
            .get_mut(product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;
        entry.quantity = quantity;

        self.commit(updated)
    }

    fn commit(&mut self, updated: Cart) -> Result<(), CartError> {
        let serialized = serde_json::to_string(&updated)
            .map_err(|e| CartError::PersistenceFailure(e.to_string()))?;
        self.storage.save(CART_STORAGE_KEY, &serialized)?;
        self.cart = updated;
        debug!(
            "Cart committed: {} entries, {} items",
            self.cart.len(),
            self.cart.total_quantity()
        );
        Ok(())
    }
}

fn load_cart<P: PersistenceStore>(storage: &P) -> Cart {
    let raw = match storage.load(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!("Could not load saved cart, starting empty: {e}");
            return Cart::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(cart) => cart,
        Err(e) => {
            warn!("Saved cart is unreadable, starting empty: {e}");
            Cart::new()
        }
    }
}
