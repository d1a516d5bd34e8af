use thiserror::Error;

use super::cart::ProductId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Stock unavailable for product {product_id}: {reason}")]
    StockUnavailable { product_id: ProductId, reason: String },
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

impl CartError {
    pub fn stock_unavailable(product_id: ProductId, reason: impl ToString) -> Self {
        Self::StockUnavailable {
            product_id,
            reason: reason.to_string(),
        }
    }

    /// Expected outcomes of a well-formed request, as opposed to failures of a collaborator.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InsufficientStock { .. } | Self::ProductNotInCart(_)
        )
    }
}
