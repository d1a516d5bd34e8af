use thiserror::Error;

use crate::domain::errors::CartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

/// User-facing message category raised when a cart operation does not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Notice {
    #[error("Requested quantity is out of stock")]
    OutOfStock,
    #[error("Could not add the product")]
    AddFailed,
    #[error("Could not remove the product")]
    RemoveFailed,
    #[error("Could not change the product quantity")]
    UpdateFailed,
}

impl Notice {
    pub fn new(operation: Operation, error: &CartError) -> Self {
        match (error, operation) {
            (CartError::InsufficientStock { .. }, _) => Notice::OutOfStock,
            (_, Operation::Add) => Notice::AddFailed,
            (_, Operation::Remove) => Notice::RemoveFailed,
            (_, Operation::Update) => Notice::UpdateFailed,
        }
    }
}

/// Channel through which notices reach a human.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Failure to wire up the store's collaborators at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Storage: {0}")]
    Storage(#[from] CartError),
}
