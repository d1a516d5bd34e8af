pub mod file_store;
pub mod http_stock;
pub mod memory;
pub mod notifier;
