pub mod cart_store;
pub mod handle;
