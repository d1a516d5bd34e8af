use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding an entry's quantity in the stored cart.
const QUANTITY_FIELD: &str = "amount";

/// Key under which the serialized cart is kept in the persistence store.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Catalog product as returned by the stock service.
///
/// Only `id` is interpreted; every other field is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Product {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StockLevel {
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "amount")]
    pub quantity: NonZeroU32,
}

impl CartEntry {
    /// A catalog field named like the quantity field is dropped; the cart's quantity wins.
    pub fn new(mut product: Product, quantity: NonZeroU32) -> Self {
        product.details.remove(QUANTITY_FIELD);
        Self { product, quantity }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// Ordered cart contents. Order is insertion order; ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartEntry>);

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, product_id: ProductId) -> Option<usize> {
        self.0.iter().position(|e| e.product_id() == product_id)
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.0.iter().find(|e| e.product_id() == product_id)
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.get(product_id).map_or(0, CartEntry::quantity)
    }

    pub fn total_quantity(&self) -> u64 {
        self.0.iter().map(|e| u64::from(e.quantity())).sum()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<CartEntry> {
        &mut self.0
    }

    pub(crate) fn get_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.0.iter_mut().find(|e| e.product_id() == product_id)
    }
}

impl From<Vec<CartEntry>> for Cart {
    fn from(entries: Vec<CartEntry>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
