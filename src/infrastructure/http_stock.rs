use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::cart::{Product, ProductId, StockLevel};
use crate::domain::errors::CartError;
use crate::domain::ports::StockService;

/// Stock service talking to the catalog REST API.
///
/// `GET {base}/stock/{id}` returns `{"id": .., "amount": ..}` and
/// `GET {base}/products/{id}` returns the product object.
#[derive(Debug, Clone)]
pub struct HttpStockService {
    client: Client,
    base_url: String,
}

impl HttpStockService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        product_id: ProductId,
    ) -> Result<T, CartError> {
        let url = format!("{}/{}/{}", self.base_url, resource, product_id);
        debug!("GET {url}");

        let unavailable = |e: reqwest::Error| CartError::stock_unavailable(product_id, e);
        self.client
            .get(&url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<T>()
            .await
            .map_err(unavailable)
    }
}

#[async_trait]
impl StockService for HttpStockService {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, CartError> {
        self.fetch("stock", product_id).await
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, CartError> {
        self.fetch("products", product_id).await
    }
}
