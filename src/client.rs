//! Sales backend HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::{Customer, NewSale, Product, Sale};

const SALES_PATH: &str = "/sales/";
const CUSTOMERS_PATH: &str = "/customers";
const PRODUCTS_PATH: &str = "/products";
const CREATE_SALE_PATH: &str = "/sales";

/// Backend operations used by the screens.
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// Base address requests are sent to.
    fn base_url(&self) -> &str;

    async fn list_sales(&self) -> Result<Vec<Sale>>;

    async fn list_customers(&self) -> Result<Vec<Customer>>;

    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Post a new sale. Any HTTP answer is an outcome, not an error.
    async fn create_sale(&self, sale: &NewSale) -> Result<SubmitOutcome>;
}

/// What the backend answered to a create-sale request.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// HTTP status, absent when the request never completed.
    pub status: Option<u16>,
    /// Response body kept verbatim.
    pub body: Value,
}

impl SubmitOutcome {
    /// Outcome for a request that failed before a JSON answer arrived.
    pub fn from_error(err: &AppError) -> Self {
        Self {
            status: None,
            body: json!({ "error": err.to_string() }),
        }
    }

    /// Outcome for an HTTP answer. A body that is not JSON becomes `{"error": ...}`,
    /// the status is kept either way.
    pub fn from_response(status: u16, bytes: &[u8]) -> Self {
        let body = serde_json::from_slice::<Value>(bytes).unwrap_or_else(|e| {
            warn!("HTTP {status} answer is not JSON: {e}");
            json!({ "error": AppError::from(e).to_string() })
        });
        Self {
            status: Some(status),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|s| (200..300).contains(&s))
    }

    /// Body pretty-printed for display.
    pub fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}

/// reqwest-backed [`SalesApi`].
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The backend URL (e.g., "http://localhost:8000")
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::config(format!("Invalid API base URL: {base_url}")));
        }

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("GET {url} failed with {status}");
            return Err(AppError::status(path, status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SalesApi for ApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_sales(&self) -> Result<Vec<Sale>> {
        self.get_json(SALES_PATH).await
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.get_json(CUSTOMERS_PATH).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.get_json(PRODUCTS_PATH).await
    }

    async fn create_sale(&self, sale: &NewSale) -> Result<SubmitOutcome> {
        let url = self.url(CREATE_SALE_PATH);
        debug!("POST {url} with {} items", sale.items.len());

        // `.json()` also sets `Content-Type: application/json`.
        let response = self.client.post(&url).json(sale).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        Ok(SubmitOutcome::from_response(status, &bytes))
    }
}

/// Fetch sales and customers concurrently; fails if either request fails.
pub async fn load_sales_and_customers(api: &dyn SalesApi) -> Result<(Vec<Sale>, Vec<Customer>)> {
    tokio::try_join!(api.list_sales(), api.list_customers())
}

/// Fetch customers and products concurrently; fails if either request fails.
pub async fn load_customers_and_products(api: &dyn SalesApi) -> Result<(Vec<Customer>, Vec<Product>)> {
    tokio::try_join!(api.list_customers(), api.list_products())
}

/// Submit a sale, folding transport and decoding failures into an `{"error": ...}` outcome.
pub async fn submit_sale(api: &dyn SalesApi, sale: &NewSale) -> SubmitOutcome {
    match api.create_sale(sale).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Sale submission failed: {e}");
            SubmitOutcome::from_error(&e)
        }
    }
}
