//! Catalog service — fetch and query the external product document.
//!
//! DESIGN
//! ======
//! The storefront has no product database; the catalog is a read-only JSON
//! document on a static host, shaped as `{ "products": [ ... ] }`. Every
//! fetch failure mode (network, non-success status, malformed body) is a
//! `CatalogError`. The list route degrades to an empty catalog at that
//! boundary rather than failing the page; there is no retry policy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

const DEFAULT_CATALOG_URL: &str = "https://burgerhub00.github.io/data/products.json";

// =============================================================================
// TYPES
// =============================================================================

/// One product as published by the catalog host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Price in integer cents.
    pub price: u64,
    pub image: String,
    pub calorie: String,
    pub slug: String,
}

#[derive(Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog fetch failed: {0}")]
    Fetch(String),
    #[error("catalog returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse the catalog document, dropping duplicate ids. First occurrence wins.
pub(crate) fn parse_catalog(body: &str) -> Result<Vec<Product>, CatalogError> {
    let doc: CatalogDocument = serde_json::from_str(body)?;
    let mut seen = HashSet::new();
    Ok(doc.products.into_iter().filter(|p| seen.insert(p.id)).collect())
}

// =============================================================================
// LOOKUPS
// =============================================================================

/// Case-insensitive name-substring filter backing the storefront search box.
#[must_use]
pub fn filter_by_name(mut products: Vec<Product>, query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    products.retain(|p| p.name.to_lowercase().contains(&needle));
    products
}

#[must_use]
pub fn find_by_id(products: &[Product], id: u64) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

#[must_use]
pub fn find_by_slug<'a>(products: &'a [Product], slug: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.slug == slug)
}

// =============================================================================
// CLIENT
// =============================================================================

/// Client for the external catalog endpoint. Holds a reusable HTTP client.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    url: String,
}

impl CatalogClient {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), url: url.into() }
    }

    /// Load the catalog URL from `CATALOG_URL`, falling back to the public
    /// default.
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var("CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_owned());
        Self::new(url)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the product list.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` for transport failures, `Status` for non-success
    /// responses, and `Malformed` when the body does not parse.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status()));
        }

        let body = resp.text().await.map_err(|e| CatalogError::Fetch(e.to_string()))?;
        parse_catalog(&body)
    }

    /// Fetch the catalog, degrading to an empty list on any failure. The
    /// failure is logged here so callers can render an empty storefront
    /// without carrying the error further.
    pub async fn fetch_or_empty(&self) -> Vec<Product> {
        match self.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(error = %e, "catalog fetch failed; serving empty catalog");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
