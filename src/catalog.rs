//! Product Catalog
//!
//! Reference data the cart store consumes. A catalog is read from a file when
//! one is configured; any failure falls back to the storefront's sample
//! listings so the shop always has something to show.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::products::{Product, ProductId};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// JSON parsing error
    #[error("failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed but listed no products
    #[error("catalog lists no products")]
    Empty,
}

/// On-disk catalog document, shaped like the storefront API response.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<Product>,
}

/// Criteria for narrowing a catalog listing. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Category, compared case-insensitively
    pub category: Option<String>,

    /// Seller location, compared case-insensitively
    pub location: Option<String>,

    /// Inclusive upper bound on price
    pub max_price: Option<u64>,

    /// Only listings still available for purchase
    pub available_only: bool,
}

impl CatalogFilter {
    /// Whether a product satisfies every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| product.category.eq_ignore_ascii_case(c));

        let location_ok = self
            .location
            .as_deref()
            .is_none_or(|l| product.location.eq_ignore_ascii_case(l));

        let price_ok = self.max_price.is_none_or(|max| product.price <= max);

        category_ok && location_ok && price_ok && (!self.available_only || product.is_available)
    }
}

/// Ordered collection of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a list of products.
    pub fn new(products: impl Into<Vec<Product>>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// The storefront's built-in sample listings.
    pub fn sample() -> Self {
        Self::new([
            Product {
                category: "electronics".to_string(),
                description: "Like new iPhone 12 Pro with 256GB storage. Includes original box and accessories.".to_string(),
                seller: "Rahul Sharma".to_string(),
                phone: "+919876543210".to_string(),
                condition: "excellent".to_string(),
                ..Product::new(
                    "1",
                    "iPhone 12 Pro",
                    45_000,
                    "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=300&h=200&fit=crop",
                    "delhi",
                )
            },
            Product {
                category: "furniture".to_string(),
                description: "Solid wooden study table in excellent condition. Perfect for home office.".to_string(),
                seller: "Priya Patel".to_string(),
                phone: "+919876543211".to_string(),
                condition: "good".to_string(),
                ..Product::new(
                    "2",
                    "Wooden Study Table",
                    3_500,
                    "https://images.unsplash.com/photo-1494438639946-1ebd1d20bf85?w=300&h=200&fit=crop",
                    "mumbai",
                )
            },
            Product {
                category: "clothing".to_string(),
                description: "Genuine leather handbag from a premium brand. Used only a few times.".to_string(),
                seller: "Anjali Mehta".to_string(),
                phone: "+919876543212".to_string(),
                condition: "excellent".to_string(),
                ..Product::new(
                    "3",
                    "Designer Handbag",
                    8_000,
                    "https://images.unsplash.com/photo-1584917865442-de89df76afd3?w=300&h=200&fit=crop",
                    "bangalore",
                )
            },
        ])
    }

    /// Load a catalog file.
    ///
    /// Files ending in `.yml` or `.yaml` are read as YAML, anything else as the
    /// JSON payload served by the storefront API. Both are a document with a
    /// top-level `products` list.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed, or lists
    /// no products.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        let document: CatalogDocument = if is_yaml {
            serde_norway::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        if document.products.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self::new(document.products))
    }

    /// Load the configured catalog, falling back to [`Catalog::sample`] on any
    /// failure.
    pub fn load_or_sample(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("no catalog configured, using sample products");
            return Self::sample();
        };

        match Self::from_path(path) {
            Ok(catalog) => {
                info!(path = %path.display(), products = catalog.len(), "catalog loaded");
                catalog
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "catalog unavailable, using sample products");
                Self::sample()
            }
        }
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Iterate over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products satisfying a filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CatalogFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |product| filter.matches(product))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}
