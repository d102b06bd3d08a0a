//! Application settings loaded from `config.toml`.
//!
//! The file names the database, the storage bucket used for image locators,
//! and an optional list of catalogue products that are seeded on start-up.

use crate::errors::{Error, Result};
use crate::models::Product;
use serde::Deserialize;
use std::path::Path;

/// Default settings file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Default bucket when none is configured.
pub const DEFAULT_STORAGE_BUCKET: &str = "myshop.appspot.com";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Connection string; `DATABASE_URL` takes precedence when set
    #[serde(default)]
    pub database_url: Option<String>,
    /// Bucket that holds product and profile images
    #[serde(default = "default_bucket")]
    pub storage_bucket: String,
    /// Catalogue entries to upsert at start-up
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            storage_bucket: default_bucket(),
            products: Vec::new(),
        }
    }
}

fn default_bucket() -> String {
    DEFAULT_STORAGE_BUCKET.to_string()
}

/// Configuration for a single seeded product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Product key
    pub id: String,
    /// Product name, lowercased before storing
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Category
    pub category: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Download URL of the product image
    #[serde(default)]
    pub image_url: String,
    /// Units on hand
    #[serde(default)]
    pub stock: i32,
}

impl From<ProductSeed> for Product {
    fn from(seed: ProductSeed) -> Self {
        Self {
            id: seed.id,
            name: seed.name.to_lowercase(),
            description: seed.description,
            price: seed.price,
            category: seed.category,
            image_url: seed.image_url,
            stock: seed.stock,
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads settings from `MYSHOP_CONFIG`, or `./config.toml`.
///
/// A missing file is not an error: defaults are used and a warning is logged.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("MYSHOP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        tracing::warn!("No settings file at {}, using defaults", path);
        return Ok(Settings::default());
    }
    load_settings(path)
}
