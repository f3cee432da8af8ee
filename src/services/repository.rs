use crate::models::{Product, ProductChanges};
use std::sync::Arc;
use thiserror::Error;

/// A store handle shared by every request handler.
pub type SharedProductStore = Arc<dyn ProductRepository>;

/// Failures raised by a product store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique name constraint rejected a write.
    #[error("product \"{0}\" already exists")]
    AlreadyExists(String),
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store task failed: {0}")]
    Task(String),
}

/// Which products a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductFilter {
    #[default]
    All,
    InShoppingCart,
}

impl ProductFilter {
    pub fn from_shop_flag(shop: bool) -> Self {
        if shop {
            ProductFilter::InShoppingCart
        } else {
            ProductFilter::All
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::InShoppingCart => product.shopping_cart,
        }
    }
}

/// CRUD access to the product table.
///
/// Implementations serialize their writes, so two creates of the same name
/// can never both succeed. Lookups are exact and case-sensitive.
pub trait ProductRepository: Send + Sync {
    /// Products matching `filter`, in insertion order.
    fn find_all(&self, filter: ProductFilter) -> Result<Vec<Product>, StoreError>;

    fn find_one(&self, name: &str) -> Result<Option<Product>, StoreError>;

    /// Inserts a new product, failing with [`StoreError::AlreadyExists`] on a duplicate name.
    fn create(&self, product: Product) -> Result<Product, StoreError>;

    /// Applies `changes` and returns the stored result, or `None` if the product does not exist.
    fn update(&self, name: &str, changes: &ProductChanges) -> Result<Option<Product>, StoreError>;

    /// Removes a product and returns it, or `None` if it does not exist.
    fn delete(&self, name: &str) -> Result<Option<Product>, StoreError>;
}

/// Runs a store operation on the blocking thread pool.
pub async fn with_store<T, F>(store: &SharedProductStore, op: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&dyn ProductRepository) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}
