use crate::models::{Product, ProductChanges};
use crate::services::repository::{ProductFilter, ProductRepository, StoreError};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A product table held in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> MemoryProductStore {
        MemoryProductStore::default()
    }

    fn products(&self) -> MutexGuard<'_, Vec<Product>> {
        // Every write below leaves the vector consistent, so a poisoned lock is still usable.
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductRepository for MemoryProductStore {
    fn find_all(&self, filter: ProductFilter) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn find_one(&self, name: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.products().iter().find(|p| p.name == name).cloned())
    }

    fn create(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.products();

        if products.iter().any(|p| p.name == product.name) {
            return Err(StoreError::AlreadyExists(product.name));
        }

        products.push(product.clone());
        Ok(product)
    }

    fn update(&self, name: &str, changes: &ProductChanges) -> Result<Option<Product>, StoreError> {
        let mut products = self.products();

        Ok(products.iter_mut().find(|p| p.name == name).map(|p| {
            p.apply(changes);
            p.clone()
        }))
    }

    fn delete(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let mut products = self.products();
        let index = products.iter().position(|p| p.name == name);

        Ok(index.map(|index| products.remove(index)))
    }
}
