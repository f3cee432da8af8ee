use crate::models::{Product, ProductChanges};
use crate::services::repository::{ProductFilter, ProductRepository, StoreError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS products (
    name VARCHAR(50) PRIMARY KEY NOT NULL,
    shopping_cart BOOLEAN NOT NULL DEFAULT 0
);";

/// A product table persisted in SQLite.
///
/// Listing order is the table's `rowid`, which grows with every insert.
pub struct SqliteProductStore {
    conn: Mutex<Connection>,
}

impl SqliteProductStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteProductStore {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        name: row.get(0)?,
        shopping_cart: row.get(1)?,
    })
}

fn select_one(conn: &Connection, name: &str) -> rusqlite::Result<Option<Product>> {
    conn.query_row(
        "SELECT name, shopping_cart FROM products WHERE name = ?1",
        [name],
        product_from_row,
    )
    .optional()
}

impl ProductRepository for SqliteProductStore {
    fn find_all(&self, filter: ProductFilter) -> Result<Vec<Product>, StoreError> {
        let sql = match filter {
            ProductFilter::All => "SELECT name, shopping_cart FROM products ORDER BY rowid",
            ProductFilter::InShoppingCart => {
                "SELECT name, shopping_cart FROM products WHERE shopping_cart = 1 ORDER BY rowid"
            }
        };

        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let products = stmt
            .query_map([], product_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn find_one(&self, name: &str) -> Result<Option<Product>, StoreError> {
        Ok(select_one(&self.conn(), name)?)
    }

    fn create(&self, product: Product) -> Result<Product, StoreError> {
        let result = self.conn().execute(
            "INSERT INTO products (name, shopping_cart) VALUES (?1, ?2)",
            params![product.name, product.shopping_cart],
        );

        match result {
            Ok(_) => Ok(product),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::AlreadyExists(product.name))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, name: &str, changes: &ProductChanges) -> Result<Option<Product>, StoreError> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let Some(mut product) = select_one(&tx, name)? else {
            return Ok(None);
        };

        product.apply(changes);
        tx.execute(
            "UPDATE products SET shopping_cart = ?1 WHERE name = ?2",
            params![product.shopping_cart, product.name],
        )?;
        tx.commit()?;

        Ok(Some(product))
    }

    fn delete(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let Some(product) = select_one(&tx, name)? else {
            return Ok(None);
        };

        tx.execute("DELETE FROM products WHERE name = ?1", [name])?;
        tx.commit()?;

        Ok(Some(product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_round_trip() {
        let store = SqliteProductStore::open_in_memory().unwrap();
        assert!(store.find_all(ProductFilter::All).unwrap().is_empty());

        store.create(Product::new("bread")).unwrap();
        assert_eq!(store.find_one("bread").unwrap(), Some(Product::new("bread")));

        let updated = store
            .update("bread", &ProductChanges::shopping_cart(true))
            .unwrap();
        assert_eq!(updated, Some(Product::new("bread").in_cart(true)));
        assert_eq!(
            store.find_one("bread").unwrap(),
            Some(Product::new("bread").in_cart(true))
        );

        assert!(store.delete("bread").unwrap().is_some());
        assert!(store.find_one("bread").unwrap().is_none());
        assert!(store.delete("bread").unwrap().is_none());
    }

    #[test]
    fn unique_constraint_maps_to_already_exists() {
        let store = SqliteProductStore::open_in_memory().unwrap();
        store.create(Product::new("milk").in_cart(true)).unwrap();

        let err = store.create(Product::new("milk")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(name) if name == "milk"));
        assert_eq!(
            store.find_one("milk").unwrap(),
            Some(Product::new("milk").in_cart(true))
        );
    }

    #[test]
    fn listing_follows_insertion_order() {
        let store = SqliteProductStore::open_in_memory().unwrap();
        for name in ["zucchini", "apple", "mango"] {
            store.create(Product::new(name)).unwrap();
        }
        store
            .update("zucchini", &ProductChanges::shopping_cart(true))
            .unwrap();
        store
            .update("mango", &ProductChanges::shopping_cart(true))
            .unwrap();

        let all: Vec<_> = store
            .find_all(ProductFilter::All)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(all, ["zucchini", "apple", "mango"]);

        let cart = store.find_all(ProductFilter::InShoppingCart).unwrap();
        assert_eq!(
            cart,
            vec![
                Product::new("zucchini").in_cart(true),
                Product::new("mango").in_cart(true)
            ]
        );
    }

    #[test]
    fn update_missing_product_returns_none() {
        let store = SqliteProductStore::open_in_memory().unwrap();
        assert!(store
            .update("ghost", &ProductChanges::shopping_cart(true))
            .unwrap()
            .is_none());
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grocery.db");

        {
            let store = SqliteProductStore::open(&path).unwrap();
            store.create(Product::new("coffee").in_cart(true)).unwrap();
        }

        let store = SqliteProductStore::open(&path).unwrap();
        assert_eq!(
            store.find_all(ProductFilter::All).unwrap(),
            vec![Product::new("coffee").in_cart(true)]
        );
    }

    #[test]
    fn concurrent_creates_admit_one() {
        let store = SqliteProductStore::open_in_memory().unwrap();
        let created = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| store.create(Product::new("x")).is_ok()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(created, 1);
        assert_eq!(store.find_all(ProductFilter::All).unwrap(), vec![Product::new("x")]);
    }
}
