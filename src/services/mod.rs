pub mod memory_store;
pub mod repository;
pub mod sqlite_store;

pub use memory_store::MemoryProductStore;
pub use repository::*;
pub use sqlite_store::SqliteProductStore;
