//! # grocery_api
//! A grocery list service exposing a single `Product` resource over HTTP.
//!
//! Endpoints never touch the store directly: each operation is a command or
//! query sent through a [`mediator::DefaultAsyncMediator`], and every
//! successful write is announced as an event.
//!
//! ```rust
//! use grocery_api::models::{NewProduct, Product};
//! use grocery_api::services::MemoryProductStore;
//! use grocery_api::commands::AddProductCommand;
//! use grocery_api::queries::GetProductRequest;
//! use mediator::AsyncMediator;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut mediator = grocery_api::create_mediator(Arc::new(MemoryProductStore::new()));
//!
//! let bread = NewProduct::from_body(br#"{"name": "bread"}"#).unwrap();
//! mediator.send(AddProductCommand(bread)).await.unwrap().unwrap();
//!
//! let found = mediator.send(GetProductRequest("bread".into())).await.unwrap().unwrap();
//! assert_eq!(found, Some(Product::new("bread")));
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod events;
pub mod models;
pub mod queries;
pub mod services;

pub use config::Config;

use crate::services::SharedProductStore;
use mediator::DefaultAsyncMediator;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The mediator as shared by the HTTP workers. Requests go through it one at a time.
pub type SharedMediator = Arc<Mutex<DefaultAsyncMediator>>;

/// Registers the product request handlers and the event loggers.
///
/// The builder blocks on handler registration, so this must run inside a
/// multi-threaded tokio runtime.
pub fn create_mediator(store: SharedProductStore) -> DefaultAsyncMediator {
    use commands::*;
    use events::*;
    use queries::*;

    DefaultAsyncMediator::builder()
        // Requests
        .add_handler(GetProductRequestHandler(store.clone()))
        .add_handler(GetAllProductsRequestHandler(store.clone()))
        .add_handler_deferred(|m| AddProductRequestHandler(store.clone(), m))
        .add_handler_deferred(|m| UpdateProductRequestHandler(store.clone(), m))
        .add_handler_deferred(|m| DeleteProductRequestHandler(store.clone(), m))
        // Events
        .subscribe_fn(|event: ProductAddedEvent| async move {
            log::info!("Added: {} - {}", event.0.name, event.0.shopping_cart);
        })
        .subscribe_fn(|event: ProductUpdatedEvent| async move {
            log::info!("Updated: {} - {:?}", event.product.name, event.fields);
        })
        .subscribe_fn(|event: ProductDeletedEvent| async move {
            log::info!("Deleted: {}", event.0.name);
        })
        .build()
}
