pub mod add_product;
pub mod delete_product;
pub mod update_product;

pub use add_product::*;
pub use delete_product::*;
pub use update_product::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ProductAddedEvent, ProductDeletedEvent, ProductUpdatedEvent};
    use crate::models::{NewProduct, Product, ProductChanges};
    use crate::services::{MemoryProductStore, SharedProductStore, StoreError};
    use mediator::{AsyncMediator, DefaultAsyncMediator};
    use std::sync::{Arc, Mutex};

    #[tokio::test(flavor = "multi_thread")]
    async fn writes_publish_lifecycle_events() {
        let store: SharedProductStore = Arc::new(MemoryProductStore::new());
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let (added, updated, deleted) = (seen.clone(), seen.clone(), seen.clone());

        let mut mediator = DefaultAsyncMediator::builder()
            .add_handler_deferred(|m| AddProductRequestHandler(store.clone(), m))
            .add_handler_deferred(|m| UpdateProductRequestHandler(store.clone(), m))
            .add_handler_deferred(|m| DeleteProductRequestHandler(store.clone(), m))
            .subscribe_fn(move |event: ProductAddedEvent| {
                let seen = added.clone();
                async move { seen.lock().unwrap().push(format!("added {}", event.0.name)) }
            })
            .subscribe_fn(move |event: ProductUpdatedEvent| {
                let seen = updated.clone();
                async move {
                    let entry = format!("updated {} {:?}", event.product.name, event.fields);
                    seen.lock().unwrap().push(entry)
                }
            })
            .subscribe_fn(move |event: ProductDeletedEvent| {
                let seen = deleted.clone();
                async move { seen.lock().unwrap().push(format!("deleted {}", event.0.name)) }
            })
            .build();

        let bread = NewProduct {
            name: "bread".to_owned(),
            shopping_cart: false,
        };

        let created: Result<Product, StoreError> =
            mediator.send(AddProductCommand(bread.clone())).await.unwrap();
        assert_eq!(created.unwrap(), Product::new("bread"));

        let duplicate: Result<Product, StoreError> =
            mediator.send(AddProductCommand(bread)).await.unwrap();
        assert!(matches!(duplicate, Err(StoreError::AlreadyExists(_))));

        let update = UpdateProductCommand {
            name: "bread".to_owned(),
            changes: ProductChanges::shopping_cart(true),
        };
        let result: Result<Option<Product>, StoreError> = mediator.send(update).await.unwrap();
        assert_eq!(result.unwrap(), Some(Product::new("bread").in_cart(true)));

        let missing = UpdateProductCommand {
            name: "ghost".to_owned(),
            changes: ProductChanges::shopping_cart(true),
        };
        let result: Result<Option<Product>, StoreError> = mediator.send(missing).await.unwrap();
        assert_eq!(result.unwrap(), None);

        let result: Result<Option<Product>, StoreError> = mediator
            .send(DeleteProductCommand("bread".to_owned()))
            .await
            .unwrap();
        assert!(result.unwrap().is_some());

        assert_eq!(
            *seen.lock().unwrap(),
            [
                "added bread",
                "updated bread [\"shopping_cart\"]",
                "deleted bread"
            ]
        );
    }
}
