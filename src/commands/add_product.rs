use crate::events::ProductAddedEvent;
use crate::models::{NewProduct, Product};
use crate::services::{with_store, SharedProductStore, StoreError};
use mediator::{AsyncMediator, AsyncRequestHandler, DefaultAsyncMediator, Request};

#[derive(Debug, Clone)]
pub struct AddProductCommand(pub NewProduct);

impl Request<Result<Product, StoreError>> for AddProductCommand {}

pub struct AddProductRequestHandler(pub SharedProductStore, pub DefaultAsyncMediator);

#[mediator::async_trait]
impl AsyncRequestHandler<AddProductCommand, Result<Product, StoreError>>
    for AddProductRequestHandler
{
    async fn handle(&mut self, command: AddProductCommand) -> Result<Product, StoreError> {
        let product = command.0.into_product();
        let product = with_store(&self.0, move |store| store.create(product)).await?;

        if let Err(e) = self.1.publish(ProductAddedEvent(product.clone())).await {
            log::warn!("Could not publish product added event: {}", e);
        }

        Ok(product)
    }
}
