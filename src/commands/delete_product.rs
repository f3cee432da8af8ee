use crate::events::ProductDeletedEvent;
use crate::models::Product;
use crate::services::{with_store, SharedProductStore, StoreError};
use mediator::{AsyncMediator, AsyncRequestHandler, DefaultAsyncMediator, Request};

pub struct DeleteProductCommand(pub String);
impl Request<Result<Option<Product>, StoreError>> for DeleteProductCommand {}

pub struct DeleteProductRequestHandler(pub SharedProductStore, pub DefaultAsyncMediator);

#[mediator::async_trait]
impl AsyncRequestHandler<DeleteProductCommand, Result<Option<Product>, StoreError>>
    for DeleteProductRequestHandler
{
    async fn handle(
        &mut self,
        request: DeleteProductCommand,
    ) -> Result<Option<Product>, StoreError> {
        let name = request.0;
        let result = with_store(&self.0, move |store| store.delete(&name)).await?;

        if let Some(deleted) = result.clone() {
            if let Err(e) = self.1.publish(ProductDeletedEvent(deleted)).await {
                log::warn!("Could not publish product deleted event: {}", e);
            }
        }

        Ok(result)
    }
}
