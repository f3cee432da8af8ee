use crate::events::ProductUpdatedEvent;
use crate::models::{Product, ProductChanges};
use crate::services::{with_store, SharedProductStore, StoreError};
use mediator::{AsyncMediator, AsyncRequestHandler, DefaultAsyncMediator, Request};

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub name: String,
    pub changes: ProductChanges,
}

impl Request<Result<Option<Product>, StoreError>> for UpdateProductCommand {}

pub struct UpdateProductRequestHandler(pub SharedProductStore, pub DefaultAsyncMediator);

#[mediator::async_trait]
impl AsyncRequestHandler<UpdateProductCommand, Result<Option<Product>, StoreError>>
    for UpdateProductRequestHandler
{
    async fn handle(
        &mut self,
        command: UpdateProductCommand,
    ) -> Result<Option<Product>, StoreError> {
        let fields = command.changes.updated_fields();
        let UpdateProductCommand { name, changes } = command;

        let result = with_store(&self.0, move |store| store.update(&name, &changes)).await?;

        if let Some(product) = result.clone() {
            let event = ProductUpdatedEvent { product, fields };
            if let Err(e) = self.1.publish(event).await {
                log::warn!("Could not publish product updated event: {}", e);
            }
        }

        Ok(result)
    }
}
