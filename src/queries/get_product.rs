use crate::models::Product;
use crate::services::{with_store, SharedProductStore, StoreError};
use mediator::{AsyncRequestHandler, Request};

pub struct GetProductRequest(pub String);
impl Request<Result<Option<Product>, StoreError>> for GetProductRequest {}

pub struct GetProductRequestHandler(pub SharedProductStore);

#[mediator::async_trait]
impl AsyncRequestHandler<GetProductRequest, Result<Option<Product>, StoreError>>
    for GetProductRequestHandler
{
    async fn handle(&mut self, req: GetProductRequest) -> Result<Option<Product>, StoreError> {
        let name = req.0;
        with_store(&self.0, move |store| store.find_one(&name)).await
    }
}
