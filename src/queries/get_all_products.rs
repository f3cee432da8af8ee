use crate::models::Product;
use crate::services::{with_store, ProductFilter, SharedProductStore, StoreError};
use mediator::{AsyncRequestHandler, Request};

pub struct GetAllProductsRequest(pub ProductFilter);
impl Request<Result<Vec<Product>, StoreError>> for GetAllProductsRequest {}

pub struct GetAllProductsRequestHandler(pub SharedProductStore);

#[mediator::async_trait]
impl AsyncRequestHandler<GetAllProductsRequest, Result<Vec<Product>, StoreError>>
    for GetAllProductsRequestHandler
{
    async fn handle(&mut self, req: GetAllProductsRequest) -> Result<Vec<Product>, StoreError> {
        let filter = req.0;
        with_store(&self.0, move |store| store.find_all(filter)).await
    }
}
