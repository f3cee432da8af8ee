use crate::commands::{AddProductCommand, DeleteProductCommand, UpdateProductCommand};
use crate::error::ApiError;
use crate::models::{parse_flag, NewProduct, Product, ProductChanges};
use crate::queries::{GetAllProductsRequest, GetProductRequest};
use crate::services::ProductFilter;
use crate::SharedMediator;
use actix_web::http::header::{HeaderValue, LOCATION};
use actix_web::web::{self, Bytes, Data};
use actix_web::{delete, get, put, HttpRequest, HttpResponse};
use mediator::AsyncMediator;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    shop: Option<String>,
}

pub async fn get_all(
    query: web::Query<ListQuery>,
    mediator: Data<SharedMediator>,
) -> Result<HttpResponse, ApiError> {
    log::info!("Request to retrieve all products in the catalog");

    let shop = match query.shop.as_deref() {
        Some(raw) => parse_flag("shop", raw)?,
        None => false,
    };

    let mut mediator = mediator.lock().await;
    let products: Vec<Product> = mediator
        .send(GetAllProductsRequest(ProductFilter::from_shop_flag(shop)))
        .await??;

    Ok(HttpResponse::Ok().json(products))
}

pub async fn create(
    req: HttpRequest,
    body: Bytes,
    mediator: Data<SharedMediator>,
) -> Result<HttpResponse, ApiError> {
    log::info!("Request to create product into the catalog");

    let new_product = NewProduct::from_body(&body)?;
    let mut mediator = mediator.lock().await;
    let product: Product = mediator.send(AddProductCommand(new_product)).await??;

    let mut response = HttpResponse::Created();
    let location = format!("{}/{}", req.path(), encode_segment(&product.name));
    if let Ok(location) = HeaderValue::from_str(&location) {
        response.insert_header((LOCATION, location));
    }

    Ok(response.json(product))
}

#[get("/{name}")]
pub async fn get(
    path: web::Path<String>,
    mediator: Data<SharedMediator>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    log::info!("Request to retrieve product \"{}\" from the catalog", name);

    let mut mediator = mediator.lock().await;
    let product: Option<Product> = mediator.send(GetProductRequest(name.clone())).await??;

    match product {
        Some(product) => Ok(HttpResponse::Ok().json(product)),
        None => Err(ApiError::NotFound(name)),
    }
}

#[put("/{name}")]
pub async fn update(
    path: web::Path<String>,
    body: Bytes,
    mediator: Data<SharedMediator>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    log::info!("Request to update product \"{}\" from the catalog", name);

    let changes = ProductChanges::from_body(&body)?;
    if !changes.discarded.is_empty() {
        log::warn!(
            "Discarding immutable field(s) {:?} of product \"{}\"",
            changes.discarded,
            name
        );
    }

    let command = UpdateProductCommand {
        name: name.clone(),
        changes,
    };
    let mut mediator = mediator.lock().await;
    let product: Option<Product> = mediator.send(command).await??;

    match product {
        Some(product) => Ok(HttpResponse::Ok().json(product)),
        None => Err(ApiError::NotFound(name)),
    }
}

#[delete("/{name}")]
pub async fn delete(
    path: web::Path<String>,
    mediator: Data<SharedMediator>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    log::info!("Request to delete product \"{}\" from the catalog", name);

    let mut mediator = mediator.lock().await;
    let deleted: Option<Product> = mediator.send(DeleteProductCommand(name.clone())).await??;

    match deleted {
        Some(_) => Ok(HttpResponse::NoContent().finish()),
        None => Err(ApiError::NotFound(name)),
    }
}

// Percent-encodes every byte outside the RFC 3986 unreserved set.
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for b in segment.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(b as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", b)),
        }
    }
    encoded
}
