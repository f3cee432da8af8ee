use crate::SharedMediator;
use actix_web::web::{self, Data};

pub mod products;

/// Mounts the product resource under `{prefix}/products`.
pub fn configure(prefix: &str, mediator: SharedMediator) -> impl FnOnce(&mut web::ServiceConfig) {
    let path = format!("{}/products", prefix);

    move |cfg| {
        cfg.app_data(Data::new(mediator)).service(
            web::scope(&path)
                .service(
                    web::resource("")
                        .route(web::get().to(products::get_all))
                        .route(web::post().to(products::create)),
                )
                .service(products::get)
                .service(products::update)
                .service(products::delete),
        );
    }
}
