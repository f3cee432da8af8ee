use actix_web::middleware::{self, TrailingSlash};
use actix_web::{App, HttpServer};
use anyhow::Context;
use clap::Parser;
use grocery_api::{create_mediator, endpoints, Config, SharedMediator};
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_level.as_str()));

    let store = config
        .database
        .open()
        .with_context(|| format!("Failed to open product store {:?}", config.database))?;
    let mediator: SharedMediator = Arc::new(Mutex::new(create_mediator(store)));
    let prefix = config.scope_prefix();

    log::info!(
        "Serving {}/products on {}:{} ({:?})",
        prefix,
        config.host,
        config.port,
        config.database
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::new(TrailingSlash::Trim))
            .wrap(middleware::Logger::default())
            .configure(endpoints::configure(&prefix, mediator.clone()))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
