mod api;
mod config;
mod database;
mod middleware;
mod models;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use crate::database::{MongoUserStore, UnavailableUserStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env();

    log::info!("🚀 Starting User Service...");

    // Sem client (URI inválido, SRV sem resposta): loga e segue servindo
    let store: Arc<dyn UserStore> = match MongoUserStore::new(&config.mongo_url).await {
        Ok(store) => {
            // Falha de conexão só é logada; o servidor continua atendendo
            let probe = store.clone();
            actix_web::rt::spawn(async move {
                match probe.ping().await {
                    Ok(()) => log::info!("✅ MongoDB connected successfully"),
                    Err(e) => log::error!("❌ Error connecting to MongoDB: {}", e),
                }
            });
            Arc::new(store)
        }
        Err(e) => {
            log::error!("❌ Error connecting to MongoDB: {}", e);
            Arc::new(UnavailableUserStore::new(e.to_string()))
        }
    };

    let store_data = web::Data::from(store);

    log::info!("🌐 Server running at http://{}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
