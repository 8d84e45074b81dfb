use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use log::info;
use env_logger::Env;
use actix_web::middleware::Logger;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use fitgenie_backend::config::Config;
use fitgenie_backend::db;
use fitgenie_backend::inference::{ChatModel, OllamaClient};
use fitgenie_backend::startup;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Initialize the database pool
    let pool = db::connect(&config.database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to open database: {}", e)))?;

    // Inference client shared by all workers
    let model: Arc<dyn ChatModel> = Arc::new(
        OllamaClient::new(&config.ollama_host, config.inference_timeout)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
    );
    info!(
        "Using inference host {} (text model {}, vision model {})",
        config.ollama_host, config.models.text_model, config.models.vision_model
    );

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "fitgenie".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let bind_address = config.bind_address.clone();
    let workers = config.workers;
    let max_payload = config.max_payload_bytes;
    let config = web::Data::new(config);
    let model = web::Data::from(model);

    info!("Starting server at {} with {} workers", bind_address, workers);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .wrap(Cors::permissive())
            .app_data(web::Data::new(pool.clone())) // Database pool
            .app_data(config.clone())
            .app_data(model.clone())
            .app_data(startup::json_config(max_payload))
            .configure(startup::routes)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
