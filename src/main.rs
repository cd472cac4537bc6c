use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use eyecare_reco::config::{CorsSettings, LoggingSettings, Settings};
use eyecare_reco::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use eyecare_reco::services::ProductCatalog;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Upper bound for analysis uploads
const MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_cors(settings: &CorsSettings) -> Cors {
    if settings.allowed_origins.is_empty() {
        return Cors::permissive();
    }

    settings
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_tracing(&settings.logging);
    info!("Starting eye care recommendation service...");

    let catalog = match &settings.catalog.path {
        Some(path) => ProductCatalog::load(path),
        None => ProductCatalog::builtin(),
    };
    let catalog = catalog.map_err(|e| {
        error!("Failed to load product catalog: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    info!("Product catalog ready ({} products)", catalog.len());

    let app_state = AppState::from_settings(&settings, catalog);

    info!(
        "Recommender initialized with weights: {:?}",
        settings.scoring_weights()
    );
    info!("Embedding models: {:?}", app_state.embeddings.models());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let cors_settings = settings.cors.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .wrap(build_cors(&cors_settings))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
