//! # Restaurant Availability Server
//!
//! Servidor web que expone las horas disponibles para reservar en cada
//! sucursal, construido con Rust, Actix Web y MongoDB.
//!
//! ## Configuración
//!
//! Variables de entorno (archivo `.env`), ver [`restaurant_availability::config`]:
//!
//! ```env
//! MONGODB_URI=mongodb://localhost:27017
//! MONGODB_DATABASE=restaurant_availability
//! BIND_ADDRESS=0.0.0.0:8080
//! RUST_LOG=debug,mongodb=info
//! ```
//!
//! ## Arquitectura
//!
//! ```text
//! Cliente
//!     ↓ HTTP/JSON
//! API REST (Actix Web)
//!     ↓ AvailabilityRepo
//! MongoDB (branches, tables, reservations)
//!     ↓
//! Motor de disponibilidad (puro)
//! ```

use actix_web::{middleware::Logger, web, App, HttpServer};

use restaurant_availability::api;
use restaurant_availability::config::Config;
use restaurant_availability::db::MongoRepo;

/// Función principal que inicia el servidor web
///
/// # Funcionalidad
///
/// 1. Carga variables de entorno desde `.env`
/// 2. Configura el sistema de logging con tracing
/// 3. Establece conexión con MongoDB y crea índices
/// 4. Registra las rutas de la API y arranca el servidor
///
/// # Errores
///
/// Retorna `std::io::Error` si no se puede conectar a MongoDB o bindear el puerto.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["restaurant_availability=debug", "mongodb=info"] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Directiva de logging inválida '{}': {}", directive, e),
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    tracing::info!(policy = ?config.slot_policy, "Iniciando Restaurant Availability Server");

    let mongo_repo = match MongoRepo::init(&config).await {
        Ok(repo) => {
            // Sin índices las consultas siguen funcionando
            if let Err(e) = repo.create_indexes().await {
                tracing::warn!("Advertencia creando índices: {}", e);
            }
            repo
        }
        Err(e) => {
            tracing::error!("Error conectando a MongoDB: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Error de MongoDB: {}", e),
            ));
        }
    };

    let repo = web::Data::new(mongo_repo);
    let policy = web::Data::new(config.slot_policy);

    tracing::info!("Servidor iniciando en {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(repo.clone())
            .app_data(policy.clone())
            .wrap(Logger::default())
            .configure(api::init_routes::<MongoRepo>)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
