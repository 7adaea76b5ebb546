//! # Módulo API
//!
//! Rutas HTTP sobre el motor de disponibilidad.
//!
//! ## Módulos principales
//!
//! - [`availability`] - Horas disponibles y ocupación de sucursales
//! - [`errors`] - Manejo de errores de la aplicación

pub mod availability;
pub mod errors;
mod middleware;

// Re-exportar tipos comunes para facilitar su uso
pub use errors::{AppError, AppResult, ErrorResponse, ResultExt};

use actix_web::web;

use crate::db::AvailabilityRepo;

/// Configura todas las rutas de la API
///
/// ## Rutas configuradas
///
/// - `/branches/*` - Ver [`availability::routes`]
///
/// # Ejemplo
///
/// ```no_run
/// use actix_web::{web, App};
/// use restaurant_availability::api;
/// use restaurant_availability::db::MemoryRepo;
///
/// let app = App::new()
///     .app_data(web::Data::new(MemoryRepo::default()))
///     .configure(api::init_routes::<MemoryRepo>);
/// ```
pub fn init_routes<R>(cfg: &mut web::ServiceConfig)
where
    R: AvailabilityRepo + 'static,
{
    availability::routes::<R>(cfg);
}
