//! # API de Disponibilidad
//!
//! Endpoints de solo lectura sobre las sucursales:
//! - Horas en las que se puede reservar para un grupo en una fecha
//! - Nivel de ocupación actual de la sucursal
//!
//! Los handlers son genéricos sobre el repositorio para poder usar MongoDB en
//! producción y el repositorio en memoria en las pruebas.

use actix_web::{web, HttpResponse};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::middleware::ErrorLogExt;
use super::{AppError, AppResult, ResultExt};
use crate::availability::{BranchLoad, SlotPolicy};
use crate::db::{load_available_times, AvailabilityRepo, BranchId};

/// Parámetros de consulta de disponibilidad
#[derive(Deserialize)]
struct AvailabilityQuery {
    /// Fecha de la reserva (formato YYYY-MM-DD)
    date: Option<String>,
    /// Número de comensales
    guests: Option<String>,
}

/// Respuesta con las horas disponibles
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailableTimesResponse {
    pub branch_id: BranchId,
    pub date: String,
    pub guests: u32,
    /// Horas `HH:MM` en orden cronológico
    pub times: Vec<String>,
}

/// Valida y parsea una fecha en formato YYYY-MM-DD
fn validate_date(date: Option<&str>) -> AppResult<NaiveDate> {
    let date = date.ok_or_else(|| AppError::validation_field("date", "La fecha es requerida"))?;
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation_field("date", "Formato de fecha inválido, use YYYY-MM-DD"))
}

/// Valida el número de comensales (entero mayor a 0)
fn validate_guests(guests: Option<&str>) -> AppResult<u32> {
    let guests = guests
        .ok_or_else(|| AppError::validation_field("guests", "El número de comensales es requerido"))?;
    let guests: u32 = guests.trim().parse().map_err_validation("Número de comensales inválido")?;
    if guests == 0 {
        return Err(AppError::validation_field(
            "guests",
            "El número de comensales debe ser mayor a 0",
        ));
    }
    Ok(guests)
}

/// Horas disponibles de una sucursal
///
/// # Parámetros
/// - `path`: ID de la sucursal
/// - `query`: `date` (YYYY-MM-DD) y `guests` (> 0)
///
/// # Respuesta
/// ```json
/// {
///   "branch_id": 1,
///   "date": "2026-10-20",
///   "guests": 4,
///   "times": ["09:00", "09:30", "15:00"]
/// }
/// ```
///
/// Una lista vacía significa que no hay horas disponibles, no es un error.
///
/// # Errores
/// - `400 Bad Request`: fecha o comensales inválidos, horario mal formado
/// - `404 Not Found`: Sucursal no encontrada
/// - `500 Internal Server Error`: Error de base de datos
async fn get_available_times<R>(
    repo: web::Data<R>,
    policy: web::Data<SlotPolicy>,
    path: web::Path<BranchId>,
    query: web::Query<AvailabilityQuery>,
) -> AppResult<HttpResponse>
where
    R: AvailabilityRepo + 'static,
{
    let branch_id = path.into_inner();
    let date = validate_date(query.date.as_deref())?;
    let guests = validate_guests(query.guests.as_deref())?;
    let now = Local::now().naive_local();

    let times = load_available_times(repo.get_ref(), branch_id, date, guests, now, policy.get_ref())
        .await
        .log_error_context("calculando disponibilidad")?;

    tracing::info!(
        branch_id,
        date = %date,
        guests,
        available = times.len(),
        "Consulta de disponibilidad"
    );

    Ok(HttpResponse::Ok().json(AvailableTimesResponse {
        branch_id,
        date: date.format("%Y-%m-%d").to_string(),
        guests,
        times,
    }))
}

/// Nivel de ocupación de una sucursal
///
/// # Respuesta
/// ```json
/// {
///   "occupancy_rate": 50.0,
///   "level": "normal",
///   "label": "Flujo Normal",
///   "estimated_wait": "5-10 min"
/// }
/// ```
///
/// # Errores
/// - `404 Not Found`: Sucursal no encontrada
async fn get_branch_load<R>(repo: web::Data<R>, path: web::Path<BranchId>) -> AppResult<HttpResponse>
where
    R: AvailabilityRepo + 'static,
{
    let branch_id = path.into_inner();
    let branch = repo
        .get_branch(branch_id)
        .await?
        .ok_or_else(|| AppError::not_found_id("Sucursal", &branch_id.to_string()))?;

    Ok(HttpResponse::Ok().json(BranchLoad::of(&branch)))
}

/// Configura las rutas de disponibilidad
///
/// # Rutas disponibles
/// - `GET /branches/{id}/available-times?date=YYYY-MM-DD&guests=N`
/// - `GET /branches/{id}/load`
pub fn routes<R>(cfg: &mut web::ServiceConfig)
where
    R: AvailabilityRepo + 'static,
{
    cfg.route("/branches/{id}/available-times", web::get().to(get_available_times::<R>));
    cfg.route("/branches/{id}/load", web::get().to(get_branch_load::<R>));
}
