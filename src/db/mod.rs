// src/db/mod.rs
pub mod memory;
pub mod models;
pub mod mongodb;

pub use memory::MemoryRepo;
pub use models::{
    Branch, BranchId, Reservation, ReservationId, ReservationKind, ReservationStatus, Table,
    TableId, TableStatus,
};
pub use mongodb::MongoRepo;

use std::future::Future;

use chrono::{NaiveDate, NaiveDateTime};

use crate::api::{AppError, AppResult};
use crate::availability::{available_times_with, SlotPolicy};

/// Consultas de solo lectura que necesita el motor de disponibilidad.
///
/// Los errores del almacén se devuelven tal cual; el motor no reintenta.
pub trait AvailabilityRepo {
    /// Sucursal por ID, `None` si no existe
    fn get_branch(&self, branch_id: BranchId)
        -> impl Future<Output = AppResult<Option<Branch>>> + Send;

    /// Mesas con `status = active` de la sucursal
    fn get_active_tables(&self, branch_id: BranchId)
        -> impl Future<Output = AppResult<Vec<Table>>> + Send;

    /// Reservas `scheduled` o `seated` de la sucursal en la fecha
    fn get_reservations(
        &self,
        branch_id: BranchId,
        date: NaiveDate,
    ) -> impl Future<Output = AppResult<Vec<Reservation>>> + Send;
}

/// Obtiene los datos de una sucursal y calcula sus horas disponibles
///
/// # Funcionalidad
///
/// 1. Busca la sucursal (`NotFoundWithId` si no existe)
/// 2. Pide mesas y reservas en paralelo
/// 3. Calcula solo cuando las tres consultas han terminado
///
/// # Errores
///
/// - `NotFoundWithId`: la sucursal no existe
/// - `ValidationWithField`: horario u hora de reserva mal formados
/// - Cualquier error del almacén, sin modificar
pub async fn load_available_times<R>(
    repo: &R,
    branch_id: BranchId,
    date: NaiveDate,
    party_size: u32,
    now: NaiveDateTime,
    policy: &SlotPolicy,
) -> AppResult<Vec<String>>
where
    R: AvailabilityRepo,
{
    let branch = repo
        .get_branch(branch_id)
        .await?
        .ok_or_else(|| AppError::not_found_id("Sucursal", &branch_id.to_string()))?;

    let (tables, reservations) = tokio::try_join!(
        repo.get_active_tables(branch_id),
        repo.get_reservations(branch_id, date),
    )?;

    tracing::debug!(
        branch_id,
        tables = tables.len(),
        reservations = reservations.len(),
        "Datos de disponibilidad cargados"
    );

    // try_join! solo devuelve cuando las tres consultas han terminado
    let times = available_times_with(&branch, &tables, &reservations, party_size, date, now, policy)?;
    Ok(times)
}
