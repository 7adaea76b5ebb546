//! Repositorio en memoria con las mismas consultas que [`super::MongoRepo`].
//!
//! Sirve para pruebas y para arrancar el servidor sin base de datos.

use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

use super::models::{Branch, BranchId, Reservation, Table, TableStatus};
use super::AvailabilityRepo;
use crate::api::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct MemoryRepo {
    branches: RwLock<Vec<Branch>>,
    tables: RwLock<Vec<Table>>,
    reservations: RwLock<Vec<Reservation>>,
}

fn poisoned<T>(_: PoisonError<T>) -> AppError {
    AppError::internal_trace("Repositorio en memoria bloqueado", None)
}

impl MemoryRepo {
    /// Inserta o reemplaza una sucursal con el mismo ID
    pub fn insert_branch(&self, branch: Branch) {
        let mut branches = self.branches.write().unwrap_or_else(PoisonError::into_inner);
        branches.retain(|b| b.id != branch.id);
        branches.push(branch);
    }

    pub fn insert_table(&self, table: Table) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.retain(|t| t.id != table.id);
        tables.push(table);
    }

    pub fn insert_reservation(&self, reservation: Reservation) {
        let mut reservations = self
            .reservations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        reservations.retain(|r| r.id != reservation.id);
        reservations.push(reservation);
    }
}

impl AvailabilityRepo for MemoryRepo {
    async fn get_branch(&self, branch_id: BranchId) -> AppResult<Option<Branch>> {
        let branches = self.branches.read().map_err(poisoned)?;
        Ok(branches.iter().find(|b| b.id == branch_id).cloned())
    }

    async fn get_active_tables(&self, branch_id: BranchId) -> AppResult<Vec<Table>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .iter()
            .filter(|t| t.branch_id == branch_id && t.status == TableStatus::Active)
            .cloned()
            .collect())
    }

    async fn get_reservations(
        &self,
        branch_id: BranchId,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let reservations = self.reservations.read().map_err(poisoned)?;
        Ok(reservations
            .iter()
            .filter(|r| {
                r.branch_id == branch_id
                    && r.reservation_date == date
                    && r.status.occupies_table()
            })
            .cloned()
            .collect())
    }
}
