use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type BranchId = i64;
pub type TableId = i64;
pub type ReservationId = i64;

/// Sucursal de un restaurante con su horario y contadores de mesas.
///
/// `opens_at` y `closes_at` se guardan tal cual llegan del almacén
/// (`HH:MM` o `HH:MM:SS`); el motor de disponibilidad los valida al usarlos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    #[serde(default)]
    pub company_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    #[serde(default)]
    pub total_tables: u32,
    #[serde(default)]
    pub active_tables: u32,
    pub status: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub branch_id: BranchId,
    #[serde(default)]
    pub name: String,
    /// Número de comensales que admite la mesa
    pub places: u32,
    pub status: TableStatus,
}

impl Table {
    /// Una mesa sirve para un grupo si está activa y tiene sitio suficiente.
    pub fn fits(&self, party_size: u32) -> bool {
        self.status == TableStatus::Active && self.places >= party_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationKind {
    Traditional,
    TimeLimited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Scheduled,
    Cancelled,
    ArrivalToRestaurant,
    Seated,
    HasOrdered,
    IsServed,
    AskedForBill,
    NoShow,
    Finished,
}

impl ReservationStatus {
    /// Estados que bloquean la mesa para nuevas reservas.
    pub const OCCUPYING: [ReservationStatus; 2] = [Self::Scheduled, Self::Seated];

    pub fn occupies_table(self) -> bool {
        Self::OCCUPYING.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::ArrivalToRestaurant => "arrival_to_restaurant",
            Self::Seated => "seated",
            Self::HasOrdered => "has_ordered",
            Self::IsServed => "is_served",
            Self::AskedForBill => "asked_for_bill",
            Self::NoShow => "no_show",
            Self::Finished => "finished",
        }
    }
}

/// Reserva existente, solo lectura para el motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub branch_id: BranchId,
    /// `None` mientras no se haya asignado mesa
    pub table_id: Option<TableId>,
    pub reservation_type: ReservationKind,
    pub reservation_date: NaiveDate,
    pub reservation_time: String,
    #[serde(default)]
    pub number_of_guests: u32,
    pub status: ReservationStatus,
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
