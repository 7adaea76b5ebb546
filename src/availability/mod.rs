//! # Motor de disponibilidad
//!
//! Calcula qué horas de un día se pueden reservar en una sucursal para un
//! grupo de cierto tamaño, a partir de datos ya obtenidos del almacén.
//!
//! ## Pasos
//!
//! 1. [`eligible_tables`]: mesas activas con capacidad suficiente
//! 2. [`generate_slots`]: franjas cada 30 minutos entre apertura y cierre
//! 3. [`Occupancy`]: mesas ocupadas en cada franja por reservas existentes
//! 4. [`available_times`]: franjas con al menos una mesa elegible libre
//!
//! Todo es puro: el instante actual se recibe como parámetro y no se modifica
//! ninguna entrada, así que dos llamadas iguales dan el mismo resultado.

mod clock;
mod error;
mod load;
mod overlap;
mod slots;
mod tables;

pub use clock::{parse_time_of_day, OpeningHours, SlotPolicy, MINUTES_PER_DAY};
pub use error::AvailabilityError;
pub use load::{BranchLoad, LoadLevel};
pub use overlap::{occupied_tables, Occupancy, Window};
pub use slots::{generate_slots, Slot, Slots};
pub use tables::eligible_tables;

use chrono::{NaiveDate, NaiveDateTime};

use crate::db::{Branch, Reservation, Table};

/// Horas reservables con la política por defecto.
///
/// Ver [`available_times_with`].
pub fn available_times(
    branch: &Branch,
    tables: &[Table],
    reservations: &[Reservation],
    party_size: u32,
    target_date: NaiveDate,
    now: NaiveDateTime,
) -> Result<Vec<String>, AvailabilityError> {
    available_times_with(
        branch,
        tables,
        reservations,
        party_size,
        target_date,
        now,
        &SlotPolicy::default(),
    )
}

/// Horas (`HH:MM`, en orden cronológico) en las que al menos una mesa
/// elegible para `party_size` está libre.
///
/// Solo cuentan las reservas de la misma sucursal y fecha. La falta de
/// horario o de mesas elegibles da una lista vacía.
///
/// # Errores
/// - `InvalidTime`: horario de la sucursal u hora de alguna reserva mal formados
pub fn available_times_with(
    branch: &Branch,
    tables: &[Table],
    reservations: &[Reservation],
    party_size: u32,
    target_date: NaiveDate,
    now: NaiveDateTime,
    policy: &SlotPolicy,
) -> Result<Vec<String>, AvailabilityError> {
    let eligible = eligible_tables(tables, party_size);
    if eligible.is_empty() {
        tracing::debug!(
            branch_id = branch.id,
            party_size,
            tables = tables.len(),
            "Sin mesas elegibles para el grupo"
        );
        return Ok(Vec::new());
    }

    let Some(hours) = OpeningHours::parse(branch.opens_at.as_deref(), branch.closes_at.as_deref())? else {
        tracing::debug!(branch_id = branch.id, "Sucursal sin horario definido");
        return Ok(Vec::new());
    };

    let same_day = reservations
        .iter()
        .filter(|r| r.branch_id == branch.id && r.reservation_date == target_date);
    let occupancy = Occupancy::for_hours(same_day, &hours, policy)?;

    let times: Vec<String> = Slots::new(Some(hours), target_date, now, policy)
        .filter(|slot| {
            if occupancy.is_empty() {
                return true;
            }
            let occupied = occupancy.occupied_at(slot.minute);
            eligible.iter().any(|table| !occupied.contains(&table.id))
        })
        .map(|slot| slot.label())
        .collect();

    tracing::debug!(
        branch_id = branch.id,
        date = %target_date,
        party_size,
        eligible = eligible.len(),
        slots = times.len(),
        "Disponibilidad calculada"
    );

    Ok(times)
}

/// Resultado de intentar calcular con datos que pueden seguir cargándose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Falta alguna de las tres consultas; no se ha calculado nada
    NotReady,
    Times(Vec<String>),
}

impl Availability {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Times(_))
    }

    /// Horas disponibles, o `None` si aún no hay datos
    pub fn times(&self) -> Option<&[String]> {
        match self {
            Self::NotReady => None,
            Self::Times(times) => Some(times),
        }
    }
}

/// Datos de entrada a medida que llegan del almacén.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityInputs {
    pub branch: Option<Branch>,
    pub tables: Option<Vec<Table>>,
    pub reservations: Option<Vec<Reservation>>,
}

impl AvailabilityInputs {
    pub fn is_complete(&self) -> bool {
        self.branch.is_some() && self.tables.is_some() && self.reservations.is_some()
    }

    /// Calcula solo cuando las tres entradas están presentes.
    pub fn compute(
        &self,
        party_size: u32,
        target_date: NaiveDate,
        now: NaiveDateTime,
        policy: &SlotPolicy,
    ) -> Result<Availability, AvailabilityError> {
        let (Some(branch), Some(tables), Some(reservations)) =
            (&self.branch, &self.tables, &self.reservations)
        else {
            return Ok(Availability::NotReady);
        };

        available_times_with(branch, tables, reservations, party_size, target_date, now, policy)
            .map(Availability::Times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ReservationKind, ReservationStatus, TableStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn future() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn morning() -> NaiveDateTime {
        today().and_hms_opt(8, 0, 0).unwrap()
    }

    fn branch() -> Branch {
        Branch {
            id: 1,
            company_id: Some(1),
            name: "La Tasca".into(),
            location: "Plaza Mayor 3".into(),
            opens_at: Some("09:00".into()),
            closes_at: Some("22:00".into()),
            total_tables: 1,
            active_tables: 1,
            status: "active".into(),
            images: vec![],
        }
    }

    fn table(id: i64, places: u32) -> Table {
        Table {
            id,
            branch_id: 1,
            name: format!("Mesa {id}"),
            places,
            status: TableStatus::Active,
        }
    }

    fn reservation(table_id: i64, date: NaiveDate, time: &str) -> Reservation {
        Reservation {
            id: table_id * 100,
            branch_id: 1,
            table_id: Some(table_id),
            reservation_type: ReservationKind::Traditional,
            reservation_date: date,
            reservation_time: time.into(),
            number_of_guests: 4,
            status: ReservationStatus::Scheduled,
            estimated_duration_minutes: None,
            customer_name: Some("Ana".into()),
            notes: None,
        }
    }

    fn all_slots() -> Vec<String> {
        (0..=26)
            .map(|i| {
                let minute = 9 * 60 + i * 30;
                format!("{:02}:{:02}", minute / 60, minute % 60)
            })
            .collect()
    }

    #[test]
    fn empty_branch_offers_every_slot() {
        let times = available_times(&branch(), &[table(1, 4)], &[], 4, future(), morning()).unwrap();
        assert_eq!(times.len(), 27);
        assert_eq!(times, all_slots());
    }

    #[test]
    fn single_booking_removes_overlapping_slots() {
        let reservations = vec![reservation(1, future(), "13:00")];
        let times = available_times(&branch(), &[table(1, 4)], &reservations, 4, future(), morning()).unwrap();

        let blocked = ["11:30", "12:00", "12:30", "13:00", "13:30", "14:00", "14:30"];
        let expected: Vec<String> = all_slots()
            .into_iter()
            .filter(|s| !blocked.contains(&s.as_str()))
            .collect();
        assert_eq!(times, expected);
        assert!(times.contains(&"11:00".to_string()));
        assert!(times.contains(&"15:00".to_string()));
    }

    #[test]
    fn party_larger_than_any_table_gets_nothing() {
        let tables = vec![table(1, 4), table(2, 2), table(3, 4)];
        let times = available_times(&branch(), &tables, &[], 6, future(), morning()).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn too_late_today_gets_nothing() {
        let now = today().and_hms_opt(21, 45, 0).unwrap();
        let times = available_times(&branch(), &[table(1, 4)], &[], 2, today(), now).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn second_table_keeps_slot_open() {
        let reservations = vec![reservation(1, future(), "13:00")];
        let tables = vec![table(1, 4), table(2, 4)];
        let times = available_times(&branch(), &tables, &reservations, 4, future(), morning()).unwrap();
        assert_eq!(times.len(), 27);
    }

    #[test]
    fn booked_table_too_small_does_not_matter() {
        // La mesa libre es pequeña; la grande está reservada
        let reservations = vec![reservation(1, future(), "13:00")];
        let tables = vec![table(1, 6), table(2, 2)];
        let times = available_times(&branch(), &tables, &reservations, 5, future(), morning()).unwrap();
        assert!(!times.contains(&"13:00".to_string()));
        assert!(times.contains(&"15:00".to_string()));
    }

    #[test]
    fn non_overlapping_bookings_leave_gap_between() {
        let reservations = vec![
            reservation(1, future(), "10:00"),
            reservation(1, future(), "18:00"),
        ];
        let times = available_times(&branch(), &[table(1, 2)], &reservations, 2, future(), morning()).unwrap();
        assert!(times.contains(&"12:00".to_string()));
        assert!(times.contains(&"15:30".to_string()));
        assert!(!times.contains(&"16:30".to_string()));
        assert!(!times.contains(&"10:00".to_string()));
        assert!(times.contains(&"20:00".to_string()));
    }

    #[test]
    fn bookings_of_other_days_and_branches_are_ignored() {
        let mut other_branch = reservation(1, future(), "13:00");
        other_branch.branch_id = 2;
        let other_day = reservation(1, today(), "13:00");
        let times = available_times(
            &branch(),
            &[table(1, 4)],
            &[other_branch, other_day],
            4,
            future(),
            morning(),
        )
        .unwrap();
        assert_eq!(times.len(), 27);
    }

    #[test]
    fn branch_without_hours_has_no_availability() {
        let mut b = branch();
        b.closes_at = None;
        let times = available_times(&b, &[table(1, 4)], &[], 2, future(), morning()).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn malformed_hours_surface_as_error() {
        let mut b = branch();
        b.opens_at = Some("nueve".into());
        let err = available_times(&b, &[table(1, 4)], &[], 2, future(), morning()).unwrap_err();
        assert_eq!(err.field(), "opens_at");
    }

    #[test]
    fn repeated_calls_agree() {
        let reservations = vec![reservation(1, today(), "14:00")];
        let now = today().and_hms_opt(11, 20, 0).unwrap();
        let first = available_times(&branch(), &[table(1, 4)], &reservations, 2, today(), now).unwrap();
        let second = available_times(&branch(), &[table(1, 4)], &reservations, 2, today(), now).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.first().map(String::as_str), Some("12:00"));
        assert!(!first.contains(&"12:30".to_string()));
        assert!(first.contains(&"16:00".to_string()));
    }

    #[test]
    fn overnight_branch_serves_past_midnight() {
        let mut b = branch();
        b.opens_at = Some("21:00".into());
        b.closes_at = Some("01:00".into());
        let reservations = vec![reservation(1, future(), "00:30")];
        let times = available_times(&b, &[table(1, 4)], &reservations, 2, future(), morning()).unwrap();
        assert_eq!(times, vec!["21:00", "21:30", "22:00", "22:30"]);
    }

    #[test]
    fn endless_estimated_duration_blocks_rest_of_day() {
        let mut booked = reservation(1, future(), "20:00");
        booked.estimated_duration_minutes = Some(u32::MAX);
        let times = available_times(&branch(), &[table(1, 4)], &[booked], 2, future(), morning()).unwrap();
        assert_eq!(times.last().map(String::as_str), Some("18:00"));
        assert!(!times.contains(&"22:00".to_string()));
    }

    #[test]
    fn inputs_wait_until_complete() {
        let mut inputs = AvailabilityInputs {
            branch: Some(branch()),
            tables: Some(vec![table(1, 4)]),
            reservations: None,
        };
        assert!(!inputs.is_complete());
        let pending = inputs.compute(2, future(), morning(), &SlotPolicy::default()).unwrap();
        assert_eq!(pending, Availability::NotReady);
        assert_eq!(pending.times(), None);

        inputs.reservations = Some(Vec::new());
        let ready = inputs.compute(2, future(), morning(), &SlotPolicy::default()).unwrap();
        assert!(ready.is_ready());
        assert_eq!(ready.times().map(<[String]>::len), Some(27));
    }
}
