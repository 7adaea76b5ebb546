//! # Detector de solapamientos
//!
//! Decide qué mesas están ocupadas en una franja candidata a partir de las
//! reservas existentes.
//!
//! La franja se comprueba con una ventana fija (`check_window_minutes`) mientras
//! que cada reserva ocupa su duración propia: estimada, o por defecto según su
//! tipo. Las reservas sin mesa asignada o en estados que no ocupan se ignoran.

use std::collections::HashSet;

use super::clock::{minute_of_day, parse_time_of_day, OpeningHours, SlotPolicy};
use super::AvailabilityError;
use crate::db::{Reservation, TableId};

/// Intervalo semiabierto `[start, end)` en minutos del día de servicio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u32,
    pub end: u32,
}

impl Window {
    /// `end` se satura en `u32::MAX` con duraciones enormes.
    pub fn new(start: u32, length: u32) -> Self {
        Self {
            start,
            end: start.saturating_add(length),
        }
    }

    pub fn overlaps(&self, other: &Window) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Ocupación de una mesa por una reserva ya resuelta a minutos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Booked {
    table_id: TableId,
    window: Window,
}

/// Reservas que ocupan mesa, con sus horas ya parseadas.
///
/// Se construye una vez por cálculo y se consulta en cada franja.
#[derive(Debug, Clone)]
pub struct Occupancy {
    booked: Vec<Booked>,
    check_window: u32,
}

impl Occupancy {
    /// Prepara las reservas usando minutos del reloj (sin horario nocturno).
    pub fn build<'a, I>(reservations: I, policy: &SlotPolicy) -> Result<Self, AvailabilityError>
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        Self::build_with(reservations, policy, minute_of_day)
    }

    /// Prepara las reservas llevándolas al día de servicio de `hours`.
    pub fn for_hours<'a, I>(
        reservations: I,
        hours: &OpeningHours,
        policy: &SlotPolicy,
    ) -> Result<Self, AvailabilityError>
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        Self::build_with(reservations, policy, |time| hours.service_minute(time))
    }

    fn build_with<'a, I, F>(
        reservations: I,
        policy: &SlotPolicy,
        to_minute: F,
    ) -> Result<Self, AvailabilityError>
    where
        I: IntoIterator<Item = &'a Reservation>,
        F: Fn(chrono::NaiveTime) -> u32,
    {
        let mut booked = Vec::new();
        for reservation in reservations {
            let Some(table_id) = reservation.table_id else {
                continue;
            };
            if !reservation.status.occupies_table() {
                continue;
            }

            let time = parse_time_of_day("reservation_time", &reservation.reservation_time)?;
            let duration = policy.duration_for(
                reservation.reservation_type,
                reservation.estimated_duration_minutes,
            );
            booked.push(Booked {
                table_id,
                window: Window::new(to_minute(time), duration),
            });
        }

        Ok(Self {
            booked,
            check_window: policy.check_window_minutes,
        })
    }

    /// Mesas ocupadas en la franja que empieza en `slot_minute`.
    pub fn occupied_at(&self, slot_minute: u32) -> HashSet<TableId> {
        let check = Window::new(slot_minute, self.check_window);
        self.booked
            .iter()
            .filter(|b| check.overlaps(&b.window))
            .map(|b| b.table_id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.booked.is_empty()
    }
}

/// Mesas ocupadas en la franja `slot_label` (`HH:MM`).
///
/// # Errores
/// - `InvalidTime`: si la franja o la hora de alguna reserva no es válida
pub fn occupied_tables(
    reservations: &[Reservation],
    slot_label: &str,
    policy: &SlotPolicy,
) -> Result<HashSet<TableId>, AvailabilityError> {
    let slot = minute_of_day(parse_time_of_day("slot", slot_label)?);
    Ok(Occupancy::build(reservations, policy)?.occupied_at(slot))
}
