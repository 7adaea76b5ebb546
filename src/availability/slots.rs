//! # Generador de franjas
//!
//! Produce las horas candidatas de una sucursal a intervalos fijos, desde la
//! apertura hasta el cierre (ambos incluidos), descartando las que no cumplen
//! la antelación mínima cuando la fecha pedida es hoy.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::clock::{instant_of, label, OpeningHours, SlotPolicy};
use super::AvailabilityError;

/// Franja candidata dentro del día de servicio de `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub date: NaiveDate,
    /// Minutos desde la medianoche de `date`; supera 24h en horarios nocturnos
    pub minute: u32,
}

impl Slot {
    pub fn label(&self) -> String {
        label(self.minute)
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        instant_of(self.date, self.minute)
    }
}

/// Secuencia perezosa de franjas.
///
/// No comparte estado: clonarla o volver a llamar a [`generate_slots`] la
/// reinicia desde la apertura.
#[derive(Debug, Clone)]
pub struct Slots {
    date: NaiveDate,
    next: u32,
    last: u32,
    step: u32,
    earliest: Option<NaiveDateTime>,
    exhausted: bool,
}

impl Slots {
    pub(crate) fn new(
        hours: Option<OpeningHours>,
        target_date: NaiveDate,
        now: NaiveDateTime,
        policy: &SlotPolicy,
    ) -> Self {
        // Solo se filtra por antelación cuando se reserva para hoy
        let earliest = (target_date == now.date())
            .then(|| now + Duration::minutes(i64::from(policy.lead_time_minutes)));

        match hours {
            Some(hours) => Self {
                date: target_date,
                next: hours.opens,
                last: hours.closes,
                step: policy.interval_minutes.max(1),
                earliest,
                exhausted: false,
            },
            None => Self {
                date: target_date,
                next: 0,
                last: 0,
                step: 1,
                earliest: None,
                exhausted: true,
            },
        }
    }
}

impl Iterator for Slots {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        while !self.exhausted && self.next <= self.last {
            let slot = Slot {
                date: self.date,
                minute: self.next,
            };
            match self.next.checked_add(self.step) {
                Some(next) => self.next = next,
                None => self.exhausted = true,
            }

            match self.earliest {
                Some(earliest) if slot.starts_at() < earliest => continue,
                _ => return Some(slot),
            }
        }
        self.exhausted = true;
        None
    }
}

impl std::iter::FusedIterator for Slots {}

/// Genera las franjas de `target_date` para el horario dado.
///
/// # Parámetros
/// - `opens_at` / `closes_at`: horas en texto; si falta alguna la secuencia es vacía
/// - `target_date`: fecha de la reserva
/// - `now`: instante actual, inyectado para que el cálculo sea determinista
///
/// # Errores
/// - `InvalidTime`: si alguna de las horas no se puede parsear
pub fn generate_slots(
    opens_at: Option<&str>,
    closes_at: Option<&str>,
    target_date: NaiveDate,
    now: NaiveDateTime,
    policy: &SlotPolicy,
) -> Result<Slots, AvailabilityError> {
    let hours = OpeningHours::parse(opens_at, closes_at)?;
    Ok(Slots::new(hours, target_date, now, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    fn labels(slots: Slots) -> Vec<String> {
        slots.map(|s| s.label()).collect()
    }

    #[test]
    fn future_date_keeps_every_slot() {
        let tomorrow = today().succ_opt().unwrap();
        let now = at(today(), 23, 0);
        let slots = generate_slots(Some("09:00"), Some("22:00"), tomorrow, now, &SlotPolicy::default()).unwrap();
        let labels = labels(slots);

        assert_eq!(labels.len(), 27);
        assert_eq!(labels.first().unwrap(), "09:00");
        assert_eq!(labels[1], "09:30");
        assert_eq!(labels.last().unwrap(), "22:00");
    }

    #[test]
    fn closing_time_off_the_grid_is_not_exceeded() {
        let tomorrow = today().succ_opt().unwrap();
        let slots = generate_slots(Some("12:15"), Some("13:50"), tomorrow, at(today(), 8, 0), &SlotPolicy::default()).unwrap();
        assert_eq!(labels(slots), vec!["12:15", "12:45", "13:15", "13:45"]);
    }

    #[test]
    fn today_drops_slots_inside_lead_time() {
        let now = at(today(), 12, 10);
        let slots = generate_slots(Some("12:00"), Some("14:00"), today(), now, &SlotPolicy::default()).unwrap();
        // 12:40 es el primer instante permitido
        assert_eq!(labels(slots), vec!["13:00", "13:30", "14:00"]);
    }

    #[test]
    fn slot_exactly_at_lead_time_survives() {
        let now = at(today(), 12, 30);
        let slots = generate_slots(Some("12:00"), Some("13:30"), today(), now, &SlotPolicy::default()).unwrap();
        assert_eq!(labels(slots), vec!["13:00", "13:30"]);
    }

    #[test]
    fn late_evening_today_has_nothing_left() {
        let now = at(today(), 21, 45);
        let slots = generate_slots(Some("09:00"), Some("22:00"), today(), now, &SlotPolicy::default()).unwrap();
        assert_eq!(labels(slots).len(), 0);
    }

    #[test]
    fn missing_hours_yield_empty_sequence() {
        let slots = generate_slots(None, Some("22:00"), today(), at(today(), 8, 0), &SlotPolicy::default()).unwrap();
        assert_eq!(slots.count(), 0);
    }

    #[test]
    fn malformed_hours_are_rejected() {
        let result = generate_slots(Some("9am"), Some("22:00"), today(), at(today(), 8, 0), &SlotPolicy::default());
        assert!(matches!(result, Err(AvailabilityError::InvalidTime { field: "opens_at", .. })));
    }

    #[test]
    fn opening_equal_to_closing_is_a_single_slot() {
        let tomorrow = today().succ_opt().unwrap();
        let slots = generate_slots(Some("18:00"), Some("18:00"), tomorrow, at(today(), 8, 0), &SlotPolicy::default()).unwrap();
        assert_eq!(labels(slots), vec!["18:00"]);
    }

    #[test]
    fn overnight_hours_continue_past_midnight() {
        let tomorrow = today().succ_opt().unwrap();
        let slots = generate_slots(Some("22:30"), Some("01:00"), tomorrow, at(today(), 8, 0), &SlotPolicy::default()).unwrap();
        let all: Vec<Slot> = slots.collect();
        let labels: Vec<String> = all.iter().map(Slot::label).collect();
        assert_eq!(labels, vec!["22:30", "23:00", "23:30", "00:00", "00:30", "01:00"]);
        assert_eq!(all[3].starts_at(), at(tomorrow.succ_opt().unwrap(), 0, 0));
    }

    #[test]
    fn overnight_lead_time_uses_real_instants() {
        let now = at(today(), 23, 50);
        let slots = generate_slots(Some("22:00"), Some("01:00"), today(), now, &SlotPolicy::default()).unwrap();
        assert_eq!(labels(slots), vec!["00:30", "01:00"]);
    }

    #[test]
    fn sequence_is_restartable() {
        let tomorrow = today().succ_opt().unwrap();
        let slots = generate_slots(Some("09:00"), Some("11:00"), tomorrow, at(today(), 8, 0), &SlotPolicy::default()).unwrap();
        let first: Vec<Slot> = slots.clone().collect();
        let second: Vec<Slot> = slots.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn steps_follow_the_policy_interval() {
        let tomorrow = today().succ_opt().unwrap();
        let policy = SlotPolicy {
            interval_minutes: 45,
            ..SlotPolicy::default()
        };
        let slots = generate_slots(Some("10:00"), Some("12:00"), tomorrow, at(today(), 8, 0), &policy).unwrap();
        assert_eq!(labels(slots), vec!["10:00", "10:45", "11:30"]);
    }

    #[test]
    fn huge_interval_stops_after_opening() {
        let tomorrow = today().succ_opt().unwrap();
        let policy = SlotPolicy {
            interval_minutes: u32::MAX,
            ..SlotPolicy::default()
        };
        let slots = generate_slots(Some("10:00"), Some("12:00"), tomorrow, at(today(), 8, 0), &policy).unwrap();
        assert_eq!(labels(slots), vec!["10:00"]);
    }
}
