//! # Horas del día de servicio
//!
//! Conversión de las horas guardadas como texto a minutos y parámetros fijos
//! de la política de franjas.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::AvailabilityError;
use crate::db::ReservationKind;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parámetros de generación de franjas y de solapamiento, en minutos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    /// Separación entre dos franjas consecutivas
    pub interval_minutes: u32,
    /// Antelación mínima respecto a "ahora" cuando la fecha es hoy
    pub lead_time_minutes: u32,
    /// Ventana que se comprueba a partir de cada franja candidata
    pub check_window_minutes: u32,
    /// Duración supuesta de una reserva `traditional` sin estimación
    pub traditional_minutes: u32,
    /// Duración supuesta de una reserva `time_limited` sin estimación
    pub time_limited_minutes: u32,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            lead_time_minutes: 30,
            check_window_minutes: 120,
            traditional_minutes: 120,
            time_limited_minutes: 90,
        }
    }
}

impl SlotPolicy {
    /// Duración usada para el solapamiento: la estimada si existe, si no la
    /// que corresponde al tipo de reserva.
    pub fn duration_for(&self, kind: ReservationKind, estimated: Option<u32>) -> u32 {
        estimated.unwrap_or(match kind {
            ReservationKind::Traditional => self.traditional_minutes,
            ReservationKind::TimeLimited => self.time_limited_minutes,
        })
    }
}

/// Parsea una hora `HH:MM` o `HH:MM:SS` (24 horas).
///
/// # Errores
/// - `InvalidTime`: si el texto no tiene ninguno de los dos formatos
pub fn parse_time_of_day(field: &'static str, value: &str) -> Result<NaiveTime, AvailabilityError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| AvailabilityError::invalid_time(field, value))
}

pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Etiqueta `HH:MM` de un minuto del día de servicio (se envuelve pasada la medianoche).
pub fn label(minute: u32) -> String {
    let wrapped = minute % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Horario de apertura de una sucursal en minutos desde la medianoche del
/// día de servicio.
///
/// Si el cierre es anterior a la apertura se entiende que cierra al día
/// siguiente, así que `closes` puede superar `MINUTES_PER_DAY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub opens: u32,
    pub closes: u32,
}

impl OpeningHours {
    /// Devuelve `None` si falta cualquiera de las dos horas.
    pub fn parse(
        opens_at: Option<&str>,
        closes_at: Option<&str>,
    ) -> Result<Option<Self>, AvailabilityError> {
        let (Some(opens_at), Some(closes_at)) = (opens_at, closes_at) else {
            return Ok(None);
        };
        if opens_at.trim().is_empty() || closes_at.trim().is_empty() {
            return Ok(None);
        }

        let opens = minute_of_day(parse_time_of_day("opens_at", opens_at)?);
        let mut closes = minute_of_day(parse_time_of_day("closes_at", closes_at)?);
        if closes < opens {
            closes += MINUTES_PER_DAY;
        }
        Ok(Some(Self { opens, closes }))
    }

    pub fn is_overnight(&self) -> bool {
        self.closes >= MINUTES_PER_DAY
    }

    /// Lleva una hora del reloj al minuto del día de servicio.
    ///
    /// En horarios nocturnos, las horas anteriores a la apertura pertenecen a
    /// la madrugada siguiente.
    pub fn service_minute(&self, time: NaiveTime) -> u32 {
        let minute = minute_of_day(time);
        if self.is_overnight() && minute < self.opens {
            minute + MINUTES_PER_DAY
        } else {
            minute
        }
    }
}

/// Instante real de un minuto del día de servicio que empieza en `date`.
pub fn instant_of(date: NaiveDate, minute: u32) -> NaiveDateTime {
    let day = date + Duration::days(i64::from(minute / MINUTES_PER_DAY));
    let time = NaiveTime::MIN + Duration::minutes(i64::from(minute % MINUTES_PER_DAY));
    day.and_time(time)
}
