use thiserror::Error;

/// Errores del motor de disponibilidad.
///
/// Solo los datos mal formados son error: horarios ausentes, falta de mesas o
/// listas vacías se traducen en "sin disponibilidad".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// Hora con formato distinto de `HH:MM` o `HH:MM:SS`
    #[error("Hora inválida en campo '{field}': '{value}' (use HH:MM)")]
    InvalidTime {
        field: &'static str,
        value: String,
    },
}

impl AvailabilityError {
    pub fn invalid_time(field: &'static str, value: &str) -> Self {
        Self::InvalidTime {
            field,
            value: value.to_string(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidTime { field, .. } => field,
        }
    }
}
