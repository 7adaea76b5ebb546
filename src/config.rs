//! # Configuración
//!
//! Se lee de variables de entorno (y de `.env` si existe, cargado en `main`):
//!
//! ```env
//! MONGODB_URI=mongodb://localhost:27017
//! MONGODB_DATABASE=restaurant_availability
//! BIND_ADDRESS=0.0.0.0:8080
//!
//! # Política de franjas (minutos, entre 1 y 1440)
//! SLOT_INTERVAL_MINUTES=30
//! LEAD_TIME_MINUTES=30
//! CHECK_WINDOW_MINUTES=120
//! TRADITIONAL_DURATION_MINUTES=120
//! TIME_LIMITED_DURATION_MINUTES=90
//! ```

use std::env;

use crate::availability::{SlotPolicy, MINUTES_PER_DAY};

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub bind_address: String,
    pub slot_policy: SlotPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que [`Config::from_env`] pero con una fuente de variables inyectada
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SlotPolicy::default();
        let minutes = |key: &str, default: u32| -> u32 {
            match lookup(key) {
                None => default,
                Some(raw) => match raw.trim().parse::<u32>() {
                    Ok(value) if value > 0 && value <= MINUTES_PER_DAY => value,
                    _ => {
                        tracing::warn!(
                            variable = key,
                            value = %raw,
                            default,
                            "Valor inválido, se usa el valor por defecto"
                        );
                        default
                    }
                },
            }
        };

        let slot_policy = SlotPolicy {
            interval_minutes: minutes("SLOT_INTERVAL_MINUTES", defaults.interval_minutes),
            lead_time_minutes: minutes("LEAD_TIME_MINUTES", defaults.lead_time_minutes),
            check_window_minutes: minutes("CHECK_WINDOW_MINUTES", defaults.check_window_minutes),
            traditional_minutes: minutes("TRADITIONAL_DURATION_MINUTES", defaults.traditional_minutes),
            time_limited_minutes: minutes("TIME_LIMITED_DURATION_MINUTES", defaults.time_limited_minutes),
        };

        Self {
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            mongodb_database: lookup("MONGODB_DATABASE")
                .unwrap_or_else(|| "restaurant_availability".to_string()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            slot_policy,
        }
    }
}
