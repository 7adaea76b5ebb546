use serde::Serialize;

use crate::db::Branch;

/// Nivel de ocupación de una sucursal según sus contadores de mesas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadLevel {
    Quiet,
    Normal,
    AlmostFull,
    Full,
    Saturated,
}

impl LoadLevel {
    fn from_rate(rate: f64) -> Self {
        if rate < 30.0 {
            Self::Quiet
        } else if rate < 60.0 {
            Self::Normal
        } else if rate < 80.0 {
            Self::AlmostFull
        } else if rate < 95.0 {
            Self::Full
        } else {
            Self::Saturated
        }
    }

    /// Texto que se muestra al cliente
    pub fn label(self) -> &'static str {
        match self {
            Self::Quiet => "Tranquilo",
            Self::Normal => "Flujo Normal",
            Self::AlmostFull => "Casi lleno",
            Self::Full => "Lleno",
            Self::Saturated => "Saturado",
        }
    }

    /// Espera aproximada para sentarse
    pub fn estimated_wait(self) -> &'static str {
        match self {
            Self::Quiet => "2 min",
            Self::Normal => "5-10 min",
            Self::AlmostFull => "15-20 min",
            Self::Full => "25-30 min",
            Self::Saturated => "30+ min",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchLoad {
    pub occupancy_rate: f64,
    pub level: LoadLevel,
    pub label: &'static str,
    pub estimated_wait: &'static str,
}

impl BranchLoad {
    pub fn of(branch: &Branch) -> Self {
        let occupancy_rate = if branch.total_tables > 0 {
            f64::from(branch.active_tables) / f64::from(branch.total_tables) * 100.0
        } else {
            0.0
        };
        let level = LoadLevel::from_rate(occupancy_rate);
        Self {
            occupancy_rate,
            level,
            label: level.label(),
            estimated_wait: level.estimated_wait(),
        }
    }
}
