//! # Restaurant Availability
//!
//! Cálculo de las horas reservables de una sucursal de restaurante a partir
//! de su horario, sus mesas y las reservas existentes.
//!
//! - [`availability`]: motor puro, sin E/S
//! - [`db`]: modelos y repositorios de solo lectura (MongoDB y en memoria)
//! - [`api`]: endpoints HTTP con Actix Web
//! - [`config`]: configuración desde variables de entorno

pub mod api;
pub mod availability;
pub mod config;
pub mod db;
