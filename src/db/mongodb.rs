use chrono::NaiveDate;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Cursor, Database};
use serde::de::DeserializeOwned;

use super::models::{Branch, BranchId, Reservation, ReservationStatus, Table};
use super::AvailabilityRepo;
use crate::api::{AppError, AppResult};
use crate::config::Config;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone)]
pub struct MongoRepo {
    pub client: Client,
    pub database: Database,
}

impl MongoRepo {
    pub async fn init(config: &Config) -> Result<MongoRepo> {
        let client = Client::with_uri_str(&config.mongodb_uri)
            .await
            .map_err(|e| AppError::Internal(format!("Error conectando a MongoDB: {}", e)))?;

        let database = client.database(&config.mongodb_database);

        // Test connection
        database
            .run_command(doc! {"ping": 1})
            .await
            .map_err(|e| AppError::Internal(format!("Error validando conexión MongoDB: {}", e)))?;

        tracing::info!(database = %config.mongodb_database, "Conexión a MongoDB establecida exitosamente");

        Ok(MongoRepo { client, database })
    }

    pub fn branches(&self) -> Collection<Branch> {
        self.database.collection("branches")
    }

    pub fn tables(&self) -> Collection<Table> {
        self.database.collection("tables")
    }

    pub fn reservations(&self) -> Collection<Reservation> {
        self.database.collection("reservations")
    }

    // Índices para las tres consultas del motor de disponibilidad
    pub async fn create_indexes(&self) -> Result<()> {
        use mongodb::{options::IndexOptions, IndexModel};

        let branch_indexes = vec![IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build()];

        self.branches()
            .create_indexes(branch_indexes)
            .await
            .map_err(|e| AppError::database("crear índices branches", e))?;

        let table_indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "branch_id": 1, "status": 1 })
                .build(),
        ];

        self.tables()
            .create_indexes(table_indexes)
            .await
            .map_err(|e| AppError::database("crear índices tables", e))?;

        let reservation_indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "branch_id": 1, "reservation_date": 1, "status": 1 })
                .build(),
        ];

        self.reservations()
            .create_indexes(reservation_indexes)
            .await
            .map_err(|e| AppError::database("crear índices reservations", e))?;

        tracing::info!("Índices MongoDB creados exitosamente");
        Ok(())
    }
}

/// Filtro de reservas que ocupan mesa en una sucursal y fecha.
pub fn reservations_filter(branch_id: BranchId, date: NaiveDate) -> Document {
    let statuses: Vec<&str> = ReservationStatus::OCCUPYING
        .iter()
        .map(|status| status.as_str())
        .collect();

    doc! {
        "branch_id": branch_id,
        "reservation_date": date.format("%Y-%m-%d").to_string(),
        "status": { "$in": statuses },
    }
}

async fn collect_all<T>(mut cursor: Cursor<T>, operation: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let mut results = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| AppError::database(operation, e))?
    {
        let item = cursor
            .deserialize_current()
            .map_err(|e| AppError::database(operation, e))?;
        results.push(item);
    }
    Ok(results)
}

impl AvailabilityRepo for MongoRepo {
    async fn get_branch(&self, branch_id: BranchId) -> AppResult<Option<Branch>> {
        self.branches()
            .find_one(doc! { "id": branch_id })
            .await
            .map_err(|e| AppError::database("buscar sucursal", e))
    }

    async fn get_active_tables(&self, branch_id: BranchId) -> AppResult<Vec<Table>> {
        let cursor = self
            .tables()
            .find(doc! { "branch_id": branch_id, "status": "active" })
            .await
            .map_err(|e| AppError::database("listar mesas", e))?;
        collect_all(cursor, "listar mesas").await
    }

    async fn get_reservations(
        &self,
        branch_id: BranchId,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let cursor = self
            .reservations()
            .find(reservations_filter(branch_id, date))
            .await
            .map_err(|e| AppError::database("listar reservas", e))?;
        collect_all(cursor, "listar reservas").await
    }
}
