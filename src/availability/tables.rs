use crate::db::Table;

/// Mesas activas con capacidad para el grupo, en el orden recibido.
///
/// Aunque el almacén ya filtra por `status = active`, aquí se vuelve a
/// comprobar. Una lista vacía significa "sin disponibilidad", no un error.
pub fn eligible_tables(tables: &[Table], party_size: u32) -> Vec<&Table> {
    tables.iter().filter(|table| table.fits(party_size)).collect()
}
