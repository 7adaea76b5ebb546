//! # Utilidades de logging para errores
//!
//! Registra la cadena completa de `source()` de un error junto a un contexto.

use std::error::Error as StdError;

/// Recorre la cadena de errores de más externo a más interno
fn error_chain<E>(error: &E) -> Vec<String>
where
    E: StdError + 'static,
{
    let mut chain = Vec::new();
    let mut current: Option<&dyn StdError> = Some(error);

    while let Some(err) = current {
        chain.push(err.to_string());
        current = err.source();
    }
    chain
}

/// Registra la cadena completa de errores
///
/// # Parámetros
/// - `error`: Error a analizar y registrar
/// - `context`: Contexto opcional para añadir información
pub fn log_error_chain<E>(error: &E, context: Option<&str>)
where
    E: StdError + 'static,
{
    let chain = error_chain(error);

    if let Some(ctx) = context {
        tracing::error!(
            context = %ctx,
            error_chain = ?chain,
            "Error with full chain (with context)"
        );
    } else {
        tracing::error!(error_chain = ?chain, "Error with full chain");
    }
}

/// Extension trait para Results que añade logging automático de error chains
///
/// # Ejemplo de uso
/// ```ignore
/// load_available_times(&repo, branch_id, date, guests, now, &policy)
///     .await
///     .log_error_context("calculando disponibilidad")?;
/// ```
pub trait ErrorLogExt<T, E> {
    /// Loggea la cadena de errores con contexto adicional
    fn log_error_context(self, context: &str) -> Result<T, E>;
}

impl<T, E> ErrorLogExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    fn log_error_context(self, context: &str) -> Result<T, E> {
        if let Err(ref error) = self {
            log_error_chain(error, Some(context));
        }
        self
    }
}
