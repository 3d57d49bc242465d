use async_trait::async_trait;
use tracing::info;

use crate::error::AppError;
use crate::models::Notificacion;

/// Delivery boundary for notificaciones. The real transport (email, WhatsApp)
/// lives outside this service; the trait keeps it swappable without touching
/// the handlers.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, notificacion: &Notificacion) -> Result<(), AppError>;
}

/// Logs instead of delivering. The only implementation shipped with the
/// backend; a transport-backed one plugs in through `AppState`.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn deliver(&self, notificacion: &Notificacion) -> Result<(), AppError> {
        info!(
            user_id = %notificacion.user_id,
            tipo = ?notificacion.tipo,
            "notificación lista para entrega: {}",
            notificacion.titulo
        );
        Ok(())
    }
}
