use crate::domain::administrators::{Administrator, AdministratorRepository};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Flips the soft-delete flag. `true` hides the administrator from every
/// read, `false` restores it.
pub struct SoftDeleteAdministratorUseCase {
    repo: Arc<dyn AdministratorRepository>,
}

impl SoftDeleteAdministratorUseCase {
    pub fn new(repo: Arc<dyn AdministratorRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid, deleted: bool) -> Result<Administrator, AppError> {
        let admin = self
            .repo
            .set_deleted(id, deleted)
            .await?
            .ok_or_else(|| AppError::NotFound("Administrator not found".to_string()))?;

        tracing::info!(id = %admin.id, deleted, "administrator soft-delete flag changed");
        Ok(admin)
    }
}
