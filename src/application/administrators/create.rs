use crate::domain::administrators::{Administrator, AdministratorRepository, NewAdministrator};
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct CreateAdministratorUseCase {
    repo: Arc<dyn AdministratorRepository>,
}

impl CreateAdministratorUseCase {
    pub fn new(repo: Arc<dyn AdministratorRepository>) -> Self {
        Self { repo }
    }

    /// Duplicate emails surface from the store's unique index, after the
    /// candidate has passed validation.
    pub async fn execute(&self, candidate: NewAdministrator) -> Result<Administrator, AppError> {
        let admin = self.repo.create(candidate).await?;
        tracing::info!(id = %admin.id, "administrator registered");
        Ok(admin)
    }
}
