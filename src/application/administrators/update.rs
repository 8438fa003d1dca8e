use crate::domain::administrators::{Administrator, AdministratorRepository, UpdateAdministrator};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct UpdateAdministratorUseCase {
    repo: Arc<dyn AdministratorRepository>,
}

impl UpdateAdministratorUseCase {
    pub fn new(repo: Arc<dyn AdministratorRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        id: Uuid,
        update: UpdateAdministrator,
    ) -> Result<Administrator, AppError> {
        self.repo
            .update(id, update)
            .await?
            .ok_or_else(|| AppError::NotFound("Administrator not found".to_string()))
    }
}
