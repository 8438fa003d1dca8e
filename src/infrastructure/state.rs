use crate::domain::administrators::AdministratorRepository;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::administrators::DocumentAdministratorRepository;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub administrators: Arc<dyn AdministratorRepository>,
    /// Present when administrators live in Postgres; used by the health check.
    pub pool: Option<DbPool>,
}

impl AppState {
    pub fn new(administrators: Arc<dyn AdministratorRepository>, pool: Option<DbPool>) -> Self {
        Self {
            administrators,
            pool,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(DocumentAdministratorRepository::in_memory()), None)
    }

    pub fn postgres(pool: DbPool) -> Self {
        Self::new(
            Arc::new(DocumentAdministratorRepository::postgres(pool.clone())),
            Some(pool),
        )
    }
}
