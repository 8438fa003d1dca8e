use crate::domain::administrators::{
    Administrator, AdministratorRepository, NewAdministrator, UNIQUE_FIELDS, UpdateAdministrator,
    fields,
};
use crate::domain::documents::{Document, DocumentStore, Filter, Stage};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::soft_delete::SoftDeleteStore;
use crate::infrastructure::store::memory::InMemoryDocumentStore;
use crate::infrastructure::store::postgres::{PostgresDocumentStore, UniqueIndex};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub const ADMINISTRATORS_TABLE: &str = "administrators";

/// Unique indexes created by the migrations, mapped back to the field they guard.
pub static ADMINISTRATOR_INDEXES: [UniqueIndex; 3] = [
    UniqueIndex {
        name: "administrators_pkey",
        path: fields::ID,
    },
    UniqueIndex {
        name: "administrators_email_key",
        path: fields::EMAIL,
    },
    UniqueIndex {
        name: "administrators_user_ref_key",
        path: fields::USER_REF,
    },
];

/// The administrator collection on top of any [`DocumentStore`] engine.
/// Reads go through [`SoftDeleteStore`], so soft-deleted administrators are
/// never returned.
#[derive(Clone)]
pub struct DocumentAdministratorRepository {
    store: SoftDeleteStore,
}

impl DocumentAdministratorRepository {
    pub fn new(engine: Arc<dyn DocumentStore>) -> Self {
        Self {
            store: SoftDeleteStore::new(engine),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDocumentStore::new(UNIQUE_FIELDS)))
    }

    pub fn postgres(pool: DbPool) -> Self {
        Self::new(Arc::new(PostgresDocumentStore::new(
            pool,
            ADMINISTRATORS_TABLE,
            &ADMINISTRATOR_INDEXES,
        )))
    }

    fn decode(document: Document) -> Result<Administrator, AppError> {
        Ok(serde_json::from_value(document)?)
    }

    fn decode_all(documents: Vec<Document>) -> Result<Vec<Administrator>, AppError> {
        documents.into_iter().map(Self::decode).collect()
    }
}

#[async_trait]
impl AdministratorRepository for DocumentAdministratorRepository {
    #[tracing::instrument(skip(self, candidate))]
    async fn create(&self, candidate: NewAdministrator) -> Result<Administrator, AppError> {
        let admin = candidate.validated()?;
        let stored = self.store.insert(serde_json::to_value(&admin)?).await?;
        tracing::debug!(id = %admin.id, "administrator created");
        Self::decode(stored)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(
        &self,
        id: Uuid,
        update: UpdateAdministrator,
    ) -> Result<Option<Administrator>, AppError> {
        let patch = serde_json::to_value(update.validated()?)?;
        self.store
            .update_by_id(id, patch)
            .await?
            .map(Self::decode)
            .transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_many(&self, filter: Filter) -> Result<Vec<Administrator>, AppError> {
        Self::decode_all(self.store.find(filter).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_one(&self, filter: Filter) -> Result<Option<Administrator>, AppError> {
        self.store.find_one(filter).await?.map(Self::decode).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn aggregate(&self, pipeline: Vec<Stage>) -> Result<Vec<Document>, AppError> {
        Ok(self.store.aggregate(pipeline).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<Option<Administrator>, AppError> {
        self.find_one(Filter::new().eq(fields::EMAIL, email)).await
    }

    #[tracing::instrument(skip(self))]
    async fn exists_by_id(&self, id: Uuid) -> Result<Option<Administrator>, AppError> {
        self.find_one(Filter::new().eq(fields::ID, id.to_string())).await
    }

    #[tracing::instrument(skip(self))]
    async fn set_deleted(
        &self,
        id: Uuid,
        deleted: bool,
    ) -> Result<Option<Administrator>, AppError> {
        self.store
            .update_by_id(id, json!({ (fields::IS_DELETED): deleted }))
            .await?
            .map(Self::decode)
            .transpose()
    }
}
