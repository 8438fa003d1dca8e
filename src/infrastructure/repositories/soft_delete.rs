use crate::domain::administrators::fields::IS_DELETED;
use crate::domain::documents::{Document, DocumentStore, Filter, Stage, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// The read operations of a collection. Every one of them passes through
/// [`ReadRequest::excluding_deleted`] before it reaches the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadRequest {
    Many(Filter),
    One(Filter),
    Aggregate(Vec<Stage>),
}

impl ReadRequest {
    /// Narrows the request to records whose `isDeleted` is not `true`.
    /// Records that lack the flag stay visible. Aggregations get the
    /// condition as a new first stage, so later stages never see deleted
    /// records.
    pub fn excluding_deleted(self) -> Self {
        let live = Filter::new().ne(IS_DELETED, true);
        match self {
            ReadRequest::Many(filter) => ReadRequest::Many(filter.and(live)),
            ReadRequest::One(filter) => ReadRequest::One(filter.and(live)),
            ReadRequest::Aggregate(mut pipeline) => {
                pipeline.insert(0, Stage::Match(live));
                ReadRequest::Aggregate(pipeline)
            }
        }
    }
}

/// Wraps a [`DocumentStore`] so that soft-deleted records are invisible to
/// every read. Writes pass through untouched, so a deleted record can still
/// be updated and restored.
#[derive(Clone)]
pub struct SoftDeleteStore {
    inner: Arc<dyn DocumentStore>,
}

impl SoftDeleteStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self { inner }
    }

    async fn read(&self, request: ReadRequest) -> Result<Vec<Document>, StoreError> {
        let request = request.excluding_deleted();
        tracing::trace!(?request, "soft-delete filtered read");

        match request {
            ReadRequest::Many(filter) => self.inner.find(filter).await,
            ReadRequest::One(filter) => {
                let found = self.inner.find_one(filter).await?;
                Ok(found.into_iter().collect())
            }
            ReadRequest::Aggregate(pipeline) => self.inner.aggregate(pipeline).await,
        }
    }
}

#[async_trait]
impl DocumentStore for SoftDeleteStore {
    async fn insert(&self, document: Document) -> Result<Document, StoreError> {
        self.inner.insert(document).await
    }

    async fn find(&self, filter: Filter) -> Result<Vec<Document>, StoreError> {
        self.read(ReadRequest::Many(filter)).await
    }

    async fn find_one(&self, filter: Filter) -> Result<Option<Document>, StoreError> {
        Ok(self.read(ReadRequest::One(filter)).await?.into_iter().next())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.inner.update_by_id(id, patch).await
    }

    async fn aggregate(&self, pipeline: Vec<Stage>) -> Result<Vec<Document>, StoreError> {
        self.read(ReadRequest::Aggregate(pipeline)).await
    }
}
