use crate::domain::documents::{Document, DocumentStore, Filter, ID_FIELD, Stage, StoreError};
use crate::infrastructure::store::evaluate::{lookup, matches, merge, run_pipeline};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A document store kept in process memory, in insertion order. Writes are
/// serialized by the lock, which also makes each of them atomic.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<Vec<Document>>>,
    unique_fields: Arc<Vec<String>>,
}

impl InMemoryDocumentStore {
    pub fn new<I, S>(unique_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: Arc::default(),
            unique_fields: Arc::new(unique_fields.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of stored documents, soft-deleted ones included.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn id_of(document: &Document) -> Option<&str> {
        document.get(ID_FIELD).and_then(|id| id.as_str())
    }

    /// Fails when `candidate` shares a unique value (or its id) with any stored
    /// document other than the one at `skip`.
    fn check_unique(
        &self,
        documents: &[Document],
        candidate: &Document,
        skip: Option<usize>,
    ) -> Result<(), StoreError> {
        let others = documents
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != skip)
            .map(|(_, d)| d);

        for other in others {
            if Self::id_of(other) == Self::id_of(candidate) {
                return Err(StoreError::DuplicateKey {
                    field: ID_FIELD.to_string(),
                });
            }
            for field in self.unique_fields.iter() {
                if let Some(value) = lookup(candidate, field)
                    && lookup(other, field) == Some(value)
                {
                    return Err(StoreError::DuplicateKey {
                        field: field.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[tracing::instrument(skip(self, document))]
    async fn insert(&self, document: Document) -> Result<Document, StoreError> {
        if Self::id_of(&document).is_none() {
            return Err(StoreError::MissingId);
        }

        let mut documents = self.documents.write().await;
        self.check_unique(&documents, &document, None)?;
        documents.push(document.clone());

        Ok(document)
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| matches(d, &filter))
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_one(&self, filter: Filter) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| matches(d, &filter)).cloned())
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_by_id(
        &self,
        id: Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let id = id.to_string();
        let mut documents = self.documents.write().await;

        let Some(index) = documents
            .iter()
            .position(|d| Self::id_of(d) == Some(id.as_str()))
        else {
            return Ok(None);
        };

        let mut updated = documents[index].clone();
        merge(&mut updated, patch);
        self.check_unique(&documents, &updated, Some(index))?;
        documents[index] = updated.clone();

        Ok(Some(updated))
    }

    #[tracing::instrument(skip(self))]
    async fn aggregate(&self, pipeline: Vec<Stage>) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.read().await.clone();
        Ok(run_pipeline(documents, &pipeline))
    }
}
