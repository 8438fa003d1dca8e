use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// A stored record as the document store sees it: a JSON object keyed by
/// camelCase field names.
pub type Document = Value;

/// Key under which every document carries its identifier.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Eq(Value),
    Ne(Value),
    In(Vec<Value>),
}

/// One predicate on a (possibly dotted) field path, e.g. `name.firstName`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub path: String,
    pub comparison: Comparison,
}

/// A conjunction of conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(path, Comparison::Eq(value.into()))
    }

    pub fn ne(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(path, Comparison::Ne(value.into()))
    }

    pub fn one_of<V: Into<Value>>(
        self,
        path: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.with(path, Comparison::In(values))
    }

    /// Conjoins every condition of `other` onto this filter.
    pub fn and(mut self, other: Filter) -> Self {
        self.conditions.extend(other.conditions);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn with(mut self, path: impl Into<String>, comparison: Comparison) -> Self {
        self.conditions.push(Condition {
            path: path.into(),
            comparison,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub path: String,
    pub order: SortOrder,
}

/// One stage of an aggregation pipeline. Stages run in order, each consuming
/// the documents produced by the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Match(Filter),
    Sort(Vec<SortKey>),
    Skip(usize),
    Limit(usize),
    /// Keeps only the listed paths (and `id`).
    Project(Vec<String>),
    /// Replaces the stream with a single `{ <field>: <count> }` document.
    Count(String),
}

impl Stage {
    pub fn sort_by(path: impl Into<String>, order: SortOrder) -> Self {
        Stage::Sort(vec![SortKey {
            path: path.into(),
            order,
        }])
    }

    pub fn count(field: impl Into<String>) -> Self {
        Stage::Count(field.into())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate value for unique field `{field}`")]
    DuplicateKey { field: String },
    #[error("document has no valid `id`")]
    MissingId,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The storage-engine boundary. Implementations provide durable storage,
/// uniqueness per declared field and atomic single-document writes. They do
/// no soft-delete filtering of their own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, document: Document) -> Result<Document, StoreError>;
    async fn find(&self, filter: Filter) -> Result<Vec<Document>, StoreError>;
    async fn find_one(&self, filter: Filter) -> Result<Option<Document>, StoreError>;
    /// Deep-merges `patch` into the document with the given id.
    async fn update_by_id(
        &self,
        id: Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StoreError>;
    async fn aggregate(&self, pipeline: Vec<Stage>) -> Result<Vec<Document>, StoreError>;
}
