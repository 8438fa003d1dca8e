use crate::domain::documents::{
    Comparison, Document, DocumentStore, Filter, ID_FIELD, Stage, StoreError,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::store::evaluate::run_pipeline;
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// A unique expression index and the document path it covers.
#[derive(Debug, Clone, Copy)]
pub struct UniqueIndex {
    pub name: &'static str,
    pub path: &'static str,
}

/// A collection stored as one JSONB `document` column per row. The table is
/// created by the migrations; `seq` keeps insertion order.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: DbPool,
    table: &'static str,
    unique_indexes: &'static [UniqueIndex],
}

impl PostgresDocumentStore {
    pub fn new(pool: DbPool, table: &'static str, unique_indexes: &'static [UniqueIndex]) -> Self {
        Self {
            pool,
            table,
            unique_indexes,
        }
    }

    fn select(&self) -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new(format!("SELECT document FROM {}", self.table))
    }

    fn map_write_error(&self, err: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
            && let Some(index) = db_err
                .constraint()
                .and_then(|c| self.unique_indexes.iter().find(|i| i.name == c))
        {
            tracing::debug!(index = index.name, "unique index violated");
            return StoreError::DuplicateKey {
                field: index.path.to_string(),
            };
        }
        StoreError::Database(err)
    }

    async fn fetch_all(
        &self,
        mut query: QueryBuilder<'static, Postgres>,
    ) -> Result<Vec<Document>, StoreError> {
        let documents: Vec<Document> = query
            .build_query_scalar::<Document>()
            .fetch(&self.pool)
            .try_collect()
            .await?;
        Ok(documents)
    }
}

fn path_segments(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

/// Appends `WHERE ...` for `filter`. Paths are addressed with `#>`, so a
/// missing field reads as SQL NULL and `IS DISTINCT FROM` treats it as unequal.
fn push_filter(query: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    for (i, condition) in filter.conditions().iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });
        let path = path_segments(&condition.path);
        match &condition.comparison {
            Comparison::Eq(value) => {
                query.push("document #> ");
                query.push_bind(path);
                query.push(" = ");
                query.push_bind(value.clone());
            }
            Comparison::Ne(value) => {
                query.push("document #> ");
                query.push_bind(path);
                query.push(" IS DISTINCT FROM ");
                query.push_bind(value.clone());
            }
            Comparison::In(values) if values.is_empty() => {
                query.push("FALSE");
            }
            Comparison::In(values) => {
                query.push("(");
                for (j, value) in values.iter().enumerate() {
                    if j > 0 {
                        query.push(" OR ");
                    }
                    query.push("document #> ");
                    query.push_bind(path.clone());
                    query.push(" = ");
                    query.push_bind(value.clone());
                }
                query.push(")");
            }
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[tracing::instrument(skip(self, document))]
    async fn insert(&self, document: Document) -> Result<Document, StoreError> {
        let id = document
            .get(ID_FIELD)
            .and_then(|id| id.as_str())
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or(StoreError::MissingId)?;

        let sql = format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2) RETURNING document",
            self.table
        );
        sqlx::query_scalar::<_, Document>(&sql)
            .bind(id)
            .bind(document)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.map_write_error(e))
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let mut query = self.select();
        push_filter(&mut query, &filter);
        query.push(" ORDER BY seq");
        self.fetch_all(query).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_one(&self, filter: Filter) -> Result<Option<Document>, StoreError> {
        let mut query = self.select();
        push_filter(&mut query, &filter);
        query.push(" ORDER BY seq LIMIT 1");
        let document = query
            .build_query_scalar::<Document>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(document)
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_by_id(
        &self,
        id: Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "UPDATE {} SET document = jsonb_deep_merge(document, $1) WHERE id = $2 RETURNING document",
            self.table
        );
        sqlx::query_scalar::<_, Document>(&sql)
            .bind(patch)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.map_write_error(e))
    }

    /// Leading `Match` stages run in SQL; the remaining stages run in process
    /// over the matched documents, in insertion order.
    #[tracing::instrument(skip(self))]
    async fn aggregate(&self, pipeline: Vec<Stage>) -> Result<Vec<Document>, StoreError> {
        let pushed = pipeline
            .iter()
            .take_while(|stage| matches!(stage, Stage::Match(_)))
            .count();

        let filter = pipeline[..pushed]
            .iter()
            .fold(Filter::new(), |acc, stage| match stage {
                Stage::Match(filter) => acc.and(filter.clone()),
                _ => acc,
            });

        let mut query = self.select();
        push_filter(&mut query, &filter);
        query.push(" ORDER BY seq");
        let documents = self.fetch_all(query).await?;

        Ok(run_pipeline(documents, &pipeline[pushed..]))
    }
}
