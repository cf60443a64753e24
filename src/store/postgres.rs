use anyhow::{Context, Result};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool};

use crate::store::traits::{document_id, Document, DocumentStore, Filter, StoreError, UpsertOutcome};

/// Document store over a single JSONB table keyed by (collection, id)
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the document table if it does not exist yet
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS seed_documents (
                seq BIGSERIAL,
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body JSONB NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create seed_documents table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS seed_documents_body_idx ON seed_documents USING GIN (body jsonb_path_ops)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create seed_documents body index")?;

        Ok(())
    }
}

async fn insert_row(
    conn: &mut PgConnection,
    collection: &str,
    document: Document,
) -> Result<(), StoreError> {
    let id = document_id(&document)?.to_string();

    let result = sqlx::query("INSERT INTO seed_documents (collection, id, body) VALUES ($1, $2, $3)")
        .bind(collection)
        .bind(&id)
        .bind(Value::Object(document))
        .execute(conn)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(StoreError::Duplicate {
            collection: collection.to_string(),
            id,
        }),
        Err(err) => Err(StoreError::Backend(err)),
    }
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let bodies: Vec<Value> = sqlx::query_scalar(
            "SELECT body FROM seed_documents WHERE collection = $1 AND body @> $2 ORDER BY seq",
        )
        .bind(collection)
        .bind(filter.to_json())
        .fetch_all(&self.pool)
        .await?;

        bodies
            .into_iter()
            .map(|body| match body {
                Value::Object(map) => Ok(map),
                other => Err(StoreError::InvalidDocument(format!(
                    "stored body in '{}' is not an object: {}",
                    collection, other
                ))),
            })
            .collect()
    }

    async fn upsert_if_absent(
        &self,
        collection: &str,
        filter: &Filter,
        document: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        let filter_json = filter.to_json();
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent upserts on the same natural key until commit
        let lock_key = format!("{}:{}", collection, filter_json);
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&lock_key)
            .execute(&mut *tx)
            .await?;

        let existing: Option<String> = sqlx::query_scalar(
            "SELECT id FROM seed_documents WHERE collection = $1 AND body @> $2 ORDER BY seq LIMIT 1",
        )
        .bind(collection)
        .bind(&filter_json)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(id) = existing {
            tx.commit().await?;
            return Ok(UpsertOutcome { id, inserted: false });
        }

        let id = document_id(&document)?.to_string();
        insert_row(&mut *tx, collection, document).await?;
        tx.commit().await?;

        Ok(UpsertOutcome { id, inserted: true })
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        insert_row(&mut *conn, collection, document).await
    }
}
