//! Transactional destinations for parameterized INSERTs.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{Result, SqlError};
use crate::statement::InsertStatement;
use crate::value::SqlValue;

/// A database that accepts batches inside one transaction.
///
/// Callers drive `begin → insert* → commit`, and call `rollback` on any
/// failure. Nothing inserted is visible to others before `commit`.
#[async_trait]
pub trait BatchSink: Send {
    async fn begin(&mut self) -> Result<()>;

    /// Executes one statement, returning the number of rows inserted.
    async fn insert(&mut self, statement: &InsertStatement) -> Result<u64>;

    async fn commit(&mut self) -> Result<()>;

    async fn rollback(&mut self) -> Result<()>;
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Uuid(id) => query.bind(*id),
        SqlValue::Text(text) => query.bind(text.clone()),
        SqlValue::Float(v) => query.bind(*v),
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::Bool(v) => query.bind(*v),
        SqlValue::Json(json) => query.bind(json.clone().map(Json)),
        SqlValue::Timestamp(at) => query.bind(*at),
    }
}

/// PostgreSQL sink holding a single connection for the whole run.
pub struct PostgresSink {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PostgresSink {
    /// Connects with a pool capped at one connection.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        tracing::debug!("database connection established");
        Ok(Self { pool, tx: None })
    }

    /// Releases the connection. An open transaction is rolled back.
    pub async fn close(mut self) {
        if let Some(tx) = self.tx.take() {
            if let Err(error) = tx.rollback().await {
                tracing::warn!(%error, "rollback on close failed");
            }
        }
        self.pool.close().await;
    }
}

#[async_trait]
impl BatchSink for PostgresSink {
    async fn begin(&mut self) -> Result<()> {
        if self.tx.is_some() {
            return Err(SqlError::TransactionActive);
        }
        self.tx = Some(self.pool.begin().await?);
        Ok(())
    }

    async fn insert(&mut self, statement: &InsertStatement) -> Result<u64> {
        let tx = self.tx.as_mut().ok_or(SqlError::NoTransaction)?;
        let mut query = sqlx::query(&statement.sql);
        for value in &statement.params {
            query = bind_value(query, value);
        }
        let result = query.execute(&mut **tx).await?;
        Ok(result.rows_affected())
    }

    async fn commit(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or(SqlError::NoTransaction)?;
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or(SqlError::NoTransaction)?;
        tx.rollback().await?;
        Ok(())
    }
}
