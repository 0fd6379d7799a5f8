//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::DbSqlitePayment;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

const MIGRATIONS: [&str; 2] = [
    include_str!("../migrations/0001_create_payments.sql"),
    include_str!("../migrations/0002_index_card_number.sql"),
];

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `:memory:` opens its own empty database, so
        // in-memory stores are pinned to one long-lived connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (idempotent).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        for ddl in MIGRATIONS {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let result = sqlx::query(
            r#"INSERT INTO payments (card_number, amount, timestamp) VALUES (?, ?, ?)"#,
        )
        .bind(payment.card_number())
        .bind(payment.amount().to_string())
        .bind(payment.timestamp().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = PaymentId::from_i64(result.last_insert_rowid());
        tracing::debug!(payment_id = %id, "payment row inserted");

        Ok(payment.into_payment(id))
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbSqlitePayment> = sqlx::query_as(
            r#"SELECT id, card_number, amount, timestamp FROM payments WHERE id = ?"#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbSqlitePayment::into_domain).transpose()
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Vec<Payment>, RepoError> {
        let rows: Vec<DbSqlitePayment> = sqlx::query_as(
            r#"SELECT id, card_number, amount, timestamp FROM payments WHERE card_number = ? ORDER BY id"#,
        )
        .bind(card_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbSqlitePayment::into_domain).collect()
    }

    async fn delete_by_id(&self, id: PaymentId) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM payments WHERE id = ?"#)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
