//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::DbPayment;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository.
///
/// Amounts live in a `NUMERIC` column, so no precision is lost in storage.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PaymentRepository for PostgresRepo {
    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        // Build the result from the stored row so column rounding is reflected.
        let row: DbPayment = sqlx::query_as(
            r#"INSERT INTO payments (card_number, amount, timestamp) VALUES ($1, $2, $3)
               RETURNING id, card_number, amount, timestamp"#,
        )
        .bind(payment.card_number())
        .bind(payment.amount())
        .bind(payment.timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let payment = row.into_domain();
        tracing::debug!(payment_id = %payment.id, "payment row inserted");

        Ok(payment)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, card_number, amount, timestamp FROM payments WHERE id = $1"#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbPayment::into_domain))
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Vec<Payment>, RepoError> {
        let rows: Vec<DbPayment> = sqlx::query_as(
            r#"SELECT id, card_number, amount, timestamp FROM payments WHERE card_number = $1 ORDER BY id"#,
        )
        .bind(card_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(DbPayment::into_domain).collect())
    }

    async fn delete_by_id(&self, id: PaymentId) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM payments WHERE id = $1"#)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
