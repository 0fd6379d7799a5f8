//! Database row types for the SQL adapters.

use sqlx::FromRow;

use payments_types::{Payment, PaymentId};
#[cfg(feature = "sqlite")]
use payments_types::RepoError;

/// Payment row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct DbPayment {
    pub id: i64,
    pub card_number: String,
    pub amount: rust_decimal::Decimal,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "postgres")]
impl DbPayment {
    pub fn into_domain(self) -> Payment {
        Payment::from_parts(
            PaymentId::from_i64(self.id),
            self.card_number,
            self.amount,
            self.timestamp,
        )
    }
}

/// Payment row from SQLite.
///
/// SQLite has no decimal or timestamp type, so the amount is kept as its
/// exact decimal text and the timestamp as RFC 3339 text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct DbSqlitePayment {
    pub id: i64,
    pub card_number: String,
    pub amount: String,
    pub timestamp: String,
}

#[cfg(feature = "sqlite")]
impl DbSqlitePayment {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let amount = self
            .amount
            .parse::<rust_decimal::Decimal>()
            .map_err(|e| RepoError::Corrupt(format!("payment {} amount: {}", self.id, e)))?;

        let timestamp = chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| RepoError::Corrupt(format!("payment {} timestamp: {}", self.id, e)))?
            .with_timezone(&chrono::Utc);

        Ok(Payment::from_parts(
            PaymentId::from_i64(self.id),
            self.card_number,
            amount,
            timestamp,
        ))
    }
}
