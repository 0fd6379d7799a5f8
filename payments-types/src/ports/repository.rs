//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use crate::domain::{NewPayment, Payment, PaymentId};
use crate::error::RepoError;

/// The payment store.
///
/// Every method is a single atomic unit at the persistence layer. Nothing
/// spans more than one call.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Persists an accepted payment and assigns its identifier.
    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError>;

    /// Gets a payment by ID.
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Lists every stored payment for a card, in store order. Empty if none.
    async fn find_by_card_number(&self, card_number: &str) -> Result<Vec<Payment>, RepoError>;

    /// Removes a payment. Returns `false` when nothing was deleted.
    async fn delete_by_id(&self, id: PaymentId) -> Result<bool, RepoError>;
}
