//! In-memory repository adapter.
//!
//! Backed by a `DashMap`, so each call is atomic per record. Used for local
//! runs (`DATABASE_URL=memory://`) and for HTTP tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, RepoError};

/// In-memory payment store with a monotonically increasing id sequence.
pub struct InMemoryRepo {
    payments: DashMap<PaymentId, Payment>,
    next_id: AtomicI64,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            payments: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored payments.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepo {
    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let id = PaymentId::from_i64(self.next_id.fetch_add(1, Ordering::Relaxed));
        let payment = payment.into_payment(id);
        self.payments.insert(id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        Ok(self.payments.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Vec<Payment>, RepoError> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|entry| entry.card_number == card_number)
            .map(|entry| entry.value().clone())
            .collect();
        payments.sort_by_key(|p| p.id);
        Ok(payments)
    }

    async fn delete_by_id(&self, id: PaymentId) -> Result<bool, RepoError> {
        Ok(self.payments.remove(&id).is_some())
    }
}
