//! Payment Application Service
//!
//! Orchestrates the payment policy through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use payments_types::{
    AcceptPaymentRequest, AppError, Clock, DomainError, NewPayment, Payment, PaymentDetail,
    PaymentId, PaymentRepository, SystemClock,
};

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` and `C: Clock` - both are injected at
/// compile time. This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo
/// - Pinning the current instant in tests of the stop window
pub struct PaymentService<R: PaymentRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service reading time from the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: PaymentRepository, C: Clock> PaymentService<R, C> {
    /// Creates a new payment service with an explicit time source.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Acceptance
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates a payment, stamps it with the current instant and stores it.
    pub async fn accept_payment(&self, req: AcceptPaymentRequest) -> Result<Payment, AppError> {
        tracing::debug!(card_number = %req.card_number, "accepting payment");

        let new_payment = NewPayment::accept(req.card_number, req.amount, self.clock.now())?;
        let payment = self.repo.insert(new_payment).await?;

        tracing::info!(payment_id = %payment.id, amount = %payment.amount, "payment accepted");
        Ok(payment)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Cancellation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stops (deletes) a payment that is still inside the cancellation window.
    ///
    /// Returns `true` once the payment has been removed. Policy rejections are
    /// `AppError::Validation`; an unknown id is `AppError::NotFound`.
    pub async fn stop_payment(&self, id: PaymentId) -> Result<bool, AppError> {
        tracing::debug!(payment_id = %id, "stopping payment");

        let payment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PaymentNotFound(id))?;

        let now = self.clock.now();
        if let Err(e) = payment.ensure_stoppable(now) {
            tracing::info!(payment_id = %id, reason = %e, "stop rejected");
            return Err(e.into());
        }

        // A concurrent stop may have removed the row already. The payment is
        // gone either way.
        let deleted = self.repo.delete_by_id(id).await?;
        if !deleted {
            tracing::warn!(payment_id = %id, "payment already removed by a concurrent stop");
        }

        tracing::info!(payment_id = %id, "payment stopped");
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists every stored payment for a card. No payments is a not-found error.
    pub async fn get_payments_by_card_number(
        &self,
        card_number: &str,
    ) -> Result<Vec<Payment>, AppError> {
        tracing::debug!(card_number, "retrieving payments");

        let payments = self.repo.find_by_card_number(card_number).await?;
        if payments.is_empty() {
            return Err(DomainError::NoPaymentsForCard(card_number.to_string()).into());
        }

        Ok(payments)
    }

    /// Lists active payments for a card as detail records.
    ///
    /// Stopped payments are deleted, so every stored payment is active. Unlike
    /// [`Self::get_payments_by_card_number`], no matches is an empty list. A
    /// store-reported not-found is returned as `AppError::NotFound` so the HTTP
    /// layer can answer with an empty list and a 404 status.
    pub async fn get_active_payments_by_card_number(
        &self,
        card_number: &str,
    ) -> Result<Vec<PaymentDetail>, AppError> {
        tracing::debug!(card_number, "retrieving active payments");

        let payments = self.repo.find_by_card_number(card_number).await?;

        Ok(payments.into_iter().map(PaymentDetail::from).collect())
    }
}
