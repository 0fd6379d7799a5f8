//! Error types for the payment service.
//!
//! Messages of [`DomainError`] are part of the public contract and reach
//! callers verbatim.

use crate::domain::PaymentId;

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Payment amount must be positive.")]
    NonPositiveAmount,

    #[error(
        "Payments over $10,000 cannot be stopped automatically. Please contact customer service."
    )]
    StopLimitExceeded,

    #[error("Payment cannot be stopped after 15 minutes.")]
    StopWindowElapsed,

    #[error("Payment with ID {0} not found.")]
    PaymentNotFound(PaymentId),

    #[error("No payments found for card number: {0}")]
    NoPaymentsForCard(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. `Validation` and `NotFound` are never
/// merged: the first is a rule rejection, the second an absent resource.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NonPositiveAmount
            | DomainError::StopLimitExceeded
            | DomainError::StopWindowElapsed => AppError::Validation(err.to_string()),
            DomainError::PaymentNotFound(_) | DomainError::NoPaymentsForCard(_) => {
                AppError::NotFound(err.to_string())
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Corrupt(e) => AppError::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_map_to_validation() {
        let err: AppError = DomainError::StopWindowElapsed.into();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "Payment cannot be stopped after 15 minutes.")
        );
    }

    #[test]
    fn test_missing_payment_maps_to_not_found() {
        let err: AppError = DomainError::PaymentNotFound(PaymentId::from_i64(9)).into();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Payment with ID 9 not found."));
    }

    #[test]
    fn test_card_message() {
        let err = DomainError::NoPaymentsForCard("4111".into());
        assert_eq!(err.to_string(), "No payments found for card number: 4111");
    }

    #[test]
    fn test_database_error_is_internal() {
        let err: AppError = RepoError::Database("disk full".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
