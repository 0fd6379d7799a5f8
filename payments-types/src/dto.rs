//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Payment, PaymentId};

// ─────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to accept a new payment.
///
/// There is no timestamp field: the acceptance instant is always set by
/// the service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AcceptPaymentRequest {
    /// Reference of the paying instrument
    #[schema(example = "4111111111111111")]
    pub card_number: String,
    /// Amount to record. JSON numbers are read from their literal text, so
    /// no digits are lost to a float conversion.
    #[serde(
        default,
        deserialize_with = "rust_decimal::serde::arbitrary_precision_option::deserialize"
    )]
    #[schema(value_type = Option<String>, example = "100.00")]
    pub amount: Option<Decimal>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Reduced view of a payment returned by the active-payments query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentDetail {
    pub id: PaymentId,
    #[schema(example = "4111111111111111")]
    pub card_number: String,
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<Payment> for PaymentDetail {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            card_number: payment.card_number,
            amount: payment.amount,
            timestamp: payment.timestamp,
        }
    }
}

/// Envelope wrapping every payment API response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse<T> {
    /// Payload, absent for pure status responses and errors
    pub data: Option<T>,
    /// Human-readable status message
    #[schema(example = "Payments retrieved successfully.")]
    pub message: String,
}

impl<T> PaymentResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
        }
    }

    /// Envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
        }
    }
}
