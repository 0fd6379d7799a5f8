//! Payment domain model and cancellation policy.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Payments above this amount can never be stopped automatically.
pub const STOP_AMOUNT_LIMIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Length of the cancellation window after acceptance, in minutes.
pub const STOP_WINDOW_MINUTES: i64 = 15;

/// Returns the cancellation window as a duration.
pub fn stop_window() -> TimeDelta {
    TimeDelta::minutes(STOP_WINDOW_MINUTES)
}

/// Sub-second digits kept on the acceptance instant. Matches the microsecond
/// resolution of SQL timestamp columns.
const TIMESTAMP_PRECISION: u16 = 6;

/// Store-assigned identifier for a Payment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PaymentId(i64);

impl PaymentId {
    /// Wraps a raw store identifier.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A payment that passed acceptance but has not been persisted yet.
///
/// The only way to build one is [`NewPayment::accept`], so every payment that
/// reaches the store has a positive amount and a service-assigned timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    card_number: String,
    amount: Decimal,
    timestamp: DateTime<Utc>,
}

impl NewPayment {
    /// Validates a candidate payment and stamps it with the acceptance instant.
    ///
    /// # Validation
    /// - Amount must be present and strictly greater than zero
    ///
    /// The instant is truncated to microseconds so the returned entity equals
    /// what any backend later reads back.
    pub fn accept(
        card_number: String,
        amount: Option<Decimal>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let amount = match amount {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => return Err(DomainError::NonPositiveAmount),
        };

        Ok(Self {
            card_number,
            amount,
            timestamp: now.trunc_subsecs(TIMESTAMP_PRECISION),
        })
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Attaches the store-assigned identifier.
    pub fn into_payment(self, id: PaymentId) -> Payment {
        Payment {
            id,
            card_number: self.card_number,
            amount: self.amount,
            timestamp: self.timestamp,
        }
    }
}

/// A recorded payment request.
///
/// A payment is active for as long as it exists in the store; stopping it
/// deletes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    /// Store-assigned identifier
    pub id: PaymentId,
    /// Opaque reference to the paying instrument
    #[schema(example = "4111111111111111")]
    pub card_number: String,
    /// Exact decimal amount
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    /// When the payment was accepted
    pub timestamp: DateTime<Utc>,
}

impl Payment {
    /// Reconstructs a payment from stored fields.
    pub fn from_parts(
        id: PaymentId,
        card_number: String,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            card_number,
            amount,
            timestamp,
        }
    }

    /// The oldest acceptance instant that is still inside the window at `now`.
    pub fn stop_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
        now - stop_window()
    }

    /// Checks whether this payment may be stopped at `now`.
    ///
    /// The amount guard runs before the window guard, so an old high-value
    /// payment reports the amount violation. The window is exclusive at the
    /// cutoff: a payment accepted exactly 15 minutes ago cannot be stopped.
    pub fn ensure_stoppable(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.amount > STOP_AMOUNT_LIMIT {
            return Err(DomainError::StopLimitExceeded);
        }

        if Self::stop_cutoff(now) < self.timestamp {
            Ok(())
        } else {
            Err(DomainError::StopWindowElapsed)
        }
    }
}
