//! # Payments Types
//!
//! Domain types, the cancellation policy and port traits for the payment
//! stop service. This crate has ZERO external IO dependencies - only data
//! structures, business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Payment, NewPayment, PaymentId) and the stop policy
//! - `ports/` - Trait definitions that adapters must implement (store, clock)
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{NewPayment, Payment, PaymentId, STOP_AMOUNT_LIMIT, STOP_WINDOW_MINUTES};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{Clock, FixedClock, PaymentRepository, SystemClock};
