//! # Payments Hex
//!
//! Payment policy service and HTTP adapter for the payments service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (acceptance, stop window, card queries)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: PaymentRepository` and `C: Clock`,
//! allowing different stores and time sources to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::PaymentService;
