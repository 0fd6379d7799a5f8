//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::{Payment, PaymentId};
use payments_types::dto::{AcceptPaymentRequest, PaymentDetail};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Accept a payment
///
/// The acceptance timestamp is assigned by the service.
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = AcceptPaymentRequest,
    responses(
        (status = 200, description = "Payment accepted", body = inline(serde_json::Value),
            example = json!({"data": {"id": 1, "card_number": "4111111111111111", "amount": "100.00", "timestamp": "2024-03-01T12:00:00Z"}, "message": "Payment processed successfully! Your transaction is now complete."})),
        (status = 400, description = "Amount missing, zero or negative", body = inline(serde_json::Value),
            example = json!({"data": null, "message": "Payment amount must be positive."}))
    )
)]
async fn accept_payment() {}

/// Stop a payment
///
/// Only payments of at most 10,000 accepted less than 15 minutes ago can be stopped.
#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment stopped", body = inline(serde_json::Value),
            example = json!({"data": null, "message": "Payment has been successfully stopped."})),
        (status = 400, description = "Stop rejected by policy", body = inline(serde_json::Value),
            example = json!({"data": null, "message": "Payment cannot be stopped after 15 minutes."})),
        (status = 404, description = "Payment not found", body = inline(serde_json::Value),
            example = json!({"data": null, "message": "Payment with ID 1 not found."}))
    )
)]
async fn stop_payment() {}

/// List payments for a card
#[utoipa::path(
    get,
    path = "/payments/card/{card_number}",
    tag = "payments",
    params(
        ("card_number" = String, Path, description = "Card number")
    ),
    responses(
        (status = 200, description = "Payments for the card, possibly empty", body = inline(serde_json::Value),
            example = json!({"data": [], "message": "No payments found for the provided card number."}))
    )
)]
async fn payments_by_card() {}

/// List active payments for a card
#[utoipa::path(
    get,
    path = "/payments/active/{card_number}",
    tag = "payments",
    params(
        ("card_number" = String, Path, description = "Card number")
    ),
    responses(
        (status = 200, description = "Active payment details, possibly empty", body = inline(serde_json::Value),
            example = json!({"data": [], "message": "Active payments retrieved successfully"})),
        (status = 404, description = "Store reported the card as not found; data is an empty list")
    )
)]
async fn active_payments_by_card() {}

/// OpenAPI documentation for the Payments API.
#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Payment Stop Service API",
        version = "1.0.0",
        description = "Records payments, lets callers stop them within 15 minutes of acceptance (up to 10,000), and lists payments by card number.",
        license(name = "MIT"),
    ),
    paths(
        health,
        accept_payment,
        stop_payment,
        payments_by_card,
        active_payments_by_card,
    ),
    components(
        schemas(
            AcceptPaymentRequest,
            Payment,
            PaymentDetail,
            PaymentId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment acceptance, cancellation and queries"),
    )
)]
pub struct ApiDoc;
