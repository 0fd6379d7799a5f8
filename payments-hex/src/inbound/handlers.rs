//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use payments_types::{
    AcceptPaymentRequest, AppError, Clock, Payment, PaymentDetail, PaymentId, PaymentRepository,
    PaymentResponse,
};

use crate::PaymentService;

pub const PAYMENT_ACCEPTED: &str =
    "Payment processed successfully! Your transaction is now complete.";
pub const PAYMENT_STOPPED: &str = "Payment has been successfully stopped.";
pub const PAYMENT_NOT_STOPPED: &str =
    "Unable to stop payment. Payment cannot be stopped after 15 minutes.";
pub const PAYMENTS_FOUND: &str = "Payments retrieved successfully.";
pub const PAYMENTS_NOT_FOUND: &str = "No payments found for the provided card number.";
pub const ACTIVE_PAYMENTS_FOUND: &str = "Active payments retrieved successfully";

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository, C: Clock> {
    pub service: PaymentService<R, C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(PaymentResponse::<()>::message(message))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Accept a new payment.
#[tracing::instrument(skip(state), fields(card_number = %req.card_number))]
pub async fn accept_payment<R: PaymentRepository, C: Clock>(
    State(state): State<Arc<AppState<R, C>>>,
    Json(req): Json<AcceptPaymentRequest>,
) -> Result<Json<PaymentResponse<Payment>>, ApiError> {
    tracing::info!("Received request to accept payment");
    let payment = state.service.accept_payment(req).await?;
    Ok(Json(PaymentResponse::new(payment, PAYMENT_ACCEPTED)))
}

/// Stop a payment inside its cancellation window.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn stop_payment<R: PaymentRepository, C: Clock>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    tracing::info!("Received request to stop payment");
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| AppError::Validation("Invalid payment ID".into()))?;

    let response = if state.service.stop_payment(payment_id).await? {
        (
            StatusCode::OK,
            Json(PaymentResponse::<()>::message(PAYMENT_STOPPED)),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(PaymentResponse::<()>::message(PAYMENT_NOT_STOPPED)),
        )
    };
    Ok(response.into_response())
}

/// List all payments for a card. No payments is still a 200 with an empty list.
#[tracing::instrument(skip(state))]
pub async fn payments_by_card<R: PaymentRepository, C: Clock>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(card_number): Path<String>,
) -> Result<Json<PaymentResponse<Vec<Payment>>>, ApiError> {
    tracing::info!("Received request to retrieve payments");
    match state.service.get_payments_by_card_number(&card_number).await {
        Ok(payments) => Ok(Json(PaymentResponse::new(payments, PAYMENTS_FOUND))),
        Err(AppError::NotFound(_)) => Ok(Json(PaymentResponse::new(
            Vec::new(),
            PAYMENTS_NOT_FOUND,
        ))),
        Err(e) => Err(e.into()),
    }
}

/// List active payments for a card as detail records.
#[tracing::instrument(skip(state))]
pub async fn active_payments_by_card<R: PaymentRepository, C: Clock>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(card_number): Path<String>,
) -> Result<Response, ApiError> {
    match state
        .service
        .get_active_payments_by_card_number(&card_number)
        .await
    {
        Ok(details) => {
            Ok(Json(PaymentResponse::new(details, ACTIVE_PAYMENTS_FOUND)).into_response())
        }
        Err(AppError::NotFound(msg)) => {
            tracing::warn!(error = %msg, "active payment lookup reported not found");
            let body = PaymentResponse::<Vec<PaymentDetail>>::new(Vec::new(), msg);
            Ok((StatusCode::NOT_FOUND, Json(body)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
