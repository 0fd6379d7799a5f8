//! # Payments Client SDK
//!
//! A typed Rust client for the Payments API.

use payments_types::{AcceptPaymentRequest, Payment, PaymentDetail, PaymentId, PaymentResponse};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response envelope had no data: {0}")]
    MissingData(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Records a new payment. The server assigns id and timestamp.
    pub async fn accept_payment(
        &self,
        card_number: &str,
        amount: Decimal,
    ) -> Result<Payment, ClientError> {
        let req = AcceptPaymentRequest {
            card_number: card_number.to_string(),
            amount: Some(amount),
        };
        let resp = self
            .http
            .post(format!("{}/payments", self.base_url))
            .json(&req)
            .send()
            .await?;
        let envelope: PaymentResponse<Payment> = self.handle_response(resp).await?;
        envelope
            .data
            .ok_or(ClientError::MissingData(envelope.message))
    }

    /// Stops a payment. Returns the server's status message.
    pub async fn stop_payment(&self, id: PaymentId) -> Result<String, ClientError> {
        let resp = self
            .http
            .delete(format!("{}/payments/{}", self.base_url, id))
            .send()
            .await?;
        let envelope: PaymentResponse<serde_json::Value> = self.handle_response(resp).await?;
        Ok(envelope.message)
    }

    /// Lists all payments for a card. Unknown cards yield an empty list.
    pub async fn payments_by_card(&self, card_number: &str) -> Result<Vec<Payment>, ClientError> {
        let envelope: PaymentResponse<Vec<Payment>> =
            self.get(&["payments", "card", card_number]).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Lists active payment details for a card.
    pub async fn active_payments_by_card(
        &self,
        card_number: &str,
    ) -> Result<Vec<PaymentDetail>, ClientError> {
        let envelope: PaymentResponse<Vec<PaymentDetail>> =
            self.get(&["payments", "active", card_number]).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(segments)?).send().await?;
        self.handle_response(resp).await
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
