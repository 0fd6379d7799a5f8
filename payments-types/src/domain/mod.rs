//! Domain models for the payment service.

pub mod payment;

pub use payment::{
    NewPayment, Payment, PaymentId, STOP_AMOUNT_LIMIT, STOP_WINDOW_MINUTES, stop_window,
};
