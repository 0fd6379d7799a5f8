//! PaymentService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::str::FromStr;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use rust_decimal::Decimal;

    use payments_types::{
        AcceptPaymentRequest, AppError, FixedClock, NewPayment, Payment, PaymentId,
        PaymentRepository, RepoError,
    };

    use crate::PaymentService;

    /// Simple in-memory repository for testing the service layer.
    ///
    /// Counts inserts and deletes so tests can assert on side effects.
    pub struct MockRepo {
        payments: Mutex<BTreeMap<PaymentId, Payment>>,
        next_id: Mutex<i64>,
        inserts: AtomicUsize,
        deletes: AtomicUsize,
        fail_lookups: Option<fn() -> RepoError>,
        stale_deletes: bool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                payments: Mutex::new(BTreeMap::new()),
                next_id: Mutex::new(1),
                inserts: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
                fail_lookups: None,
                stale_deletes: false,
            }
        }

        /// A repo whose card-number lookups always fail with the given error.
        pub fn failing(err: fn() -> RepoError) -> Self {
            Self {
                fail_lookups: Some(err),
                ..Self::new()
            }
        }

        /// A repo whose deletes remove nothing, as if another stop won the race.
        pub fn with_stale_deletes() -> Self {
            Self {
                stale_deletes: true,
                ..Self::new()
            }
        }

        /// Stores a payment with an arbitrary timestamp, bypassing acceptance.
        pub fn seed(&self, card: &str, amount: &str, timestamp: DateTime<Utc>) -> PaymentId {
            let mut next_id = self.next_id.lock().unwrap();
            let id = PaymentId::from_i64(*next_id);
            *next_id += 1;
            let payment = Payment::from_parts(
                id,
                card.to_string(),
                Decimal::from_str(amount).unwrap(),
                timestamp,
            );
            self.payments.lock().unwrap().insert(id, payment);
            id
        }

        pub fn inserts(&self) -> usize {
            self.inserts.load(Ordering::SeqCst)
        }

        pub fn deletes(&self) -> usize {
            self.deletes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentRepository for MockRepo {
        async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            let mut next_id = self.next_id.lock().unwrap();
            let id = PaymentId::from_i64(*next_id);
            *next_id += 1;
            let payment = payment.into_payment(id);
            self.payments.lock().unwrap().insert(id, payment.clone());
            Ok(payment)
        }

        async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
            Ok(self.payments.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_card_number(&self, card_number: &str) -> Result<Vec<Payment>, RepoError> {
            if let Some(err) = self.fail_lookups {
                return Err(err());
            }
            Ok(self
                .payments
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.card_number == card_number)
                .cloned()
                .collect())
        }

        async fn delete_by_id(&self, id: PaymentId) -> Result<bool, RepoError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            if self.stale_deletes {
                return Ok(false);
            }
            Ok(self.payments.lock().unwrap().remove(&id).is_some())
        }
    }

    const CARD: &str = "4111111111111111";

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn service() -> (PaymentService<MockRepo, FixedClock>, FixedClock) {
        let clock = FixedClock::new(start());
        (
            PaymentService::with_clock(MockRepo::new(), clock.clone()),
            clock,
        )
    }

    fn accept_request(amount: Option<&str>) -> AcceptPaymentRequest {
        AcceptPaymentRequest {
            card_number: CARD.to_string(),
            amount: amount.map(|a| Decimal::from_str(a).unwrap()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Acceptance
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_accept_payment_success() {
        let (service, _) = service();

        let payment = service
            .accept_payment(accept_request(Some("100.00")))
            .await
            .unwrap();

        assert_eq!(payment.card_number, CARD);
        assert_eq!(payment.amount, Decimal::from_str("100.00").unwrap());
        assert_eq!(payment.timestamp, start());
        assert_eq!(service.repo().inserts(), 1);
    }

    #[tokio::test]
    async fn test_accept_payment_non_positive_amounts_fail() {
        for amount in [Some("0"), Some("0.00"), Some("-100.00"), None] {
            let (service, _) = service();

            let result = service.accept_payment(accept_request(amount)).await;

            assert!(
                matches!(&result, Err(AppError::Validation(msg)) if msg == "Payment amount must be positive."),
                "amount {:?} gave {:?}",
                amount,
                result
            );
            assert_eq!(service.repo().inserts(), 0);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cancellation
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_stop_payment_within_window() {
        let (service, clock) = service();
        let payment = service
            .accept_payment(accept_request(Some("100.00")))
            .await
            .unwrap();

        clock.advance(TimeDelta::minutes(5));

        assert!(service.stop_payment(payment.id).await.unwrap());
        assert!(service.repo().find_by_id(payment.id).await.unwrap().is_none());
        assert_eq!(service.repo().deletes(), 1);
    }

    #[tokio::test]
    async fn test_stop_payment_removed_concurrently_still_succeeds() {
        let clock = FixedClock::new(start());
        let service = PaymentService::with_clock(MockRepo::with_stale_deletes(), clock.clone());
        let id = service
            .repo()
            .seed(CARD, "100.00", start() - TimeDelta::minutes(5));

        let result = service.stop_payment(id).await;

        assert!(matches!(result, Ok(true)));
        assert_eq!(service.repo().deletes(), 1);
    }

    #[tokio::test]
    async fn test_stop_payment_twice_is_not_found() {
        let (service, clock) = service();
        let payment = service
            .accept_payment(accept_request(Some("100.00")))
            .await
            .unwrap();
        clock.advance(TimeDelta::minutes(5));
        service.stop_payment(payment.id).await.unwrap();

        let result = service.stop_payment(payment.id).await;

        let expected = format!("Payment with ID {} not found.", payment.id);
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == expected));
    }

    #[tokio::test]
    async fn test_stop_payment_after_window_fails() {
        let (service, _) = service();
        let id = service
            .repo()
            .seed(CARD, "100.00", start() - TimeDelta::minutes(20));

        let result = service.stop_payment(id).await;

        assert!(
            matches!(result, Err(AppError::Validation(msg)) if msg == "Payment cannot be stopped after 15 minutes.")
        );
        assert!(service.repo().find_by_id(id).await.unwrap().is_some());
        assert_eq!(service.repo().deletes(), 0);
    }

    #[tokio::test]
    async fn test_stop_payment_exactly_at_cutoff_fails() {
        let (service, _) = service();
        let id = service
            .repo()
            .seed(CARD, "100.00", start() - TimeDelta::minutes(15));

        let result = service.stop_payment(id).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.repo().deletes(), 0);
    }

    #[tokio::test]
    async fn test_stop_payment_one_second_before_cutoff_succeeds() {
        let (service, _) = service();
        let id = service.repo().seed(
            CARD,
            "100.00",
            start() - TimeDelta::minutes(15) + TimeDelta::seconds(1),
        );

        assert!(service.stop_payment(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_stop_high_value_payment_fails() {
        let (service, _) = service();
        let payment = service
            .accept_payment(accept_request(Some("15000.00")))
            .await
            .unwrap();

        let result = service.stop_payment(payment.id).await;

        assert!(
            matches!(result, Err(AppError::Validation(msg)) if msg == "Payments over $10,000 cannot be stopped automatically. Please contact customer service.")
        );
        assert!(service.repo().find_by_id(payment.id).await.unwrap().is_some());
        assert_eq!(service.repo().deletes(), 0);
    }

    #[tokio::test]
    async fn test_stop_old_high_value_payment_reports_amount_limit() {
        let (service, _) = service();
        let id = service
            .repo()
            .seed(CARD, "10000.01", start() - TimeDelta::hours(3));

        let result = service.stop_payment(id).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.starts_with("Payments over $10,000")));
    }

    #[tokio::test]
    async fn test_stop_payment_at_amount_limit_succeeds() {
        let (service, _) = service();
        let payment = service
            .accept_payment(accept_request(Some("10000")))
            .await
            .unwrap();

        assert!(service.stop_payment(payment.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_stop_unknown_payment_not_found() {
        let (service, _) = service();

        let result = service.stop_payment(PaymentId::from_i64(99)).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Payment with ID 99 not found."));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_payments_by_card_number_returns_all_unfiltered() {
        let (service, _) = service();
        service
            .repo()
            .seed(CARD, "100.00", start() - TimeDelta::days(30));
        service.repo().seed(CARD, "20000.00", start());
        service.repo().seed("5500000000000004", "5.00", start());

        let payments = service.get_payments_by_card_number(CARD).await.unwrap();

        assert_eq!(payments.len(), 2);
        assert!(payments.iter().all(|p| p.card_number == CARD));
    }

    #[tokio::test]
    async fn test_get_payments_by_card_number_empty_is_not_found() {
        let (service, _) = service();

        let result = service.get_payments_by_card_number("0000").await;

        assert!(
            matches!(result, Err(AppError::NotFound(msg)) if msg == "No payments found for card number: 0000")
        );
    }

    #[tokio::test]
    async fn test_get_active_payments_projects_details() {
        let (service, _) = service();
        let id = service.repo().seed(CARD, "42.50", start());

        let details = service
            .get_active_payments_by_card_number(CARD)
            .await
            .unwrap();

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, id);
        assert_eq!(details[0].amount, Decimal::from_str("42.50").unwrap());
        assert_eq!(details[0].timestamp, start());
    }

    #[tokio::test]
    async fn test_get_active_payments_empty_is_empty_list() {
        let (service, _) = service();

        let details = service
            .get_active_payments_by_card_number("0000")
            .await
            .unwrap();

        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn test_get_active_payments_store_not_found_propagates() {
        let service = PaymentService::with_clock(
            MockRepo::failing(|| RepoError::NotFound),
            FixedClock::new(start()),
        );

        let result = service.get_active_payments_by_card_number(CARD).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_active_payments_store_failure_propagates() {
        let service = PaymentService::with_clock(
            MockRepo::failing(|| RepoError::Database("connection reset".into())),
            FixedClock::new(start()),
        );

        let result = service.get_active_payments_by_card_number(CARD).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_stopped_payment_is_no_longer_active() {
        let (service, clock) = service();
        let kept = service
            .accept_payment(accept_request(Some("10.00")))
            .await
            .unwrap();
        let stopped = service
            .accept_payment(accept_request(Some("20.00")))
            .await
            .unwrap();
        clock.advance(TimeDelta::minutes(1));
        service.stop_payment(stopped.id).await.unwrap();

        let details = service
            .get_active_payments_by_card_number(CARD)
            .await
            .unwrap();

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, kept.id);
    }
}
