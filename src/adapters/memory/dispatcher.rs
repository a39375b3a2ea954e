//! Recording notification dispatcher for testing.
//!
//! Captures every dispatch attempt and plays back scripted receipts, with an
//! optional trigger to fail on the nth call (to exercise mid-run abort
//! behavior in the notify-and-purge protocol).
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This is acceptable for
//! test code but this adapter should NOT be used in production.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::catalog::StockSubscription;
use crate::domain::foundation::{
    CustomerId, DomainError, ErrorCode, LanguageCode, SubscriptionId,
};
use crate::ports::{DispatchReceipt, NotificationDispatcher};

/// One captured dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord {
    pub subscription_id: SubscriptionId,
    pub customer_id: CustomerId,
    pub language: LanguageCode,
}

/// Recording `NotificationDispatcher` test double.
///
/// Every successful call sends one message unless a per-customer receipt is
/// scripted with `with_receipt`.
pub struct RecordingDispatcher {
    dispatched: Mutex<Vec<DispatchRecord>>,
    receipts: Mutex<HashMap<CustomerId, u32>>,
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
}

impl RecordingDispatcher {
    /// Creates a dispatcher that sends one message per call.
    pub fn new() -> Self {
        Self {
            dispatched: Mutex::new(Vec::new()),
            receipts: Mutex::new(HashMap::new()),
            fail_on_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a dispatcher that fails on the nth call (1-based); earlier
    /// calls succeed and are recorded.
    pub fn failing_on_call(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::new()
        }
    }

    /// Scripts the receipt returned for one customer (e.g. 0 for a
    /// suppressed recipient, 2 for a multi-channel send).
    pub fn with_receipt(self, customer: CustomerId, sent: u32) -> Self {
        self.receipts
            .lock()
            .expect("RecordingDispatcher: receipts lock poisoned")
            .insert(customer, sent);
        self
    }

    // === Test Helpers ===

    /// Successful dispatch attempts, in call order.
    pub fn dispatched(&self) -> Vec<DispatchRecord> {
        self.dispatched
            .lock()
            .expect("RecordingDispatcher: dispatched lock poisoned")
            .clone()
    }

    /// Total calls made, including the failing one.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send_restock_notification(
        &self,
        subscription: &StockSubscription,
        language: &LanguageCode,
    ) -> Result<DispatchReceipt, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(DomainError::new(
                ErrorCode::DispatchFailed,
                "Simulated dispatch failure",
            ));
        }

        self.dispatched
            .lock()
            .expect("RecordingDispatcher: dispatched lock poisoned")
            .push(DispatchRecord {
                subscription_id: subscription.id,
                customer_id: subscription.customer_id,
                language: language.clone(),
            });

        let sent = self
            .receipts
            .lock()
            .expect("RecordingDispatcher: receipts lock poisoned")
            .get(&subscription.customer_id)
            .copied()
            .unwrap_or(1);
        Ok(DispatchReceipt::sent(sent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProductId, StoreId};

    fn english() -> LanguageCode {
        LanguageCode::new("en").unwrap()
    }

    #[tokio::test]
    async fn records_each_dispatch() {
        let dispatcher = RecordingDispatcher::new();
        let subscription =
            StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());

        let receipt = dispatcher
            .send_restock_notification(&subscription, &english())
            .await
            .unwrap();

        assert_eq!(receipt.sent, 1);
        let records = dispatcher.dispatched();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subscription_id, subscription.id);
        assert_eq!(records[0].language, english());
    }

    #[tokio::test]
    async fn scripted_receipt_overrides_default() {
        let customer = CustomerId::new();
        let dispatcher = RecordingDispatcher::new().with_receipt(customer, 0);
        let subscription = StockSubscription::new(customer, ProductId::new(), StoreId::new());

        let receipt = dispatcher
            .send_restock_notification(&subscription, &english())
            .await
            .unwrap();

        assert_eq!(receipt.sent, 0);
    }

    #[tokio::test]
    async fn fails_on_the_scripted_call_only() {
        let dispatcher = RecordingDispatcher::failing_on_call(2);
        let s1 = StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());
        let s2 = StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());

        assert!(dispatcher
            .send_restock_notification(&s1, &english())
            .await
            .is_ok());
        let err = dispatcher
            .send_restock_notification(&s2, &english())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DispatchFailed);
        assert_eq!(dispatcher.call_count(), 2);
        assert_eq!(dispatcher.dispatched().len(), 1);
    }
}
