//! Notification dispatcher port - the messaging subsystem boundary.
//!
//! The messaging subsystem owns templates, localization, and the actual
//! transport (email today, possibly push/SMS tomorrow). This crate hands it
//! a subscription and a language and gets back how many messages went out.

use crate::domain::catalog::StockSubscription;
use crate::domain::foundation::{DomainError, LanguageCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of one dispatch attempt.
///
/// `sent` is a count rather than a bool: a multi-channel configuration may
/// send more than one message per subscriber, and a suppressed recipient
/// (bounced address, unsubscribed) yields zero without being an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    /// Number of messages actually queued for delivery.
    pub sent: u32,
}

impl DispatchReceipt {
    /// A receipt for the given number of messages.
    pub fn sent(count: u32) -> Self {
        Self { sent: count }
    }

    /// A receipt for a suppressed recipient.
    pub fn suppressed() -> Self {
        Self { sent: 0 }
    }
}

/// Port for sending restock notifications.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Send a back-in-stock notification for this subscription.
    ///
    /// # Errors
    ///
    /// - `DispatchFailed` if the messaging subsystem rejects the send; the
    ///   caller decides whether to abort or continue
    async fn send_restock_notification(
        &self,
        subscription: &StockSubscription,
        language: &LanguageCode,
    ) -> Result<DispatchReceipt, DomainError>;
}
