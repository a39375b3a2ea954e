//! Catalog module - back-in-stock subscription entity, events, and errors.

mod errors;
mod events;
mod subscription;

pub use errors::SubscriptionError;
pub use events::SubscriptionEvent;
pub use subscription::StockSubscription;
