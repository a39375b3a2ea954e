//! Discounts module - eligibility request and outcome types.

mod requirement;

pub use requirement::{Eligibility, EligibilityRequest, IneligibilityReason};
