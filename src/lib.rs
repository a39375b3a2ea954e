//! Stock Alerts - Back-in-stock subscriptions for the storefront catalog
//!
//! This crate implements the back-in-stock subscription lifecycle (opt-in,
//! listing, restock notification fan-out) and the role-based discount
//! eligibility rule used by the discount engine.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
