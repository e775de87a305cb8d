//! Business logic services.
//!
//! Services hold the business rules, separated from HTTP handlers and
//! from storage.

pub mod account_service;

pub use account_service::AccountService;
