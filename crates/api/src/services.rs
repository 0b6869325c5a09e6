//! Orchestration of stores, domain rules and the notifier.
//!
//! Handlers stay thin: they extract input, call one function here and wrap the
//! result in a response.

pub mod booking;
pub mod contact;
pub mod scheduling;
