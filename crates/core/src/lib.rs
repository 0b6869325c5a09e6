//! # Bookwell core
//!
//! Domain model for the practice's appointment scheduling: recurring weekly
//! availability windows, the slots derived from them, booking requests and
//! their lifecycle, public form validation and submission rate limiting.
//!
//! Nothing in this crate performs I/O; persistence lives in `bookwell-db` and
//! HTTP in `bookwell-api`.

pub mod booking;
pub mod errors;
pub mod models;
pub mod rate_limit;
pub mod slots;
pub mod time;
pub mod validation;
pub mod windows;
