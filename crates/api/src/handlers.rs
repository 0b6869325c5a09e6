pub mod availability;
pub mod booking;
pub mod contact;

use chrono::{Local, NaiveDate};

/// Calendar date on the server's wall clock; past-date checks compare to this.
pub(crate) fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
