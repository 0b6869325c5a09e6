use bookwell_core::{
    errors::{ScheduleError, ScheduleResult},
    models::contact::ContactForm,
    validation::validate_contact_form,
};

use crate::notifier::Notifier;

pub const CONTACT_RECEIVED: &str =
    "Thank you for your message! We will be in touch within 24 hours.";

pub async fn submit_contact_form(notifier: &dyn Notifier, form: &ContactForm) -> ScheduleResult<()> {
    let message = validate_contact_form(form)?;
    notifier
        .send_contact_notification(message)
        .await
        .map_err(ScheduleError::Notification)
}
