use askama::Template;

use crate::domain::subscription::{email::Email, SubscriptionRequest};
use crate::email::{DeliveryError, EmailMessage, EmailSender};

pub const CONFIRMATION_SUBJECT: &str = "Confirmação de inscrição";

#[derive(Template)]
#[template(path = "subscriptions/subscription_email.txt")]
struct ConfirmationEmailTemplate<'a> {
    subscription: &'a SubscriptionRequest,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to render the confirmation email.")]
    Render(#[from] askama::Error),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Builds the confirmation sent to the organizer and to the registrant, in that order.
pub fn confirmation_email(
    organizer: &Email,
    subscription: &SubscriptionRequest,
) -> Result<EmailMessage, askama::Error> {
    let text_body = ConfirmationEmailTemplate { subscription }.render()?;

    Ok(EmailMessage {
        from: organizer.clone(),
        to: vec![organizer.clone(), subscription.email.clone()],
        subject: CONFIRMATION_SUBJECT.to_owned(),
        text_body,
    })
}

#[tracing::instrument(
    name = "Send a confirmation email to a new subscriber",
    skip(email_sender, organizer, subscription),
    fields(email = %subscription.email)
)]
pub async fn send_confirmation_email(
    email_sender: &dyn EmailSender,
    organizer: &Email,
    subscription: &SubscriptionRequest,
) -> Result<(), NotifyError> {
    let message = confirmation_email(organizer, subscription)?;
    email_sender.send_email(&message).await?;

    Ok(())
}
