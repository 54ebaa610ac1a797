use anyhow::Context;
use askama::Template;
use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use tower_sessions::Session;

use super::notifier::send_confirmation_email;
use super::schema::{BoundField, SubscribeBody};
use super::{SUBSCRIPTION_ACCEPTED, SUBSCRIPTION_PATH};
use crate::app::csrf::{self, CSRF_FIELD};
use crate::app::error::AppResult;
use crate::app::flash;
use crate::app::AppState;
use crate::domain::subscription::{FormErrors, SubscriptionForm};

#[derive(Template)]
#[template(path = "subscriptions/subscription_form.html")]
pub struct SubscriptionFormTemplate {
    action: &'static str,
    csrf_field: &'static str,
    csrf_token: String,
    fields: Vec<BoundField>,
    has_errors: bool,
    flash: Option<String>,
}

impl SubscriptionFormTemplate {
    fn new(
        form: &SubscriptionForm,
        errors: Option<&FormErrors>,
        csrf_token: String,
        flash: Option<String>,
    ) -> Self {
        Self {
            action: SUBSCRIPTION_PATH,
            csrf_field: CSRF_FIELD,
            csrf_token,
            fields: BoundField::bind_all(form, errors),
            has_errors: errors.is_some_and(|errors| !errors.is_empty()),
            flash,
        }
    }
}

#[tracing::instrument(name = "Subscription form", skip(session))]
pub async fn subscription_form(session: Session) -> AppResult<SubscriptionFormTemplate> {
    let csrf_token = csrf::issue_token(&session).await?;
    let flash = flash::take(&session).await?;

    Ok(SubscriptionFormTemplate::new(
        &SubscriptionForm::default(),
        None,
        csrf_token,
        flash,
    ))
}

#[tracing::instrument(name = "Adding a new subscription", skip(session, state, pairs))]
pub async fn subscribe(
    session: Session,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let (form, csrf_token) = SubscribeBody::from_pairs(pairs).into_parts();
    csrf::verify_token(&session, &csrf_token).await?;

    let subscription = match form.validate() {
        Ok(subscription) => subscription,
        Err(errors) => {
            tracing::info!(invalid_fields = errors.len(), "rejected an incomplete subscription");
            return Ok(
                SubscriptionFormTemplate::new(&form, Some(&errors), csrf_token, None)
                    .into_response(),
            );
        }
    };

    send_confirmation_email(state.email_sender.as_ref(), &state.organizer, &subscription)
        .await
        .context("Failed to send the subscription confirmation email.")?;

    flash::set(&session, SUBSCRIPTION_ACCEPTED).await?;

    Ok((StatusCode::FOUND, [(LOCATION, SUBSCRIPTION_PATH)]).into_response())
}
