use axum::{routing::get, Router};

use super::AppState;

pub mod notifier;
pub mod route;
pub mod schema;

pub const SUBSCRIPTION_PATH: &str = "/inscricao/";

/// Shown on the form once a subscription went through.
pub const SUBSCRIPTION_ACCEPTED: &str = "Inscrição realizada com sucesso!";

pub fn router() -> Router<AppState> {
    Router::new().route(
        SUBSCRIPTION_PATH,
        get(route::subscription_form).post(route::subscribe),
    )
}
