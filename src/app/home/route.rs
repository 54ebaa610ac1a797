use askama::Template;
use axum::response::IntoResponse;

use crate::app::subscription::SUBSCRIPTION_PATH;

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate {
    subscription_path: &'static str,
}

#[tracing::instrument(name = "Home page")]
pub async fn home_page() -> impl IntoResponse {
    HomeTemplate {
        subscription_path: SUBSCRIPTION_PATH,
    }
}
