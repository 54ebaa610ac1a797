use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{http::Request, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::{
    config::Settings,
    domain::subscription::email::Email,
    email::{EmailClient, EmailSender},
};

use self::session_store::MemorySessionStore;

mod asset;
mod csrf;
mod error;
mod flash;
mod health;
mod home;
mod not_found;
mod session_store;
pub mod subscription;

const SESSION_INACTIVITY_LIMIT: time::Duration = time::Duration::hours(2);
const SESSION_EVICTION_PERIOD: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    email_sender: Arc<dyn EmailSender>,
    /// Sender and first recipient of every confirmation email.
    organizer: Email,
}

fn app_router() -> Router<AppState> {
    health::router()
        .merge(home::router())
        .merge(subscription::router())
        .merge(asset::router())
        .fallback(not_found::not_found_page)
}

pub struct App {
    listener: TcpListener,
    email_sender: Arc<dyn EmailSender>,
    organizer: Email,
    secure_cookies: bool,
}

impl App {
    pub async fn with(config: Settings) -> anyhow::Result<Self> {
        let organizer = config
            .email_client
            .sender()
            .context("The sender email should be valid.")?;

        let email_client = EmailClient::new(
            config.email_client.base_url.clone(),
            config.email_client.authorization_token.clone(),
            config.email_client.timeout(),
        )
        .context("The email client should be buildable.")?;

        let listener = TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .context("The listener should be able to bind the address.")?;

        Ok(Self {
            listener,
            email_sender: Arc::new(email_client),
            organizer,
            secure_cookies: config.application.secure_cookies,
        })
    }

    /// Swaps the configured email client for another sender.
    pub fn with_email_sender(mut self, email_sender: Arc<dyn EmailSender>) -> Self {
        self.email_sender = email_sender;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn port(&self) -> io::Result<u16> {
        Ok(self.local_addr()?.port())
    }

    pub async fn serve(self) -> Result<(), io::Error> {
        let session_store = MemorySessionStore::default();
        tokio::spawn({
            let session_store = session_store.clone();
            async move {
                if let Err(e) = session_store
                    .evict_expired_every(SESSION_EVICTION_PERIOD)
                    .await
                {
                    tracing::error!(error.message = %e, "session eviction stopped");
                }
            }
        });

        let session_layer = SessionManagerLayer::new(session_store)
            .with_secure(self.secure_cookies)
            .with_expiry(Expiry::OnInactivity(SESSION_INACTIVITY_LIMIT));

        let app = app_router()
            .with_state(AppState {
                email_sender: self.email_sender,
                organizer: self.organizer,
            })
            .layer(session_layer)
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let id = uuid::Uuid::new_v4();
                    tracing::info_span!(
                        "request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        %id,
                    )
                }),
            );

        axum::serve(self.listener, app.into_make_service()).await
    }
}
