use anyhow::Context;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use tower_sessions::Session;

use super::error::{AppError, AppResult};

/// Name of the hidden form input carrying the token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

const CSRF_TOKEN_KEY: &str = "csrf_token";
const CSRF_TOKEN_LENGTH: usize = 32;

/// Returns the anti-forgery token bound to this session, creating it on first use.
pub async fn issue_token(session: &Session) -> AppResult<String> {
    let existing = session
        .get::<String>(CSRF_TOKEN_KEY)
        .await
        .context("Failed to read the CSRF token from the session.")?;
    if let Some(token) = existing {
        return Ok(token);
    }

    let token = generate_token();
    session
        .insert(CSRF_TOKEN_KEY, &token)
        .await
        .context("Failed to store the CSRF token in the session.")?;

    Ok(token)
}

/// Rejects the request unless `submitted` matches the token bound to this session.
#[tracing::instrument(name = "Verify CSRF token", skip(session, submitted))]
pub async fn verify_token(session: &Session, submitted: &str) -> AppResult<()> {
    let expected = session
        .get::<String>(CSRF_TOKEN_KEY)
        .await
        .context("Failed to read the CSRF token from the session.")?;

    match expected {
        Some(expected) if !submitted.is_empty() && expected == submitted => Ok(()),
        Some(_) => Err(AppError::Forbidden),
        None => {
            tracing::debug!("no CSRF token was ever issued for this session");
            Err(AppError::Forbidden)
        }
    }
}

/// Generate a random 32-characters-long case-sensitive token.
fn generate_token() -> String {
    let mut rng = thread_rng();
    std::iter::repeat_with(|| rng.sample(Alphanumeric))
        .map(char::from)
        .take(CSRF_TOKEN_LENGTH)
        .collect()
}
