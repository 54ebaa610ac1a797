use anyhow::Context;
use tower_sessions::Session;

use super::error::AppResult;

const FLASH_KEY: &str = "flash";

/// Stores a message to be shown by the next page render.
pub async fn set(session: &Session, message: &str) -> AppResult<()> {
    session
        .insert(FLASH_KEY, message)
        .await
        .context("Failed to store the flash message in the session.")?;
    Ok(())
}

/// Removes and returns the pending message, if any.
pub async fn take(session: &Session) -> AppResult<Option<String>> {
    let message = session
        .remove::<String>(FLASH_KEY)
        .await
        .context("Failed to read the flash message from the session.")?;
    Ok(message)
}
