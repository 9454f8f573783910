use std::sync::Arc;

use quiz_core::model::Theme;
use storage::repository::KeyValueStore;

use crate::error::ThemeServiceError;

/// Storage key for the theme preference, kept apart from progress.
pub const THEME_KEY: &str = "theme";

#[derive(Clone)]
pub struct ThemeService {
    store: Arc<dyn KeyValueStore>,
}

impl ThemeService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the saved theme (light if missing or unrecognised).
    ///
    /// # Errors
    ///
    /// Returns `ThemeServiceError` on storage failures.
    pub async fn load(&self) -> Result<Theme, ThemeServiceError> {
        let stored = self.store.get(THEME_KEY).await?;
        Ok(stored
            .and_then(|raw| raw.parse::<Theme>().ok())
            .unwrap_or_default())
    }

    /// Flip the saved theme and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `ThemeServiceError` on storage failures.
    pub async fn toggle(&self) -> Result<Theme, ThemeServiceError> {
        let next = self.load().await?.toggled();
        self.store.set(THEME_KEY, next.as_str()).await?;
        log::debug!("theme set to {next}");
        Ok(next)
    }
}
