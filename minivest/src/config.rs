//! Adapter configuration.

/// Key under which synced validation errors are stored on external controls.
pub const DEFAULT_ERROR_KEY: &str = "vest";

/// Per-instance configuration for a [`Minivest`](crate::Minivest).
#[derive(Debug, Clone)]
pub struct MinivestConfig {
    /// Emit misuse warnings through `log`.
    /// Defaults to on in debug builds and off in release builds.
    pub dev_mode: bool,

    /// Error slot key used when pushing errors onto external controls.
    pub error_key: String,
}

impl Default for MinivestConfig {
    fn default() -> Self {
        Self {
            dev_mode: cfg!(debug_assertions),
            error_key: DEFAULT_ERROR_KEY.to_string(),
        }
    }
}

impl MinivestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable misuse warnings.
    pub fn dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    /// Set the error slot key for external controls.
    pub fn error_key(mut self, key: impl Into<String>) -> Self {
        self.error_key = key.into();
        self
    }
}
