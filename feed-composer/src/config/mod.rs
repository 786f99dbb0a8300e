use serde::Deserialize;

/// Reveal-window sizing. Defaults match the production feed; hosts may
/// deserialize overrides from their own configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedConfig {
    /// Reviews shown before any scrolling.
    pub initial_window: usize,
    /// Reviews added per reveal step.
    pub reveal_step: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_window: 6,
            reveal_step: 6,
        }
    }
}
