use serde::{Deserialize, Serialize};

/// Output configuration for statement generators.
///
/// By default markers are renumbered into the dialect's final form and
/// parameters are returned separately.
///
/// The struct is `Deserialize` with every field optional, so it can be
/// embedded in a host application's config file:
///
/// ```toml
/// [sql]
/// inline_params = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Rewrite generic markers into the dialect's numbered form.
    pub renumber: bool,
    /// Substitute parameters into the SQL text as literals.
    ///
    /// Text values are escaped by the dialect, [`Value::Raw`](crate::Value::Raw)
    /// is not. Prefer parameterized output for anything user-supplied.
    pub inline_params: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            renumber: true,
            inline_params: false,
        }
    }
}

impl RenderOptions {
    /// Create a new configuration with defaults (renumbering on, inlining off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the renumbering pass on or off.
    pub fn with_renumber(mut self, renumber: bool) -> Self {
        self.renumber = renumber;
        self
    }

    /// Inline parameters as literals.
    pub fn enable_inlining(mut self) -> Self {
        self.inline_params = true;
        self
    }

    /// Return parameters separately (default).
    pub fn disable_inlining(mut self) -> Self {
        self.inline_params = false;
        self
    }
}
