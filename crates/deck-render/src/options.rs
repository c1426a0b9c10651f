//! Output configuration.

/// Runtime scripts of the slide player, in load order.
pub const DEFAULT_SCRIPTS: &[&str] = &[
    "js/core.js",
    "js/animation.js",
    "js/transition.js",
    "js/animation-sequence.js",
    "js/slides.js",
    "js/controller.js",
    "js/ui.js",
    "js/main.js",
];

/// Options for HTML generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Directory holding the player's stylesheet and scripts, as seen from
    /// the generated file
    pub asset_root: String,
    /// Stylesheet path relative to `asset_root`
    pub stylesheet: String,
    /// Script paths relative to `asset_root`
    pub scripts: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_root: "../src/main/web".to_string(),
            stylesheet: "css/styles.css".to_string(),
            scripts: DEFAULT_SCRIPTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RenderOptions {
    /// Default assets under a different root.
    pub fn with_asset_root(asset_root: impl Into<String>) -> Self {
        Self {
            asset_root: asset_root.into(),
            ..Default::default()
        }
    }

    /// `path` prefixed with the asset root.
    pub fn asset(&self, path: &str) -> String {
        let root = self.asset_root.trim_end_matches('/');
        if root.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", root, path)
        }
    }
}
