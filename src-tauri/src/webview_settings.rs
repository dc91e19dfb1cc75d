use crate::PRODUCT_IDENTIFIER;

/// Capability flags applied to the embedded browser and its window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WebviewSettings {
    pub(crate) keep_screen_on: bool,
    pub(crate) hardware_accelerated: bool,
    pub(crate) javascript: bool,
    pub(crate) dom_storage: bool,
    pub(crate) database: bool,
    pub(crate) indexed_db: bool,
    pub(crate) file_access: bool,
    pub(crate) content_access: bool,
    pub(crate) allow_mixed_content: bool,
    pub(crate) zoom_support: bool,
    pub(crate) builtin_zoom_controls: bool,
    pub(crate) display_zoom_controls: bool,
    pub(crate) user_agent_suffix: String,
}

impl Default for WebviewSettings {
    fn default() -> Self {
        Self {
            keep_screen_on: true,
            hardware_accelerated: true,
            javascript: true,
            dom_storage: true,
            database: true,
            indexed_db: true,
            file_access: true,
            content_access: true,
            allow_mixed_content: true,
            zoom_support: false,
            builtin_zoom_controls: false,
            display_zoom_controls: false,
            user_agent_suffix: PRODUCT_IDENTIFIER.to_string(),
        }
    }
}

impl WebviewSettings {
    pub(crate) fn zoom_enabled(&self) -> bool {
        self.zoom_support || self.builtin_zoom_controls || self.display_zoom_controls
    }

    /// `WebSettings.MIXED_CONTENT_ALWAYS_ALLOW` or `MIXED_CONTENT_NEVER_ALLOW`.
    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    pub(crate) fn android_mixed_content_mode(&self) -> i32 {
        if self.allow_mixed_content {
            0
        } else {
            1
        }
    }
}

/// Appends `suffix` to the platform user agent, once.
pub(crate) fn user_agent_with_suffix(base: &str, suffix: &str) -> String {
    let base = base.trim_end();
    let suffix = suffix.trim();
    if suffix.is_empty() || base.ends_with(suffix) {
        return base.to_string();
    }
    if base.is_empty() {
        return suffix.to_string();
    }
    format!("{base} {suffix}")
}
