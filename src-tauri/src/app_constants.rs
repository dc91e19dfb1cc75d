pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "StoryTime";
pub(crate) const DEFAULT_START_PAGE: &str = "index.html";
pub(crate) const PRODUCT_IDENTIFIER: &str = "StoryTimeApp/1.0 Android";

pub(crate) const SPLASH_ELEMENT_ID: &str = "storytime-shell-splash";
pub(crate) const SPLASH_DISMISSED_KEY: &str = "storytime-shell:splash-dismissed";
pub(crate) const SPLASH_BACKGROUND_COLOR: &str = "#fff7e8";

pub(crate) const SHELL_LOG_FILE: &str = "shell.log";
pub(crate) const STARTUP_LOG_FILE: &str = "startup.log";
pub(crate) const NETWORK_LOG_FILE: &str = "network.log";
pub(crate) const LOG_ROTATE_MAX_BYTES: u64 = 2 * 1024 * 1024;

pub(crate) const START_PAGE_ENV: &str = "STORYTIME_START_PAGE";
pub(crate) const LOG_DIR_ENV: &str = "STORYTIME_LOG_DIR";
pub(crate) const NETWORK_POLL_MS_ENV: &str = "STORYTIME_NETWORK_POLL_MS";
pub(crate) const NETWORK_TRANSPORT_ENV: &str = "STORYTIME_NETWORK_TRANSPORT";

pub(crate) const DEFAULT_NETWORK_POLL_MS: u64 = 5_000;
pub(crate) const MIN_NETWORK_POLL_MS: u64 = 250;

/// Origins the bundled frontend is served from on platforms that use http(s) for app assets.
pub(crate) const INTERNAL_APP_ORIGINS: [&str; 2] =
    ["http://tauri.localhost", "https://tauri.localhost"];
