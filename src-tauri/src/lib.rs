#[cfg(target_os = "android")]
mod android_platform;
mod app_constants;
mod app_runtime;
mod app_types;
mod connectivity;
mod connectivity_watcher;
mod external_links;
mod lifecycle_monitor;
mod logging;
mod main_window;
mod navigation_policy;
mod platform_connectivity;
mod session_history;
mod shell_bridge;
mod shell_bridge_commands;
mod shell_config;
mod splash_overlay;
mod webview_settings;
#[cfg(desktop)]
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{BackNavigationResult, ShellBridgeResult, ShellBridgeState, WindowState};
pub(crate) use logging::{append_network_log, append_shell_log, append_startup_log};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    app_runtime::run();
}
