use tauri::{AppHandle, Manager};

use crate::{
    append_shell_log,
    external_links::{parse_openable_url, SystemOpener},
    lifecycle_monitor::{self, LifecycleMonitor},
    main_window,
    navigation_policy::ExternalOpener,
    session_history::{BackOutcome, BackSource},
    BackNavigationResult, ShellBridgeResult, ShellBridgeState, WindowState, PRODUCT_IDENTIFIER,
};

fn network_available(app_handle: &AppHandle) -> bool {
    let monitor = app_handle.try_state::<LifecycleMonitor>();
    lifecycle_monitor::is_network_available(monitor.as_deref())
}

#[tauri::command]
pub(crate) fn shell_is_shell_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn shell_is_network_available(app_handle: AppHandle) -> bool {
    network_available(&app_handle)
}

#[tauri::command]
pub(crate) fn shell_get_state(app_handle: AppHandle) -> ShellBridgeState {
    let splash_visible = app_handle
        .try_state::<WindowState>()
        .map(|state| state.is_splash_visible())
        .unwrap_or(true);
    let monitor = app_handle.try_state::<LifecycleMonitor>();
    let network = lifecycle_monitor::network_snapshot(monitor.as_deref());

    ShellBridgeState {
        splash_visible,
        network_available: network.available,
        active_transports: network.transports,
        product_identifier: PRODUCT_IDENTIFIER,
    }
}

#[tauri::command]
pub(crate) fn shell_open_external_url(app_handle: AppHandle, url: String) -> ShellBridgeResult {
    let parsed = match parse_openable_url(&url) {
        Ok(parsed) => parsed,
        Err(error) => return ShellBridgeResult::failed(error),
    };

    match SystemOpener::new(&app_handle).open_external(&parsed) {
        Ok(()) => ShellBridgeResult::ok(),
        Err(error) => {
            append_shell_log(&error);
            ShellBridgeResult::failed(error)
        }
    }
}

async fn navigate_back_from(app_handle: &AppHandle, source: BackSource) -> BackNavigationResult {
    match main_window::navigate_back(app_handle, source).await {
        Ok(outcome) => BackNavigationResult {
            consumed: outcome == BackOutcome::Consumed,
        },
        Err(error) => {
            append_shell_log(&format!("back navigation failed: {error}"));
            BackNavigationResult { consumed: false }
        }
    }
}

#[tauri::command]
pub(crate) async fn shell_navigate_back(app_handle: AppHandle) -> BackNavigationResult {
    navigate_back_from(&app_handle, BackSource::Page).await
}

/// Invoked by the Android back-button listener.
#[tauri::command]
pub(crate) async fn shell_handle_system_back(app_handle: AppHandle) -> BackNavigationResult {
    navigate_back_from(&app_handle, BackSource::SystemButton).await
}
