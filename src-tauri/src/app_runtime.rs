use std::sync::Arc;

use tauri::{webview::PageLoadEvent, AppHandle, Manager, WindowEvent};

use crate::{
    append_network_log, append_shell_log, append_startup_log,
    lifecycle_monitor::{LifecycleHooks, LifecycleMonitor},
    logging, main_window, platform_connectivity,
    shell_config::ShellConfig,
    splash_overlay::{self, WebviewSplashOverlay},
    WindowState, MAIN_WINDOW_LABEL,
};

fn initialize_lifecycle_monitor(app_handle: &AppHandle, config: &ShellConfig) {
    if app_handle.try_state::<LifecycleMonitor>().is_some() {
        append_startup_log("lifecycle monitor already initialized; skipping");
        return;
    }

    let connectivity = platform_connectivity::system_connectivity(config, append_network_log);
    let observer = Arc::new(LifecycleHooks::new(append_network_log));

    #[cfg(target_os = "android")]
    let cookies = crate::android_platform::AndroidCookieStore;
    #[cfg(not(target_os = "android"))]
    let cookies = crate::lifecycle_monitor::DesktopCookieStore;

    let monitor = LifecycleMonitor::initialize(
        connectivity,
        &cookies,
        observer,
        config.network_poll_interval,
        append_network_log,
    );
    if !app_handle.manage(monitor) {
        append_startup_log("lifecycle monitor already registered; keeping the first instance");
    }
}

pub(crate) fn run() {
    let config = ShellConfig::from_env();
    append_startup_log("shell process starting");

    let builder = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(WindowState::default());

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        crate::window_actions::focus_main_window(app, append_shell_log);
    }));

    builder
        .invoke_handler(tauri::generate_handler![
            crate::shell_bridge_commands::shell_is_shell_runtime,
            crate::shell_bridge_commands::shell_is_network_available,
            crate::shell_bridge_commands::shell_get_state,
            crate::shell_bridge_commands::shell_open_external_url,
            crate::shell_bridge_commands::shell_navigate_back,
            crate::shell_bridge_commands::shell_handle_system_back,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match event {
                // Rotation only resizes the surface; the loaded page stays as it is.
                WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {}
                WindowEvent::Destroyed => append_shell_log("main window destroyed"),
                _ => {}
            }
        })
        .on_page_load(|webview, payload| {
            if webview.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match payload.event() {
                PageLoadEvent::Started => {
                    append_shell_log(&format!("page-load started: {}", payload.url()));
                }
                PageLoadEvent::Finished => {
                    append_shell_log(&format!("page-load finished: {}", payload.url()));
                    let state = webview.app_handle().state::<WindowState>();
                    if let Ok(mut history) = state.history.lock() {
                        history.record_page_load(payload.url().as_str());
                    }
                    splash_overlay::handle_page_finished(
                        &state,
                        &WebviewSplashOverlay::new(webview),
                        append_shell_log,
                    );
                }
            }
        })
        .setup(move |app| {
            let app_handle = app.handle();
            if let Some(log_dir) = config
                .log_dir
                .clone()
                .or_else(|| app_handle.path().app_log_dir().ok())
            {
                logging::init_log_dir(log_dir.clone());
                append_startup_log(&format!("shell log directory: {}", log_dir.display()));
            }

            initialize_lifecycle_monitor(app_handle, &config);
            main_window::create_main_window(app_handle, &config)?;
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
