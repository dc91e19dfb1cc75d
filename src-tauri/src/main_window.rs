use std::path::PathBuf;

use tauri::{AppHandle, Manager, Runtime, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    append_shell_log,
    external_links::SystemOpener,
    navigation_policy::{route_navigation, shell_navigation_policy, ExternalLinkPolicy},
    session_history::{handle_back_navigation, BackOutcome, BackSource},
    shell_bridge::shell_bridge_init_script,
    shell_config::ShellConfig,
    splash_overlay::splash_overlay_init_script,
    webview_settings::WebviewSettings,
    MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE,
};

fn navigation_policy_for<R: Runtime>(app_handle: &AppHandle<R>) -> ExternalLinkPolicy {
    let config = app_handle.config();
    let dev_url = config
        .build
        .dev_url
        .as_ref()
        .filter(|_| cfg!(debug_assertions));
    shell_navigation_policy(dev_url)
}

/// Builds the full-screen browser window and points it at the bundled start page.
pub(crate) fn create_main_window<R: Runtime>(
    app_handle: &AppHandle<R>,
    config: &ShellConfig,
) -> Result<WebviewWindow<R>, String> {
    let settings = WebviewSettings::default();
    let policy = navigation_policy_for(app_handle);
    let navigation_app = app_handle.clone();

    let builder = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(PathBuf::from(&config.start_page)),
    )
    .initialization_script(splash_overlay_init_script(MAIN_WINDOW_TITLE).as_str())
    .initialization_script(shell_bridge_init_script().as_str())
    .on_navigation(move |url| {
        route_navigation(
            &policy,
            &SystemOpener::new(&navigation_app),
            url,
            append_shell_log,
        )
    });

    #[cfg(target_os = "android")]
    let builder = builder.initialization_script(
        crate::shell_bridge::system_back_init_script().as_str(),
    );

    #[cfg(desktop)]
    let builder = builder
        .title(MAIN_WINDOW_TITLE)
        .maximized(true)
        .zoom_hotkeys_enabled(settings.zoom_enabled());

    let window = builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
    append_shell_log(&format!("main window created, start page: {}", config.start_page));

    if let Err(error) = apply_platform_settings(&window, settings) {
        append_shell_log(&error);
    }
    Ok(window)
}

#[cfg(target_os = "android")]
fn apply_platform_settings<R: Runtime>(
    window: &WebviewWindow<R>,
    settings: WebviewSettings,
) -> Result<(), String> {
    window
        .with_webview(move |platform_webview| {
            platform_webview
                .jni_handle()
                .exec(move |env, activity, webview| {
                    crate::android_platform::apply_webview_settings(
                        env,
                        activity,
                        webview,
                        &settings,
                        append_shell_log,
                    );
                    append_shell_log("android webview settings applied");
                });
        })
        .map_err(|error| format!("Failed to access platform webview: {error}"))
}

#[cfg(not(target_os = "android"))]
fn apply_platform_settings<R: Runtime>(
    _window: &WebviewWindow<R>,
    settings: WebviewSettings,
) -> Result<(), String> {
    append_shell_log(&format!(
        "window/webview flags are managed by the desktop webview defaults; \
         user agent suffix '{}' applies on Android only",
        settings.user_agent_suffix
    ));
    Ok(())
}

#[cfg(not(target_os = "android"))]
struct TrackedWebviewHistory<'a, R: Runtime> {
    window: &'a WebviewWindow<R>,
    history: &'a std::sync::Mutex<crate::session_history::SessionHistory>,
}

#[cfg(not(target_os = "android"))]
impl<R: Runtime> crate::session_history::BrowserHistory for TrackedWebviewHistory<'_, R> {
    fn can_go_back(&mut self) -> bool {
        self.history
            .lock()
            .map(|history| history.can_go_back())
            .unwrap_or(false)
    }

    fn go_back(&mut self) {
        if let Ok(mut history) = self.history.lock() {
            history.begin_back();
        }
        if let Err(error) = self.window.eval("window.history.back();") {
            append_shell_log(&format!("failed to step main window back: {error}"));
        }
    }
}

/// Steps the main browser back one entry if it has history. Without history
/// a system back press closes the Android activity; page requests and
/// desktop windows do nothing further.
pub(crate) async fn navigate_back<R: Runtime>(
    app_handle: &AppHandle<R>,
    source: BackSource,
) -> Result<BackOutcome, String> {
    let window = app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| "Main window not found.".to_string())?;

    #[cfg(target_os = "android")]
    {
        let (sender, mut receiver) = tauri::async_runtime::channel(1);
        window
            .with_webview(move |platform_webview| {
                platform_webview
                    .jni_handle()
                    .exec(move |env, activity, webview| {
                        let mut history =
                            crate::android_platform::JniWebviewHistory::new(env, webview);
                        let outcome = handle_back_navigation(&mut history);
                        if crate::session_history::closes_shell(outcome, source) {
                            if let Err(error) =
                                crate::android_platform::finish_activity(env, activity)
                            {
                                append_shell_log(&format!("failed to finish activity: {error}"));
                            }
                        }
                        let _ = sender.try_send(outcome);
                    });
            })
            .map_err(|error| format!("Failed to access platform webview: {error}"))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| "Back navigation result was dropped.".to_string())
    }

    #[cfg(not(target_os = "android"))]
    {
        let state = app_handle.state::<crate::WindowState>();
        let mut history = TrackedWebviewHistory {
            window: &window,
            history: &state.history,
        };
        let outcome = handle_back_navigation(&mut history);
        if crate::session_history::closes_shell(outcome, source) {
            append_shell_log("back pressed without history; desktop window stays open");
        }
        Ok(outcome)
    }
}
