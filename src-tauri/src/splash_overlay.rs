use tauri::{Runtime, Webview};

use crate::{
    app_types::WindowState, SPLASH_BACKGROUND_COLOR, SPLASH_DISMISSED_KEY, SPLASH_ELEMENT_ID,
};

pub(crate) trait SplashOverlay {
    fn hide(&self) -> Result<(), String>;
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Window property holding the observer that waits for a parse root.
const SPLASH_PENDING_PROPERTY: &str = "__storytimeSplashPending";

/// Draws the overlay at document start unless it was already dismissed in this session.
///
/// Document-start scripts can run before the parser has created
/// `<html>`; in that case insertion waits for the first node to appear.
pub(crate) fn splash_overlay_init_script(title: &str) -> String {
    format!(
        r#"(function () {{
  var id = {id};
  var key = {key};
  var pending = {pending};
  try {{
    try {{
      if (window.sessionStorage.getItem(key) === "1") return;
    }} catch (_) {{}}
    var attach = function () {{
      if (document.getElementById(id)) return true;
      var root = document.body || document.documentElement;
      if (!root) return false;
      var overlay = document.createElement("div");
      overlay.id = id;
      overlay.setAttribute("aria-hidden", "true");
      overlay.style.cssText = "position:fixed;inset:0;z-index:2147483647;display:flex;align-items:center;justify-content:center;background:" + {color} + ";font:600 28px sans-serif;color:#5b3a1a;";
      overlay.textContent = {title};
      root.appendChild(overlay);
      return true;
    }};
    if (attach()) return;
    var observer = new MutationObserver(function () {{
      try {{
        if (attach()) {{
          observer.disconnect();
          window[pending] = null;
        }}
      }} catch (_) {{
        observer.disconnect();
      }}
    }});
    observer.observe(document, {{ childList: true, subtree: true }});
    window[pending] = observer;
  }} catch (_) {{}}
}})();"#,
        id = js_string(SPLASH_ELEMENT_ID),
        key = js_string(SPLASH_DISMISSED_KEY),
        pending = js_string(SPLASH_PENDING_PROPERTY),
        color = js_string(SPLASH_BACKGROUND_COLOR),
        title = js_string(title),
    )
}

/// Removes the overlay and cancels an insertion that is still waiting.
pub(crate) fn splash_overlay_hide_script() -> String {
    format!(
        r#"(function () {{
  try {{
    window.sessionStorage.setItem({key}, "1");
  }} catch (_) {{}}
  try {{
    var observer = window[{pending}];
    if (observer) {{
      observer.disconnect();
      window[{pending}] = null;
    }}
    var overlay = document.getElementById({id});
    if (overlay) overlay.remove();
  }} catch (_) {{}}
}})();"#,
        id = js_string(SPLASH_ELEMENT_ID),
        key = js_string(SPLASH_DISMISSED_KEY),
        pending = js_string(SPLASH_PENDING_PROPERTY),
    )
}

pub(crate) struct WebviewSplashOverlay<'a, R: Runtime> {
    webview: &'a Webview<R>,
}

impl<'a, R: Runtime> WebviewSplashOverlay<'a, R> {
    pub(crate) fn new(webview: &'a Webview<R>) -> Self {
        Self { webview }
    }
}

impl<R: Runtime> SplashOverlay for WebviewSplashOverlay<'_, R> {
    fn hide(&self) -> Result<(), String> {
        self.webview
            .eval(splash_overlay_hide_script().as_str())
            .map_err(|error| format!("Failed to hide splash overlay: {error}"))
    }
}

/// Page-finished handling: the state flips once, the hide request is repeated harmlessly.
pub(crate) fn handle_page_finished<O, F>(state: &WindowState, overlay: &O, log: F)
where
    O: SplashOverlay + ?Sized,
    F: Fn(&str),
{
    if state.dismiss_splash() {
        log("first page load finished; hiding splash overlay");
    }

    if let Err(error) = overlay.hide() {
        log(&error);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingOverlay {
        hides: AtomicUsize,
    }

    impl SplashOverlay for CountingOverlay {
        fn hide(&self) -> Result<(), String> {
            self.hides.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn handle_page_finished_hides_splash_once_and_stays_hidden() {
        let state = WindowState::default();
        let overlay = CountingOverlay::default();
        let messages = std::sync::Mutex::new(Vec::new());
        let log = |message: &str| messages.lock().unwrap().push(message.to_string());

        assert!(state.is_splash_visible());
        handle_page_finished(&state, &overlay, log);
        assert!(!state.is_splash_visible());
        handle_page_finished(&state, &overlay, log);
        assert!(!state.is_splash_visible());

        assert_eq!(overlay.hides.load(Ordering::SeqCst), 2);
        assert_eq!(messages.into_inner().unwrap().len(), 1);
    }

    #[test]
    fn splash_scripts_reference_the_same_element_and_key() {
        let init = splash_overlay_init_script("Story \"Time\"");
        let hide = splash_overlay_hide_script();

        for script in [&init, &hide] {
            assert!(script.contains(&js_string(SPLASH_ELEMENT_ID)));
            assert!(script.contains(&js_string(SPLASH_DISMISSED_KEY)));
        }
        assert!(init.contains(r#""Story \"Time\"""#));
    }

    #[test]
    fn splash_init_script_waits_for_a_parse_root() {
        let init = splash_overlay_init_script("StoryTime");

        assert!(init.contains("document.body || document.documentElement"));
        assert!(init.contains("if (!root) return false;"));
        assert!(!init.contains("document.documentElement.appendChild"));
        assert!(init.contains("new MutationObserver"));
        assert!(init.contains("window[pending] = observer;"));
        assert!(init.contains(&js_string(SPLASH_PENDING_PROPERTY)));
    }

    #[test]
    fn splash_hide_script_cancels_pending_insert() {
        let hide = splash_overlay_hide_script();
        let pending = format!("window[{}]", js_string(SPLASH_PENDING_PROPERTY));

        assert!(hide.contains(&format!("var observer = {pending};")));
        assert!(hide.contains("observer.disconnect();"));
        let cancel = hide.find("observer.disconnect()").unwrap();
        let remove = hide.find("overlay.remove()").unwrap();
        assert!(cancel < remove);
    }
}
