use crate::PRODUCT_IDENTIFIER;

pub(crate) const SHELL_BRIDGE_GLOBAL: &str = "storytimeShell";

/// Event the Android app plugin emits instead of its default back handling
/// once a listener is registered.
const BACK_BUTTON_EVENT: &str = "back-button";
const SYSTEM_BACK_COMMAND: &str = "shell_handle_system_back";

/// Exposes the shell commands to the hosted page as `window.storytimeShell`.
pub(crate) fn shell_bridge_init_script() -> String {
    let global = serde_json::to_string(SHELL_BRIDGE_GLOBAL).unwrap_or_default();
    let product = serde_json::to_string(PRODUCT_IDENTIFIER).unwrap_or_default();
    format!(
        r#"(function () {{
  var name = {global};
  if (window[name]) return;
  var invoke = function (command, args) {{
    var internals = window.__TAURI_INTERNALS__;
    if (!internals || typeof internals.invoke !== "function") {{
      return Promise.reject(new Error("shell bridge unavailable"));
    }}
    return internals.invoke(command, args || {{}});
  }};
  Object.defineProperty(window, name, {{
    configurable: false,
    enumerable: false,
    value: Object.freeze({{
      isShellRuntime: true,
      productIdentifier: {product},
      isNetworkAvailable: function () {{ return invoke("shell_is_network_available"); }},
      getState: function () {{ return invoke("shell_get_state"); }},
      openExternalUrl: function (url) {{ return invoke("shell_open_external_url", {{ url: url }}); }},
      navigateBack: function () {{ return invoke("shell_navigate_back"); }}
    }})
  }});
}})();"#
    )
}

/// Routes the platform back button to the shell's own back handling.
///
/// If registration fails the activity keeps its built-in behavior, which
/// steps back the same way and closes on an empty history.
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub(crate) fn system_back_init_script() -> String {
    let event = serde_json::to_string(BACK_BUTTON_EVENT).unwrap_or_default();
    let command = serde_json::to_string(SYSTEM_BACK_COMMAND).unwrap_or_default();
    format!(
        r#"(function () {{
  var register = function () {{
    var internals = window.__TAURI_INTERNALS__;
    if (!internals || typeof internals.transformCallback !== "function") return false;
    var id = internals.transformCallback(function () {{
      internals.invoke({command}, {{}}).catch(function () {{}});
    }}, false);
    internals
      .invoke("plugin:app|registerListener", {{ event: {event}, handler: "__CHANNEL__:" + id }})
      .catch(function () {{}});
    return true;
  }};
  try {{
    if (!register()) {{
      document.addEventListener("DOMContentLoaded", function () {{
        try {{ register(); }} catch (_) {{}}
      }}, {{ once: true }});
    }}
  }} catch (_) {{}}
}})();"#
    )
}
