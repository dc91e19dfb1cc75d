//! Android platform calls made through JNI: browser settings the Tauri
//! builder does not expose, the shared cookie store, the connectivity
//! service, and in-page history of the activity's WebView.

use jni::{
    objects::{JObject, JString, JValue, JValueOwned},
    JNIEnv, JavaVM,
};

use crate::{
    connectivity::{Capability, ConnectivityService, NetworkCapabilities, Transport},
    lifecycle_monitor::CookieStore,
    session_history::BrowserHistory,
    webview_settings::{user_agent_with_suffix, WebviewSettings},
};

const FLAG_KEEP_SCREEN_ON: i32 = 0x0000_0080;
const FLAG_HARDWARE_ACCELERATED: i32 = 0x0100_0000;
const LAYER_TYPE_HARDWARE: i32 = 2;
const NET_CAPABILITY_INTERNET: i32 = 12;
const ANDROID_TRANSPORTS: [(i32, Transport); 5] = [
    (0, Transport::Cellular),
    (1, Transport::Wifi),
    (2, Transport::Bluetooth),
    (3, Transport::Ethernet),
    (4, Transport::Vpn),
];

struct JniFailure(String);

impl From<jni::errors::Error> for JniFailure {
    fn from(error: jni::errors::Error) -> Self {
        Self(error.to_string())
    }
}

impl From<String> for JniFailure {
    fn from(message: String) -> Self {
        Self(message)
    }
}

fn clear_pending_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

fn call_method<'local>(
    env: &mut JNIEnv<'local>,
    target: &JObject,
    name: &str,
    sig: &str,
    args: &[JValue],
) -> Result<JValueOwned<'local>, String> {
    env.call_method(target, name, sig, args).map_err(|error| {
        clear_pending_exception(env);
        format!("{name}{sig} failed: {error}")
    })
}

fn call_void(
    env: &mut JNIEnv,
    target: &JObject,
    name: &str,
    sig: &str,
    args: &[JValue],
) -> Result<(), String> {
    call_method(env, target, name, sig, args)?
        .v()
        .map_err(|error| format!("{name} returned unexpected value: {error}"))
}

fn call_bool(
    env: &mut JNIEnv,
    target: &JObject,
    name: &str,
    sig: &str,
    args: &[JValue],
) -> Result<bool, String> {
    call_method(env, target, name, sig, args)?
        .z()
        .map_err(|error| format!("{name} returned unexpected value: {error}"))
}

fn call_object<'local>(
    env: &mut JNIEnv<'local>,
    target: &JObject,
    name: &str,
    sig: &str,
    args: &[JValue],
) -> Result<JObject<'local>, String> {
    call_method(env, target, name, sig, args)?
        .l()
        .map_err(|error| format!("{name} returned unexpected value: {error}"))
}

fn set_flag(env: &mut JNIEnv, settings: &JObject, setter: &str, value: bool) -> Result<(), String> {
    call_void(env, settings, setter, "(Z)V", &[JValue::Bool(u8::from(value))])
}

/// Runs `f` with an attached JNI environment and the application context.
fn with_android_env<T, F>(f: F) -> Result<T, String>
where
    F: for<'local> FnOnce(&mut JNIEnv<'local>, &JObject) -> Result<T, JniFailure>,
{
    let context = ndk_context::android_context();
    if context.vm().is_null() || context.context().is_null() {
        return Err("Android context is not initialized.".to_string());
    }

    // SAFETY: ndk-context holds the process JavaVM and a global ref to the
    // activity context for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(context.vm().cast()) }
        .map_err(|error| format!("Failed to access JavaVM: {error}"))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|error| format!("Failed to attach JNI thread: {error}"))?;
    // SAFETY: see above; the reference is borrowed, never deleted.
    let android_context = unsafe { JObject::from_raw(context.context().cast()) };

    env.with_local_frame(32, |env| f(env, &android_context))
        .map_err(|JniFailure(message)| message)
}

fn apply_step<F>(label: &str, result: Result<(), String>, log: &F)
where
    F: Fn(&str),
{
    if let Err(error) = result {
        log(&format!("webview setting '{label}' skipped: {error}"));
    }
}

fn apply_window_flags(
    env: &mut JNIEnv,
    activity: &JObject,
    settings: &WebviewSettings,
) -> Result<(), String> {
    let window = call_object(env, activity, "getWindow", "()Landroid/view/Window;", &[])?;
    if window.is_null() {
        return Err("activity has no window".to_string());
    }
    if settings.keep_screen_on {
        call_void(env, &window, "addFlags", "(I)V", &[JValue::Int(FLAG_KEEP_SCREEN_ON)])?;
    }
    if settings.hardware_accelerated {
        call_void(
            env,
            &window,
            "setFlags",
            "(II)V",
            &[
                JValue::Int(FLAG_HARDWARE_ACCELERATED),
                JValue::Int(FLAG_HARDWARE_ACCELERATED),
            ],
        )?;
    }
    Ok(())
}

fn append_user_agent(env: &mut JNIEnv, web_settings: &JObject, suffix: &str) -> Result<(), String> {
    let current = call_object(
        env,
        web_settings,
        "getUserAgentString",
        "()Ljava/lang/String;",
        &[],
    )?;
    let current: String = if current.is_null() {
        String::new()
    } else {
        env.get_string(&JString::from(current))
            .map_err(|error| format!("Failed to read user agent: {error}"))?
            .into()
    };

    let updated = env
        .new_string(user_agent_with_suffix(&current, suffix))
        .map_err(|error| format!("Failed to allocate user agent string: {error}"))?;
    call_void(
        env,
        web_settings,
        "setUserAgentString",
        "(Ljava/lang/String;)V",
        &[JValue::Object(updated.as_ref())],
    )
}

/// Applies `settings` to the activity window and its WebView. Each step is
/// independent; a failing step is logged and the rest still run.
pub(crate) fn apply_webview_settings<F>(
    env: &mut JNIEnv,
    activity: &JObject,
    webview: &JObject,
    settings: &WebviewSettings,
    log: F,
) where
    F: Fn(&str),
{
    apply_step("window flags", apply_window_flags(env, activity, settings), &log);

    if settings.hardware_accelerated {
        apply_step(
            "hardware layer",
            call_void(
                env,
                webview,
                "setLayerType",
                "(ILandroid/graphics/Paint;)V",
                &[JValue::Int(LAYER_TYPE_HARDWARE), JValue::Object(&JObject::null())],
            ),
            &log,
        );
    }

    let web_settings = match call_object(
        env,
        webview,
        "getSettings",
        "()Landroid/webkit/WebSettings;",
        &[],
    ) {
        Ok(web_settings) if !web_settings.is_null() => web_settings,
        Ok(_) => {
            log("webview returned no settings object; browser flags not applied");
            return;
        }
        Err(error) => {
            log(&format!("failed to read webview settings: {error}"));
            return;
        }
    };

    // IndexedDB has no switch of its own on current WebView releases; it
    // follows the JavaScript and DOM storage flags.
    let flags = [
        ("setJavaScriptEnabled", settings.javascript),
        ("setDomStorageEnabled", settings.dom_storage || settings.indexed_db),
        ("setDatabaseEnabled", settings.database),
        ("setAllowFileAccess", settings.file_access),
        ("setAllowContentAccess", settings.content_access),
        ("setSupportZoom", settings.zoom_support),
        ("setBuiltInZoomControls", settings.builtin_zoom_controls),
        ("setDisplayZoomControls", settings.display_zoom_controls),
    ];
    for (setter, value) in flags {
        apply_step(setter, set_flag(env, &web_settings, setter, value), &log);
    }

    apply_step(
        "mixed content",
        call_void(
            env,
            &web_settings,
            "setMixedContentMode",
            "(I)V",
            &[JValue::Int(settings.android_mixed_content_mode())],
        ),
        &log,
    );
    apply_step(
        "user agent",
        append_user_agent(env, &web_settings, &settings.user_agent_suffix),
        &log,
    );
}

/// The activity WebView's own back stack.
pub(crate) struct JniWebviewHistory<'a, 'env, 'obj> {
    env: &'a mut JNIEnv<'env>,
    webview: &'a JObject<'obj>,
}

impl<'a, 'env, 'obj> JniWebviewHistory<'a, 'env, 'obj> {
    pub(crate) fn new(env: &'a mut JNIEnv<'env>, webview: &'a JObject<'obj>) -> Self {
        Self { env, webview }
    }
}

impl BrowserHistory for JniWebviewHistory<'_, '_, '_> {
    fn can_go_back(&mut self) -> bool {
        call_bool(self.env, self.webview, "canGoBack", "()Z", &[]).unwrap_or(false)
    }

    fn go_back(&mut self) {
        let _ = call_void(self.env, self.webview, "goBack", "()V", &[]);
    }
}

/// Platform default for an unconsumed back press: close the activity.
pub(crate) fn finish_activity(env: &mut JNIEnv, activity: &JObject) -> Result<(), String> {
    call_void(env, activity, "finish", "()V", &[])
}

/// `android.webkit.CookieManager`, shared by every WebView in the process.
#[derive(Debug, Default)]
pub(crate) struct AndroidCookieStore;

impl CookieStore for AndroidCookieStore {
    fn enable_persistent_cookies(&self) -> Result<(), String> {
        with_android_env(|env, _context| {
            let manager = env
                .call_static_method(
                    "android/webkit/CookieManager",
                    "getInstance",
                    "()Landroid/webkit/CookieManager;",
                    &[],
                )?
                .l()?;
            if manager.is_null() {
                return Err(JniFailure("CookieManager unavailable".to_string()));
            }
            set_flag(env, &manager, "setAcceptCookie", true)?;
            call_void(env, &manager, "flush", "()V", &[])?;
            Ok(())
        })
    }
}

/// `android.net.ConnectivityManager`, queried fresh on every call.
#[derive(Debug, Default)]
pub(crate) struct AndroidConnectivity;

fn query_active_network(
    env: &mut JNIEnv,
    context: &JObject,
) -> Result<Option<NetworkCapabilities>, JniFailure> {
    let service_name = env.new_string("connectivity")?;
    let manager = call_object(
        env,
        context,
        "getSystemService",
        "(Ljava/lang/String;)Ljava/lang/Object;",
        &[JValue::Object(service_name.as_ref())],
    )?;
    if manager.is_null() {
        return Ok(None);
    }

    let network = call_object(env, &manager, "getActiveNetwork", "()Landroid/net/Network;", &[])?;
    if network.is_null() {
        return Ok(None);
    }

    let capabilities = call_object(
        env,
        &manager,
        "getNetworkCapabilities",
        "(Landroid/net/Network;)Landroid/net/NetworkCapabilities;",
        &[JValue::Object(&network)],
    )?;
    if capabilities.is_null() {
        return Ok(None);
    }

    let mut transports = Vec::new();
    for (code, transport) in ANDROID_TRANSPORTS {
        if call_bool(env, &capabilities, "hasTransport", "(I)Z", &[JValue::Int(code)])? {
            transports.push(transport);
        }
    }
    let mut granted = Vec::new();
    if call_bool(
        env,
        &capabilities,
        "hasCapability",
        "(I)Z",
        &[JValue::Int(NET_CAPABILITY_INTERNET)],
    )? {
        granted.push(Capability::Internet);
    }

    Ok(Some(NetworkCapabilities::new(&transports, &granted)))
}

impl ConnectivityService for AndroidConnectivity {
    fn active_network(&self) -> Option<NetworkCapabilities> {
        with_android_env(query_active_network).ok().flatten()
    }
}
