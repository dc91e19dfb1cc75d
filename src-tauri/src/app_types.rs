use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::{connectivity::Transport, session_history::SessionHistory};

#[derive(Debug)]
pub(crate) struct WindowState {
    splash_visible: AtomicBool,
    pub(crate) history: Mutex<SessionHistory>,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            splash_visible: AtomicBool::new(true),
            history: Mutex::new(SessionHistory::default()),
        }
    }
}

impl WindowState {
    pub(crate) fn is_splash_visible(&self) -> bool {
        self.splash_visible.load(Ordering::Acquire)
    }

    /// Returns true only for the call that actually flips the overlay to hidden.
    pub(crate) fn dismiss_splash(&self) -> bool {
        self.splash_visible
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShellBridgeState {
    pub(crate) splash_visible: bool,
    pub(crate) network_available: bool,
    pub(crate) active_transports: Vec<Transport>,
    pub(crate) product_identifier: &'static str,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct ShellBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl ShellBridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: String) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct BackNavigationResult {
    pub(crate) consumed: bool,
}
