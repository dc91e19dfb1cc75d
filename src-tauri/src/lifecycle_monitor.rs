//! Process-wide setup: cookie policy and network reachability.
//!
//! One [`LifecycleMonitor`] is built during application setup and stored in
//! Tauri managed state; everything that needs reachability receives it from
//! there instead of a global.

use std::{sync::Arc, time::Duration};

use crate::{
    connectivity::{self, ConnectivityService, NetworkObserver, NetworkRequest},
    connectivity_watcher::NetworkWatcher,
};

pub(crate) trait CookieStore {
    /// Persist cookies across launches and accept every cookie offered.
    fn enable_persistent_cookies(&self) -> Result<(), String>;
}

/// Desktop webviews keep cookies in the app data directory and accept them
/// by default; there is no separate store to configure.
#[cfg(not(target_os = "android"))]
#[derive(Debug, Default)]
pub(crate) struct DesktopCookieStore;

#[cfg(not(target_os = "android"))]
impl CookieStore for DesktopCookieStore {
    fn enable_persistent_cookies(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Extension points for connectivity changes. Intentionally inert apart from logging.
pub(crate) struct LifecycleHooks<F>
where
    F: Fn(&str) + Send + Sync,
{
    log: F,
}

impl<F> LifecycleHooks<F>
where
    F: Fn(&str) + Send + Sync,
{
    pub(crate) fn new(log: F) -> Self {
        Self { log }
    }
}

impl<F> NetworkObserver for LifecycleHooks<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn on_available(&self) {
        (self.log)("network available");
    }

    fn on_lost(&self) {
        (self.log)("network lost");
    }
}

pub(crate) struct LifecycleMonitor {
    connectivity: Arc<dyn ConnectivityService>,
    _watcher: Option<NetworkWatcher>,
}

impl LifecycleMonitor {
    pub(crate) fn initialize<C, F>(
        connectivity: Arc<dyn ConnectivityService>,
        cookies: &C,
        observer: Arc<dyn NetworkObserver>,
        poll_interval: Duration,
        log: F,
    ) -> Self
    where
        C: CookieStore + ?Sized,
        F: Fn(&str),
    {
        match cookies.enable_persistent_cookies() {
            Ok(()) => log("persistent cookies enabled"),
            Err(error) => log(&format!("failed to enable persistent cookies: {error}")),
        }

        let watcher = match NetworkWatcher::spawn(
            Arc::clone(&connectivity),
            NetworkRequest::internet_over_wifi_or_cellular(),
            observer,
            poll_interval,
        ) {
            Ok(watcher) => {
                log(&format!(
                    "network observer registered (interval {} ms)",
                    poll_interval.as_millis()
                ));
                Some(watcher)
            }
            Err(error) => {
                log(&format!("failed to register network observer: {error}"));
                None
            }
        };

        Self {
            connectivity,
            _watcher: watcher,
        }
    }

    pub(crate) fn is_network_available(&self) -> bool {
        connectivity::is_reachable(self.connectivity.active_network().as_ref())
    }

    /// Reachability and transports from a single platform query.
    pub(crate) fn network_snapshot(&self) -> NetworkSnapshot {
        let network = self.connectivity.active_network();
        NetworkSnapshot {
            available: connectivity::is_reachable(network.as_ref()),
            transports: network
                .map(|network| network.transports)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NetworkSnapshot {
    pub(crate) available: bool,
    pub(crate) transports: Vec<connectivity::Transport>,
}

/// Reachability for an optional monitor; no monitor means not reachable.
pub(crate) fn is_network_available(monitor: Option<&LifecycleMonitor>) -> bool {
    monitor.is_some_and(LifecycleMonitor::is_network_available)
}

pub(crate) fn network_snapshot(monitor: Option<&LifecycleMonitor>) -> NetworkSnapshot {
    monitor
        .map(LifecycleMonitor::network_snapshot)
        .unwrap_or_default()
}
