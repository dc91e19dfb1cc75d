use std::{env, path::PathBuf, time::Duration};

use crate::{
    connectivity::Transport, DEFAULT_NETWORK_POLL_MS, DEFAULT_START_PAGE, LOG_DIR_ENV,
    MIN_NETWORK_POLL_MS, NETWORK_POLL_MS_ENV, NETWORK_TRANSPORT_ENV, START_PAGE_ENV,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NetworkOverride {
    Offline,
    Transport(Transport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShellConfig {
    pub(crate) start_page: String,
    pub(crate) log_dir: Option<PathBuf>,
    pub(crate) network_poll_interval: Duration,
    pub(crate) network_override: Option<NetworkOverride>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_page: DEFAULT_START_PAGE.to_string(),
            log_dir: None,
            network_poll_interval: Duration::from_millis(DEFAULT_NETWORK_POLL_MS),
            network_override: None,
        }
    }
}

impl ShellConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            start_page: normalize_start_page(lookup(START_PAGE_ENV).as_deref()),
            log_dir: lookup(LOG_DIR_ENV)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            network_poll_interval: parse_poll_interval(lookup(NETWORK_POLL_MS_ENV).as_deref()),
            network_override: lookup(NETWORK_TRANSPORT_ENV)
                .as_deref()
                .and_then(parse_network_override),
        }
    }
}

/// Bundled document path relative to the frontend root. Remote or empty values fall back.
pub(crate) fn normalize_start_page(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return DEFAULT_START_PAGE.to_string();
    };
    if raw.contains("://") {
        return DEFAULT_START_PAGE.to_string();
    }

    let trimmed = raw.trim_start_matches('/');
    if trimmed.is_empty() {
        DEFAULT_START_PAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn parse_poll_interval(raw: Option<&str>) -> Duration {
    let millis = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_NETWORK_POLL_MS)
        .max(MIN_NETWORK_POLL_MS);
    Duration::from_millis(millis)
}

pub(crate) fn parse_network_override(raw: &str) -> Option<NetworkOverride> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("offline") || raw.eq_ignore_ascii_case("none") {
        return Some(NetworkOverride::Offline);
    }
    Transport::parse(raw).map(NetworkOverride::Transport)
}
