use url::Url;

use crate::INTERNAL_APP_ORIGINS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigationDecision {
    /// Let the embedded browser load the address.
    Proceed,
    /// Cancel in-browser navigation; the address goes to the system handler.
    Intercept,
}

pub(crate) trait NavigationPolicy: Send + Sync {
    fn decide(&self, address: &Url) -> NavigationDecision;
}

pub(crate) trait ExternalOpener {
    fn open_external(&self, address: &Url) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InternalOrigin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl InternalOrigin {
    fn from_url(url: &Url) -> Option<Self> {
        Some(Self {
            scheme: url.scheme().to_string(),
            host: url.host_str()?.to_ascii_lowercase(),
            port: url.port_or_known_default(),
        })
    }

    fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url
                .host_str()
                .is_some_and(|host| host.eq_ignore_ascii_case(&self.host))
            && url.port_or_known_default() == self.port
    }
}

/// Web links leave the shell; everything else, including the shell's own
/// asset origins, stays in the embedded browser.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExternalLinkPolicy {
    internal_origins: Vec<InternalOrigin>,
}

impl ExternalLinkPolicy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Treat `origin` as part of the bundled app even though it is served over http(s).
    pub(crate) fn with_internal_origin(mut self, origin: &Url) -> Self {
        if let Some(origin) = InternalOrigin::from_url(origin) {
            if !self.internal_origins.contains(&origin) {
                self.internal_origins.push(origin);
            }
        }
        self
    }

    fn is_internal(&self, address: &Url) -> bool {
        self.internal_origins
            .iter()
            .any(|origin| origin.contains(address))
    }
}

impl NavigationPolicy for ExternalLinkPolicy {
    fn decide(&self, address: &Url) -> NavigationDecision {
        match address.scheme() {
            "http" | "https" if !self.is_internal(address) => NavigationDecision::Intercept,
            _ => NavigationDecision::Proceed,
        }
    }
}

/// The policy the main window runs with: the app's own asset origins, plus
/// the dev server while developing.
pub(crate) fn shell_navigation_policy(dev_url: Option<&Url>) -> ExternalLinkPolicy {
    let mut policy = ExternalLinkPolicy::new();
    for raw_origin in INTERNAL_APP_ORIGINS {
        if let Ok(origin) = Url::parse(raw_origin) {
            policy = policy.with_internal_origin(&origin);
        }
    }
    if let Some(dev_url) = dev_url {
        policy = policy.with_internal_origin(dev_url);
    }
    policy
}

/// Applies `policy` to a navigation attempt. Returns whether the embedded
/// browser may continue loading `address`.
pub(crate) fn route_navigation<P, O, F>(policy: &P, opener: &O, address: &Url, log: F) -> bool
where
    P: NavigationPolicy + ?Sized,
    O: ExternalOpener + ?Sized,
    F: Fn(&str),
{
    match policy.decide(address) {
        NavigationDecision::Proceed => true,
        NavigationDecision::Intercept => {
            match opener.open_external(address) {
                Ok(()) => log(&format!("opened external link: {address}")),
                Err(error) => log(&format!("failed to open external link {address}: {error}")),
            }
            false
        }
    }
}
