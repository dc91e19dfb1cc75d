use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Transport {
    Wifi,
    Cellular,
    Bluetooth,
    Ethernet,
    Vpn,
}

impl Transport {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wifi" | "wlan" => Some(Self::Wifi),
            "cellular" | "mobile" | "wwan" => Some(Self::Cellular),
            "bluetooth" => Some(Self::Bluetooth),
            "ethernet" => Some(Self::Ethernet),
            "vpn" => Some(Self::Vpn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Capability {
    Internet,
}

/// Point-in-time description of the active network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NetworkCapabilities {
    pub(crate) transports: Vec<Transport>,
    pub(crate) capabilities: Vec<Capability>,
}

impl NetworkCapabilities {
    pub(crate) fn new(transports: &[Transport], capabilities: &[Capability]) -> Self {
        Self {
            transports: transports.to_vec(),
            capabilities: capabilities.to_vec(),
        }
    }

    pub(crate) fn has_transport(&self, transport: Transport) -> bool {
        self.transports.contains(&transport)
    }

    pub(crate) fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Subscription filter: every capability is required, any one transport is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NetworkRequest {
    pub(crate) capabilities: Vec<Capability>,
    pub(crate) transports: Vec<Transport>,
}

impl NetworkRequest {
    /// Internet-capable networks over WiFi or cellular.
    pub(crate) fn internet_over_wifi_or_cellular() -> Self {
        Self {
            capabilities: vec![Capability::Internet],
            transports: vec![Transport::Wifi, Transport::Cellular],
        }
    }

    pub(crate) fn matches(&self, network: &NetworkCapabilities) -> bool {
        let has_capabilities = self
            .capabilities
            .iter()
            .all(|capability| network.has_capability(*capability));
        let has_transport = self.transports.is_empty()
            || self
                .transports
                .iter()
                .any(|transport| network.has_transport(*transport));
        has_capabilities && has_transport
    }
}

pub(crate) trait ConnectivityService: Send + Sync {
    /// Capabilities of the currently active network, queried fresh from the platform.
    fn active_network(&self) -> Option<NetworkCapabilities>;
}

/// Receives change notifications for networks matching a [`NetworkRequest`].
pub(crate) trait NetworkObserver: Send + Sync {
    fn on_available(&self) {}
    fn on_lost(&self) {}
}

pub(crate) fn is_reachable(network: Option<&NetworkCapabilities>) -> bool {
    network.is_some_and(|network| {
        network.has_transport(Transport::Wifi) || network.has_transport(Transport::Cellular)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_reachable_requires_wifi_or_cellular_transport() {
        let wifi = NetworkCapabilities::new(&[Transport::Wifi], &[Capability::Internet]);
        let cellular = NetworkCapabilities::new(&[Transport::Cellular], &[]);
        let ethernet = NetworkCapabilities::new(&[Transport::Ethernet], &[Capability::Internet]);
        let bluetooth = NetworkCapabilities::new(&[Transport::Bluetooth], &[Capability::Internet]);

        assert!(is_reachable(Some(&wifi)));
        assert!(is_reachable(Some(&cellular)));
        assert!(!is_reachable(Some(&ethernet)));
        assert!(!is_reachable(Some(&bluetooth)));
        assert!(!is_reachable(None));
    }

    #[test]
    fn network_request_requires_capability_and_any_transport() {
        let request = NetworkRequest::internet_over_wifi_or_cellular();

        assert!(request.matches(&NetworkCapabilities::new(
            &[Transport::Cellular, Transport::Vpn],
            &[Capability::Internet],
        )));
        assert!(!request.matches(&NetworkCapabilities::new(&[Transport::Wifi], &[])));
        assert!(!request.matches(&NetworkCapabilities::new(
            &[Transport::Ethernet],
            &[Capability::Internet],
        )));
    }

    #[test]
    fn transport_parse_accepts_aliases() {
        assert_eq!(Transport::parse(" WiFi "), Some(Transport::Wifi));
        assert_eq!(Transport::parse("wwan"), Some(Transport::Cellular));
        assert_eq!(Transport::parse("ethernet"), Some(Transport::Ethernet));
        assert_eq!(Transport::parse("carrier-pigeon"), None);
    }
}
