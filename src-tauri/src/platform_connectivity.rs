use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    connectivity::{Capability, ConnectivityService, NetworkCapabilities, Transport},
    shell_config::{NetworkOverride, ShellConfig},
};

const RTF_UP: u32 = 0x0001;

/// Fixed answer chosen through `STORYTIME_NETWORK_TRANSPORT`.
#[derive(Debug, Clone)]
pub(crate) struct StaticConnectivity {
    network: Option<NetworkCapabilities>,
}

impl StaticConnectivity {
    pub(crate) fn from_override(network_override: NetworkOverride) -> Self {
        let network = match network_override {
            NetworkOverride::Offline => None,
            NetworkOverride::Transport(transport) => Some(NetworkCapabilities::new(
                &[transport],
                &[Capability::Internet],
            )),
        };
        Self { network }
    }
}

impl ConnectivityService for StaticConnectivity {
    fn active_network(&self) -> Option<NetworkCapabilities> {
        self.network.clone()
    }
}

/// Reports no active network; used where the platform offers nothing to query.
#[cfg(not(any(target_os = "android", target_os = "linux")))]
#[derive(Debug, Default)]
pub(crate) struct UnknownConnectivity;

#[cfg(not(any(target_os = "android", target_os = "linux")))]
impl ConnectivityService for UnknownConnectivity {
    fn active_network(&self) -> Option<NetworkCapabilities> {
        None
    }
}

/// Default-route interface from procfs, transport from sysfs.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
#[derive(Debug, Clone)]
pub(crate) struct LinuxRouteConnectivity {
    proc_root: PathBuf,
    sys_class_net: PathBuf,
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
impl Default for LinuxRouteConnectivity {
    fn default() -> Self {
        Self::with_roots(PathBuf::from("/proc"), PathBuf::from("/sys/class/net"))
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
impl LinuxRouteConnectivity {
    pub(crate) fn with_roots(proc_root: PathBuf, sys_class_net: PathBuf) -> Self {
        Self {
            proc_root,
            sys_class_net,
        }
    }
}

impl ConnectivityService for LinuxRouteConnectivity {
    fn active_network(&self) -> Option<NetworkCapabilities> {
        let routes = fs::read_to_string(self.proc_root.join("net").join("route")).ok()?;
        let interface = parse_default_route_interface(&routes)?;
        let transport = classify_interface(&self.sys_class_net.join(&interface));
        Some(NetworkCapabilities::new(&[transport], &[Capability::Internet]))
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn parse_default_route_interface(routes: &str) -> Option<String> {
    routes.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (interface, destination, flags) = (fields.first()?, fields.get(1)?, fields.get(3)?);
        let flags = u32::from_str_radix(flags, 16).ok()?;
        (*destination == "00000000" && flags & RTF_UP != 0).then(|| interface.to_string())
    })
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn classify_interface(interface_dir: &Path) -> Transport {
    if interface_dir.join("wireless").exists() || interface_dir.join("phy80211").exists() {
        return Transport::Wifi;
    }

    let devtype = fs::read_to_string(interface_dir.join("uevent"))
        .ok()
        .and_then(|uevent| {
            uevent
                .lines()
                .find_map(|line| line.strip_prefix("DEVTYPE=").map(str::to_string))
        });
    match devtype.as_deref() {
        Some("wlan") => Transport::Wifi,
        Some("wwan") => Transport::Cellular,
        Some("bluetooth") => Transport::Bluetooth,
        _ if interface_dir.join("tun_flags").exists() => Transport::Vpn,
        _ => Transport::Ethernet,
    }
}

/// Picks the connectivity service for this platform, honoring the configured override.
pub(crate) fn system_connectivity<F>(config: &ShellConfig, log: F) -> Arc<dyn ConnectivityService>
where
    F: Fn(&str),
{
    if let Some(network_override) = config.network_override {
        log(&format!("connectivity override active: {network_override:?}"));
        return Arc::new(StaticConnectivity::from_override(network_override));
    }

    #[cfg(target_os = "android")]
    {
        log("connectivity service: android ConnectivityManager");
        Arc::new(crate::android_platform::AndroidConnectivity)
    }

    #[cfg(target_os = "linux")]
    {
        log("connectivity service: linux default route");
        Arc::new(LinuxRouteConnectivity::default())
    }

    #[cfg(not(any(target_os = "android", target_os = "linux")))]
    {
        log("connectivity service unavailable on this platform; reachability reports false");
        Arc::new(UnknownConnectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE_TABLE: &str = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
docker0\t000011AC\t00000000\t0001\t0\t0\t0\t0000FFFF\t0\t0\t0
wlp2s0\t00000000\t0101A8C0\t0003\t0\t0\t600\t00000000\t0\t0\t0
wlp2s0\t0001A8C0\t00000000\t0001\t0\t0\t600\t00FFFFFF\t0\t0\t0
";

    #[test]
    fn parse_default_route_interface_picks_up_default_route() {
        assert_eq!(
            parse_default_route_interface(ROUTE_TABLE),
            Some("wlp2s0".to_string())
        );
    }

    #[test]
    fn parse_default_route_interface_ignores_down_routes() {
        let table = "Iface\tDestination\tGateway\tFlags\neth0\t00000000\t0101A8C0\t0002\n";
        assert_eq!(parse_default_route_interface(table), None);
        assert_eq!(parse_default_route_interface("Iface\tDestination\n"), None);
    }

    #[test]
    fn classify_interface_reads_sysfs_markers() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let wifi = temp.path().join("wlp2s0");
        fs::create_dir_all(wifi.join("wireless")).expect("create wireless dir");
        let modem = temp.path().join("wwan0");
        fs::create_dir_all(&modem).expect("create wwan dir");
        fs::write(modem.join("uevent"), "DEVTYPE=wwan\nINTERFACE=wwan0\n").expect("write uevent");
        let wired = temp.path().join("eth0");
        fs::create_dir_all(&wired).expect("create eth dir");
        fs::write(wired.join("uevent"), "INTERFACE=eth0\n").expect("write uevent");

        assert_eq!(classify_interface(&wifi), Transport::Wifi);
        assert_eq!(classify_interface(&modem), Transport::Cellular);
        assert_eq!(classify_interface(&wired), Transport::Ethernet);
    }

    #[test]
    fn linux_route_connectivity_reports_default_route_transport() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let proc_root = temp.path().join("proc");
        let sys_class_net = temp.path().join("sys");
        fs::create_dir_all(proc_root.join("net")).expect("create proc/net");
        fs::write(proc_root.join("net").join("route"), ROUTE_TABLE).expect("write route");
        fs::create_dir_all(sys_class_net.join("wlp2s0").join("phy80211")).expect("create phy");

        let service = LinuxRouteConnectivity::with_roots(proc_root, sys_class_net);
        let network = service.active_network().expect("active network");
        assert!(network.has_transport(Transport::Wifi));
        assert!(network.has_capability(Capability::Internet));
    }

    #[test]
    fn linux_route_connectivity_without_route_table_reports_none() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let service =
            LinuxRouteConnectivity::with_roots(temp.path().join("proc"), temp.path().join("sys"));
        assert_eq!(service.active_network(), None);
    }

    #[test]
    fn static_connectivity_follows_override() {
        let offline = StaticConnectivity::from_override(NetworkOverride::Offline);
        assert_eq!(offline.active_network(), None);

        let cellular =
            StaticConnectivity::from_override(NetworkOverride::Transport(Transport::Cellular));
        assert!(cellular
            .active_network()
            .is_some_and(|network| network.has_transport(Transport::Cellular)));
    }
}
