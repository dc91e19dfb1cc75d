use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::connectivity::{ConnectivityService, NetworkObserver, NetworkRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NetworkEdge {
    Available,
    Lost,
}

/// Turns successive "matching network present" samples into available/lost edges.
#[derive(Debug, Default)]
pub(crate) struct NetworkEdgeTracker {
    matching: bool,
}

impl NetworkEdgeTracker {
    pub(crate) fn observe(&mut self, matching: bool) -> Option<NetworkEdge> {
        if matching == self.matching {
            return None;
        }
        self.matching = matching;
        Some(if matching {
            NetworkEdge::Available
        } else {
            NetworkEdge::Lost
        })
    }
}

pub(crate) fn deliver_edge(observer: &dyn NetworkObserver, edge: NetworkEdge) {
    match edge {
        NetworkEdge::Available => observer.on_available(),
        NetworkEdge::Lost => observer.on_lost(),
    }
}

/// Background poller delivering network callbacks for a single request.
/// Stops when dropped.
pub(crate) struct NetworkWatcher {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl NetworkWatcher {
    pub(crate) fn spawn(
        service: Arc<dyn ConnectivityService>,
        request: NetworkRequest,
        observer: Arc<dyn NetworkObserver>,
        interval: Duration,
    ) -> Result<Self, String> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("network-watcher".to_string())
            .spawn(move || {
                let mut tracker = NetworkEdgeTracker::default();
                while !thread_stop.load(Ordering::Acquire) {
                    let matching = service
                        .active_network()
                        .is_some_and(|network| request.matches(&network));
                    if let Some(edge) = tracker.observe(matching) {
                        deliver_edge(observer.as_ref(), edge);
                    }
                    thread::park_timeout(interval);
                }
            })
            .map_err(|error| format!("Failed to spawn network watcher thread: {error}"))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub(crate) fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl Drop for NetworkWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Mutex};

    use super::*;
    use crate::connectivity::{Capability, NetworkCapabilities, Transport};

    #[test]
    fn edge_tracker_reports_each_transition_once() {
        let mut tracker = NetworkEdgeTracker::default();
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(true), Some(NetworkEdge::Available));
        assert_eq!(tracker.observe(true), None);
        assert_eq!(tracker.observe(false), Some(NetworkEdge::Lost));
        assert_eq!(tracker.observe(false), None);
    }

    struct SwitchableConnectivity {
        network: Mutex<Option<NetworkCapabilities>>,
    }

    impl ConnectivityService for SwitchableConnectivity {
        fn active_network(&self) -> Option<NetworkCapabilities> {
            self.network.lock().unwrap().clone()
        }
    }

    struct ChannelObserver {
        sender: Mutex<mpsc::Sender<NetworkEdge>>,
    }

    impl NetworkObserver for ChannelObserver {
        fn on_available(&self) {
            let _ = self.sender.lock().unwrap().send(NetworkEdge::Available);
        }

        fn on_lost(&self) {
            let _ = self.sender.lock().unwrap().send(NetworkEdge::Lost);
        }
    }

    #[test]
    fn watcher_reports_initial_availability_and_later_loss() {
        let service = Arc::new(SwitchableConnectivity {
            network: Mutex::new(Some(NetworkCapabilities::new(
                &[Transport::Wifi],
                &[Capability::Internet],
            ))),
        });
        let (sender, receiver) = mpsc::channel();
        let observer = Arc::new(ChannelObserver {
            sender: Mutex::new(sender),
        });

        let mut watcher = NetworkWatcher::spawn(
            service.clone(),
            NetworkRequest::internet_over_wifi_or_cellular(),
            observer,
            Duration::from_millis(10),
        )
        .expect("spawn watcher");

        assert_eq!(
            receiver.recv_timeout(Duration::from_secs(5)),
            Ok(NetworkEdge::Available)
        );

        *service.network.lock().unwrap() = None;
        assert_eq!(
            receiver.recv_timeout(Duration::from_secs(5)),
            Ok(NetworkEdge::Lost)
        );

        watcher.stop();
        assert!(receiver.try_recv().is_err());
    }
}
