#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackOutcome {
    /// The browser stepped back one entry; the back event stops here.
    Consumed,
    /// Nothing to go back to; the platform default applies.
    PassThrough,
}

/// Where a back request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackSource {
    /// The platform back button or gesture.
    SystemButton,
    /// The hosted page through the shell bridge.
    Page,
}

pub(crate) trait BrowserHistory {
    fn can_go_back(&mut self) -> bool;
    fn go_back(&mut self);
}

/// Only a system back press with nothing left to go back to leaves the shell.
pub(crate) fn closes_shell(outcome: BackOutcome, source: BackSource) -> bool {
    outcome == BackOutcome::PassThrough && source == BackSource::SystemButton
}

pub(crate) fn handle_back_navigation<H>(history: &mut H) -> BackOutcome
where
    H: BrowserHistory + ?Sized,
{
    if history.can_go_back() {
        history.go_back();
        BackOutcome::Consumed
    } else {
        BackOutcome::PassThrough
    }
}

/// Document-level history reconstructed from page-load events, for browser
/// components that cannot be asked synchronously whether they can go back.
#[derive(Debug, Default)]
pub(crate) struct SessionHistory {
    entries: Vec<String>,
    back_pending: bool,
}

impl SessionHistory {
    /// A pending back step only counts when the load lands on the previous
    /// entry; any other load means `history.back()` stayed inside the
    /// document and the load is a new forward entry.
    pub(crate) fn record_page_load(&mut self, address: &str) {
        if std::mem::take(&mut self.back_pending) && self.previous() == Some(address) {
            self.entries.pop();
            return;
        }

        if self.entries.last().map(String::as_str) == Some(address) {
            return;
        }
        self.entries.push(address.to_string());
    }

    pub(crate) fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub(crate) fn begin_back(&mut self) {
        self.back_pending = true;
    }

    fn previous(&self) -> Option<&str> {
        let index = self.entries.len().checked_sub(2)?;
        self.entries.get(index).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHistory {
        depth: usize,
        back_calls: usize,
    }

    impl BrowserHistory for FakeHistory {
        fn can_go_back(&mut self) -> bool {
            self.depth > 0
        }

        fn go_back(&mut self) {
            self.depth -= 1;
            self.back_calls += 1;
        }
    }

    #[test]
    fn handle_back_navigation_steps_back_when_history_exists() {
        let mut history = FakeHistory {
            depth: 1,
            back_calls: 0,
        };
        assert_eq!(handle_back_navigation(&mut history), BackOutcome::Consumed);
        assert_eq!(history.back_calls, 1);
        assert_eq!(history.depth, 0);
    }

    #[test]
    fn handle_back_navigation_passes_through_without_history() {
        let mut history = FakeHistory {
            depth: 0,
            back_calls: 0,
        };
        assert_eq!(handle_back_navigation(&mut history), BackOutcome::PassThrough);
        assert_eq!(history.back_calls, 0);
    }

    #[test]
    fn session_history_tracks_forward_navigation_and_ignores_reloads() {
        let mut history = SessionHistory::default();
        history.record_page_load("tauri://localhost/index.html");
        assert!(!history.can_go_back());

        history.record_page_load("tauri://localhost/index.html");
        assert_eq!(history.len(), 1);

        history.record_page_load("tauri://localhost/reader.html");
        assert!(history.can_go_back());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn session_history_pops_entry_when_back_lands() {
        let mut history = SessionHistory::default();
        history.record_page_load("tauri://localhost/index.html");
        history.record_page_load("tauri://localhost/library.html");
        history.record_page_load("tauri://localhost/reader.html");

        history.begin_back();
        history.record_page_load("tauri://localhost/library.html");
        assert_eq!(history.len(), 2);

        history.begin_back();
        history.record_page_load("tauri://localhost/index.html");
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn session_history_keeps_forward_entry_when_back_stays_in_document() {
        let mut history = SessionHistory::default();
        history.record_page_load("tauri://localhost/a.html");
        history.record_page_load("tauri://localhost/b.html");

        // history.back() only popped a hash or pushState entry; no load followed.
        history.begin_back();
        history.record_page_load("tauri://localhost/c.html");
        assert_eq!(history.len(), 3);

        history.begin_back();
        history.record_page_load("tauri://localhost/b.html");
        assert_eq!(history.len(), 2);
        assert!(history.can_go_back());
    }

    #[test]
    fn session_history_reload_clears_pending_back() {
        let mut history = SessionHistory::default();
        history.record_page_load("tauri://localhost/a.html");
        history.record_page_load("tauri://localhost/b.html");

        history.begin_back();
        history.record_page_load("tauri://localhost/b.html");
        assert_eq!(history.len(), 2);

        history.record_page_load("tauri://localhost/a.html");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn closes_shell_only_for_unhandled_system_back() {
        assert!(closes_shell(BackOutcome::PassThrough, BackSource::SystemButton));
        assert!(!closes_shell(BackOutcome::Consumed, BackSource::SystemButton));
        assert!(!closes_shell(BackOutcome::PassThrough, BackSource::Page));
        assert!(!closes_shell(BackOutcome::Consumed, BackSource::Page));
    }
}
