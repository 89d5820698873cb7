use std::collections::HashMap;

use tracing::debug;

use crate::model::definition::{RequestDefinition, ResponseDefinition};

/// Per-workspace open-tab state plus the per-definition testing cache.
///
/// Tabs are append-only in open order; re-opening an already open id only
/// re-selects it. Closing a tab does not clear the selection — re-selection
/// is the caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    opened: HashMap<String, Vec<String>>,
    selected: HashMap<String, String>,
    requests: HashMap<String, RequestDefinition>,
    responses: HashMap<String, (u64, ResponseDefinition)>,
    issued: HashMap<String, u64>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tab for `id` in workspace `wid` and make it the selection.
    pub fn open(&mut self, wid: &str, id: &str) {
        let tabs = self.opened.entry(wid.to_string()).or_default();
        if !tabs.iter().any(|t| t == id) {
            tabs.push(id.to_string());
        }
        self.selected.insert(wid.to_string(), id.to_string());
    }

    /// Close the tab for `id`. The selection is left untouched even when it
    /// pointed at the closed tab. The id's testing cache is dropped.
    pub fn close(&mut self, wid: &str, id: &str) {
        if let Some(tabs) = self.opened.get_mut(wid) {
            tabs.retain(|t| t != id);
        }
        self.requests.remove(id);
        self.responses.remove(id);
        self.issued.remove(id);
    }

    pub fn opened(&self, wid: &str) -> &[String] {
        self.opened.get(wid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected(&self, wid: &str) -> Option<&str> {
        self.selected.get(wid).map(String::as_str)
    }

    pub fn save_request(&mut self, id: &str, request: RequestDefinition) {
        self.requests.insert(id.to_string(), request);
    }

    /// The last edited request for `id`, or the empty default shape.
    pub fn request(&self, id: &str) -> RequestDefinition {
        self.requests.get(id).cloned().unwrap_or_default()
    }

    /// Issue a sequence number for a test run against `id`. Numbers increase
    /// monotonically per id; only the latest issued one may land.
    pub fn begin_test(&mut self, id: &str) -> u64 {
        let seq = self.issued.entry(id.to_string()).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Cache a test result. Returns `false` (and discards the response) when
    /// `seq` is not the latest issued for `id`, so a slow earlier call can
    /// never overwrite the result of a later one.
    pub fn save_response(&mut self, id: &str, seq: u64, response: ResponseDefinition) -> bool {
        let latest = self.issued.get(id).copied().unwrap_or(0);
        if seq != latest {
            debug!(id, seq, latest, "discarding stale test response");
            return false;
        }
        self.responses.insert(id.to_string(), (seq, response));
        true
    }

    pub fn response(&self, id: &str) -> Option<&ResponseDefinition> {
        self.responses.get(id).map(|(_, resp)| resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::body::HttpBody;
    use crate::model::definition::ResponseDefinition;

    fn response(marker: &str) -> ResponseDefinition {
        ResponseDefinition::new(
            200,
            marker.to_string(),
            Vec::new(),
            HttpBody::default(),
        )
    }

    #[test]
    fn test_open_twice_keeps_single_occurrence() {
        let mut sessions = SessionManager::new();
        sessions.open("w1", "p1");
        sessions.open("w1", "p2");
        sessions.open("w1", "p1");
        assert_eq!(sessions.opened("w1"), ["p1", "p2"]);
        assert_eq!(sessions.selected("w1"), Some("p1"));
    }

    #[test]
    fn test_close_removes_once_and_keeps_selection() {
        let mut sessions = SessionManager::new();
        sessions.open("w1", "p1");
        sessions.close("w1", "p1");
        assert!(sessions.opened("w1").is_empty());
        // Dangling selection is part of the contract
        assert_eq!(sessions.selected("w1"), Some("p1"));
        // Second close is a no-op
        sessions.close("w1", "p1");
        assert!(sessions.opened("w1").is_empty());
    }

    #[test]
    fn test_workspaces_are_isolated() {
        let mut sessions = SessionManager::new();
        sessions.open("w1", "p1");
        sessions.open("w2", "p2");
        assert_eq!(sessions.opened("w1"), ["p1"]);
        assert_eq!(sessions.opened("w2"), ["p2"]);
        assert_eq!(sessions.selected("w1"), Some("p1"));
    }

    #[test]
    fn test_request_default_shape() {
        let sessions = SessionManager::new();
        let req = sessions.request("never-saved");
        assert_eq!(req.method, "");
        assert_eq!(req.path, "");
        assert_eq!(req.body, HttpBody::default());
    }

    #[test]
    fn test_close_drops_testing_cache() {
        let mut sessions = SessionManager::new();
        sessions.open("w1", "p1");
        let seq = sessions.begin_test("p1");
        sessions.save_response("p1", seq, response("A"));
        sessions.close("w1", "p1");
        assert!(sessions.response("p1").is_none());
    }

    #[test]
    fn test_stale_sequence_is_discarded() {
        let mut sessions = SessionManager::new();
        let first = sessions.begin_test("p1");
        let second = sessions.begin_test("p1");
        assert!(second > first);

        // Chronologically reversed completion: the later call lands first
        assert!(sessions.save_response("p1", second, response("B")));
        assert!(!sessions.save_response("p1", first, response("A")));

        assert_eq!(sessions.response("p1").unwrap().status_text, "B");
    }

    #[test]
    fn test_latest_sequence_wins_in_order_too() {
        let mut sessions = SessionManager::new();
        let first = sessions.begin_test("p1");
        let second = sessions.begin_test("p1");
        assert!(!sessions.save_response("p1", first, response("A")));
        assert!(sessions.save_response("p1", second, response("B")));
        assert_eq!(sessions.response("p1").unwrap().status_text, "B");
    }
}
