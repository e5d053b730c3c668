//! The pending-request table: one-shot completion slots keyed by request
//! id, shared between the outbound API (`Session::request`) and the
//! inbound dispatch loop that resolves them.

use std::collections::HashMap;
use std::sync::Mutex;

use mcp_schema::protocol::RequestId;
use mcp_schema::MCPResult;
use tokio::sync::oneshot;

type Slot = oneshot::Sender<MCPResult<serde_json::Value>>;

/// Tracks outstanding requests awaiting a response. Every id is unique
/// while its slot is live; once a slot completes (response, timeout, or
/// session close) it is removed and the id is never reused.
#[derive(Default)]
pub struct PendingRequestTable {
    slots: Mutex<HashMap<RequestId, Slot>>,
}

impl PendingRequestTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new slot for `id`. Per the duplicate-id rule: if a
    /// slot is already registered for this id, it is only replaced when
    /// the existing slot has already completed (the receiver has been
    /// dropped or consumed); otherwise the insert is refused and the
    /// caller should drop the new request with a protocol warning.
    pub fn insert(&self, id: RequestId, slot: Slot) -> bool {
        let mut slots = self.slots.lock().unwrap();
        if let Some(existing) = slots.get(&id) {
            if !existing.is_closed() {
                return false;
            }
        }
        slots.insert(id, slot);
        true
    }

    /// Complete and remove the slot for `id`, if one is registered.
    /// Returns `false` if no slot was found (a stale or unknown id),
    /// which the caller should log and otherwise ignore.
    pub fn complete(&self, id: &RequestId, result: MCPResult<serde_json::Value>) -> bool {
        let slot = self.slots.lock().unwrap().remove(id);
        match slot {
            Some(sender) => {
                let _ = sender.send(result);
                true
            }
            None => false,
        }
    }

    /// Remove the slot for `id` without completing it (used once a
    /// request has already timed out and its slot must not be reused).
    pub fn remove(&self, id: &RequestId) {
        self.slots.lock().unwrap().remove(id);
    }

    /// Drain every pending slot, completing each with `result`. Used
    /// when the session transitions to `Closed`.
    pub fn fail_all(&self, make_result: impl Fn() -> MCPResult<serde_json::Value>) {
        let mut slots = self.slots.lock().unwrap();
        for (_, sender) in slots.drain() {
            let _ = sender.send(make_result());
        }
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
