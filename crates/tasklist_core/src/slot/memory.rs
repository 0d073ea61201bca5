//! Process-local key-value slot.

use super::{KeyValueSlot, SlotError, SlotResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory slot backed by a shared map.
///
/// Clones share the same storage, so a test can hand one clone to a
/// repository and inspect or corrupt the stored value through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    items: HashMap<String, String>,
    reject_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set_item`/`remove_item` fail (or succeed again).
    pub fn set_reject_writes(&self, reject: bool) {
        self.state().reject_writes = reject;
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // The map holds plain strings; a poisoned guard is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueSlot for MemorySlot {
    fn get_item(&self, key: &str) -> SlotResult<Option<String>> {
        Ok(self.state().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SlotResult<()> {
        let mut state = self.state();
        if state.reject_writes {
            return Err(rejected(key));
        }
        state.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SlotResult<()> {
        let mut state = self.state();
        if state.reject_writes {
            return Err(rejected(key));
        }
        state.items.remove(key);
        Ok(())
    }
}

fn rejected(key: &str) -> SlotError {
    SlotError::WriteRejected {
        key: key.to_string(),
        reason: "memory slot is read-only".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySlot;
    use crate::slot::{KeyValueSlot, SlotError};

    #[test]
    fn clones_share_storage() {
        let slot = MemorySlot::new();
        let other = slot.clone();

        slot.set_item("todos", "[]").unwrap();
        assert_eq!(other.get_item("todos").unwrap().as_deref(), Some("[]"));

        other.remove_item("todos").unwrap();
        assert_eq!(slot.get_item("todos").unwrap(), None);
    }

    #[test]
    fn rejected_writes_leave_previous_value() {
        let slot = MemorySlot::new();
        slot.set_item("todos", "old").unwrap();
        slot.set_reject_writes(true);

        let err = slot.set_item("todos", "new").unwrap_err();
        assert!(matches!(err, SlotError::WriteRejected { ref key, .. } if key == "todos"));
        assert_eq!(slot.get_item("todos").unwrap().as_deref(), Some("old"));

        slot.set_reject_writes(false);
        slot.set_item("todos", "new").unwrap();
        assert_eq!(slot.get_item("todos").unwrap().as_deref(), Some("new"));
    }
}
