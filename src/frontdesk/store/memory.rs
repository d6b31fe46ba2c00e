use super::Storage;
use crate::error::{FrontdeskError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// store wrote, or flip writes into failure mode.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    state: Rc<RefCell<MemoryState>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` and `remove` fail until turned off again.
    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Raw value for `key`, bypassing the failure switch.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.state.borrow().entries.get(key).cloned()
    }

    /// Put a raw value in place, bypassing the failure switch.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.state
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(FrontdeskError::Store(format!("write rejected: {}", key)));
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(FrontdeskError::Store(format!("remove rejected: {}", key)));
        }
        state.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let storage = InMemoryStorage::new();
        let mut handle = storage.clone();
        handle.set("doctors", "[]").unwrap();
        assert_eq!(storage.raw("doctors").as_deref(), Some("[]"));
    }

    #[test]
    fn failing_writes_leave_entries_untouched() {
        let mut storage = InMemoryStorage::new();
        storage.set("k", "old").unwrap();
        storage.fail_writes(true);

        assert!(storage.set("k", "new").is_err());
        assert!(storage.remove("k").is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("old"));
    }
}
