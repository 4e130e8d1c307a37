use super::{EnvironmentStore, Scope};
use crate::{GvmError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<(Scope, String), String>>,
    read_only: BTreeSet<Scope>,
    writes: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every write to `scope`, the way a non-elevated process is
    /// refused access to the machine environment.
    pub fn read_only(mut self, scope: Scope) -> Self {
        self.read_only.insert(scope);
        self
    }

    pub fn with(self, scope: Scope, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert((scope, key.to_string()), value.to_string());
        self
    }

    pub fn value(&self, scope: Scope, key: &str) -> Option<String> {
        self.values
            .borrow()
            .get(&(scope, key.to_string()))
            .cloned()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl EnvironmentStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        Ok(self.value(scope, key))
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        if self.read_only.contains(&scope) {
            return Err(GvmError::StoreWrite {
                scope,
                key: key.to_string(),
                reason: "access is denied".to_string(),
            });
        }

        self.values
            .borrow_mut()
            .insert((scope, key.to_string()), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
