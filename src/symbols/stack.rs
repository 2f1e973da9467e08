use log::debug;

use super::collection::ScopeId;

/// The chain of currently open scopes, innermost on top, together with the storage-offset
/// counter of the innermost scope.
///
/// Opening a procedure scope saves the enclosing scope's counter and starts the new one from
/// zero; closing it restores the saved counter. The root scope (the program) is opened without
/// saving anything.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    scopes: Vec<ScopeId>,
    offset: u64,
    saved_offsets: Vec<u64>,
}

impl ScopeStack {
    pub fn open_root(&mut self, id: ScopeId) {
        debug!("open root scope {id:?} at depth {}", self.scopes.len());
        self.scopes.push(id);
    }

    pub fn open_nested(&mut self, id: ScopeId) {
        debug!(
            "open scope {id:?} at depth {}, saving offset {}",
            self.scopes.len(),
            self.offset
        );
        self.saved_offsets.push(self.offset);
        self.offset = 0;
        self.scopes.push(id);
    }

    /// Pops the innermost scope, returns it with its final offset (its frame size).
    /// Returns `None` if no scope is open.
    pub fn close(&mut self) -> Option<(ScopeId, u64)> {
        let id = self.scopes.pop()?;
        let frame_size = self.offset;
        if let Some(saved) = self.saved_offsets.pop() {
            self.offset = saved;
        }
        debug!("close scope {id:?} with frame size {frame_size}, offset back to {}", self.offset);
        Some((id, frame_size))
    }

    pub fn current(&self) -> Option<ScopeId> {
        self.scopes.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reserves `size` bytes in the innermost scope, returns where they start.
    /// Returns `None` if the counter would overflow.
    pub fn allocate(&mut self, size: u64) -> Option<u64> {
        let start = self.offset;
        self.offset = start.checked_add(size)?;
        Some(start)
    }
}
