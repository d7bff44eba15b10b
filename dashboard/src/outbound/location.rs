//! In-memory query location for hosts without an address bar.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::QueryLocation;

/// Most recent replacements kept by [`MemoryLocation::history`].
pub const HISTORY_LIMIT: usize = 32;

/// Query string kept in process, with a record of recent replacements.
///
/// The CLI seeds it from its arguments; tests use the history to check what
/// the view state wrote. Only the last [`HISTORY_LIMIT`] writes are kept.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    inner: Mutex<LocationState>,
}

#[derive(Debug, Default)]
struct LocationState {
    current: String,
    history: VecDeque<String>,
}

impl MemoryLocation {
    /// Start at `query`. A leading `?` is dropped.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let current = query.strip_prefix('?').unwrap_or(&query).to_owned();
        Self {
            inner: Mutex::new(LocationState {
                current,
                history: VecDeque::new(),
            }),
        }
    }

    /// Recent queries written through [`QueryLocation::replace_query`],
    /// oldest first.
    pub fn history(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .history
            .iter()
            .cloned()
            .collect()
    }
}

impl QueryLocation for MemoryLocation {
    fn query(&self) -> String {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    fn replace_query(&self, query: &str) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.current = query.to_owned();
        if state.history.len() == HISTORY_LIMIT {
            state.history.pop_front();
        }
        state.history.push_back(query.to_owned());
    }
}
