use super::DataStore;
use crate::error::{PastryError, Result};
use crate::model::Snippet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-memory storage for testing and development.
/// Holds the last saved snapshot; nothing reaches the disk.
#[derive(Default)]
pub struct InMemoryStore {
    snapshot: Mutex<Vec<Snippet>>,
    saves: AtomicUsize,
    simulate_write_error: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `snippets`, as if loaded from a previous run.
    pub fn with_snippets(snippets: Vec<Snippet>) -> Self {
        Self {
            snapshot: Mutex::new(snippets),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the last saved snapshot.
    pub fn saved(&self) -> Vec<Snippet> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DataStore for InMemoryStore {
    fn save(&self, snippets: &[Snippet]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(PastryError::Store("Simulated write error".to_string()));
        }
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = snippets.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self) -> Result<Vec<Snippet>> {
        Ok(self.saved())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};

    /// The "apples" collection used across command tests, oldest first and
    /// spaced one minute apart.
    pub fn apples() -> Vec<Snippet> {
        let now = Utc::now();
        vec![
            Snippet::at("one apple", now - Duration::minutes(3)),
            Snippet::at("two apples", now - Duration::minutes(2)),
            Snippet::at("three apple", now - Duration::minutes(1)),
        ]
    }

    pub fn texts(snippets: &[Snippet]) -> Vec<&str> {
        snippets.iter().map(|s| s.text.as_str()).collect()
    }
}
