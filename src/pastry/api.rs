//! # API Facade
//!
//! [`PastryApi`] is the snippet store every surface talks to: the ingest port,
//! the command port and the web page all hold an `Arc` of the same instance.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the ordered snippet collection and the single lock guarding it
//! - **Dispatches** to the command modules while holding that lock
//! - **Persists** the full collection after every mutation
//! - **Returns structured types**, including the errors the wire protocol
//!   hides from clients (`OutOfBounds`, `InvalidEncoding`)
//!
//! ## Locking
//!
//! Each method takes the lock once and does all its work under it, so no
//! caller ever sees half of an append or a drop. Mutations also persist under
//! the lock, which keeps the on-disk snapshot in the same order as the
//! in-memory one. Persistence is synchronous and readers wait on the same
//! lock while a save runs, so async callers go through `spawn_blocking` for
//! every call, reads included.
//!
//! ## Durability
//!
//! Best effort: a failed save is logged and the store keeps serving from
//! memory. The next successful save writes the whole collection again, so
//! nothing is lost unless the process dies first.

use crate::commands;
use crate::error::{PastryError, Result};
use crate::index::resolve_index;
use crate::model::{GrepMatch, ListedSnippet, Snippet};
use crate::store::DataStore;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct PastryApi<S: DataStore> {
    store: S,
    snippets: Mutex<Vec<Snippet>>,
}

impl<S: DataStore> PastryApi<S> {
    /// Empty store; nothing is read from `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            snippets: Mutex::new(Vec::new()),
        }
    }

    /// Store primed with the last saved snapshot. An unreadable snapshot is
    /// logged and the store starts empty.
    pub fn open(store: S) -> Self {
        let snippets = match store.load() {
            Ok(snippets) => {
                tracing::info!(count = snippets.len(), "loaded snippets");
                snippets
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load snippets, starting empty");
                Vec::new()
            }
        };
        Self {
            store,
            snippets: Mutex::new(snippets),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Snippet>> {
        self.snippets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, snippets: &[Snippet]) {
        if let Err(e) = self.store.save(snippets) {
            tracing::warn!(error = %e, count = snippets.len(), "failed to persist snippets");
        }
    }

    /// Appends raw bytes as one snippet and returns its index.
    ///
    /// Invalid UTF-8 yields `InvalidEncoding` and stores nothing.
    pub fn append(&self, bytes: &[u8]) -> Result<usize> {
        let mut snippets = self.lock();
        let index = commands::append::run(&mut snippets, bytes)?;
        tracing::info!(index, bytes = bytes.len(), "snippet appended");
        self.persist(&snippets);
        Ok(index)
    }

    /// Appends text that is already known to be valid (e.g. a form field).
    pub fn append_text(&self, text: String) -> usize {
        let mut snippets = self.lock();
        let bytes = text.len();
        let index = commands::append::push(&mut snippets, text);
        tracing::info!(index, bytes, "snippet appended");
        self.persist(&snippets);
        index
    }

    pub fn resolve_index(&self, token: Option<&str>) -> Result<usize> {
        resolve_index(token, self.lock().len())
    }

    pub fn get(&self, token: Option<&str>) -> Result<String> {
        let snippets = self.lock();
        commands::get::run(&snippets, token).map(|s| s.text.clone())
    }

    pub fn list(&self) -> Vec<ListedSnippet> {
        commands::list::run(&self.lock(), Utc::now())
    }

    pub fn grep(&self, term: &str) -> Vec<GrepMatch> {
        commands::grep::run(&self.lock(), term, Utc::now())
    }

    /// Removes the snippet at `token` and returns it.
    pub fn drop(&self, token: Option<&str>) -> Result<Snippet> {
        let mut snippets = self.lock();
        let (index, removed) = commands::drop::run(&mut snippets, token)?;
        tracing::info!(index, remaining = snippets.len(), "snippet dropped");
        self.persist(&snippets);
        Ok(removed)
    }

    /// Copy of the collection, newest first.
    pub fn snapshot(&self) -> Vec<Snippet> {
        self.lock().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: DataStore> std::fmt::Debug for PastryApi<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PastryApi")
            .field("snippets", &self.len())
            .finish()
    }
}

/// Convenience for callers that only care whether a swallowed error was a
/// client mistake rather than a server fault.
pub fn is_client_error(err: &PastryError) -> bool {
    matches!(
        err,
        PastryError::OutOfBounds(_) | PastryError::InvalidEncoding | PastryError::UnknownCommand(_)
    )
}
