//! # Storage Layer
//!
//! Pastry keeps every snippet in memory and treats disk as a snapshot: after
//! each mutation the whole collection is written out, and on startup the whole
//! collection is read back. The [`DataStore`] trait is that snapshot boundary.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, a single JSON file in the user's
//!   cache directory. Writes go to a temporary sibling first and are renamed
//!   into place, so a crash mid-write leaves the previous snapshot intact.
//!
//! - [`memory::InMemoryStore`]: keeps the last snapshot in memory. Used by tests,
//!   including failure injection for the "persist failed, keep serving" path.
//!
//! ## Storage Format
//!
//! ```text
//! ~/.cache/pastry/
//! └── pastes.json        # JSON array of { text, created_at }, oldest first
//! ```
//!
//! The format is internal to pastry and only needs to survive its own
//! save/load cycles.

use crate::error::Result;
use crate::model::Snippet;

pub mod fs;
pub mod memory;

/// Snapshot persistence for the snippet collection.
///
/// Implementations are shared between connection tasks, hence `Send + Sync`.
pub trait DataStore: Send + Sync {
    /// Replace the stored snapshot with `snippets`.
    fn save(&self, snippets: &[Snippet]) -> Result<()>;

    /// Read the stored snapshot. A missing snapshot is an empty collection,
    /// not an error.
    fn load(&self) -> Result<Vec<Snippet>>;
}
