//! # Command Layer
//!
//! One module per store operation. Commands work on the plain snippet vector
//! the caller hands them; locking and persistence belong to [`crate::api`].
//! They never touch sockets, files or clocks of their own (time is passed in),
//! so every rule here is unit tested without I/O.

pub mod append;
pub mod drop;
pub mod get;
pub mod grep;
pub mod list;
