//! # Pastry Architecture
//!
//! Pastry is a tiny LAN pastebin. Anything sent to the write port becomes a
//! snippet; the read port answers a handful of plain-text commands about those
//! snippets; a web page shows them all and takes new ones from a form.
//!
//! ```text
//! $ echo "hello" | nc -N pastry.lan 9181      # store
//! $ nc pastry.lan 9182                         # newest snippet back
//! $ echo "list" | nc -N pastry.lan 9182        # table of everything
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Network Layer (server/, wired by main.rs)                  │
//! │  - Binds the write, read and http ports                     │
//! │  - Reads payloads, writes replies, owns every socket        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Protocol Layer (protocol.rs, render.rs)                    │
//! │  - Parses command lines into `Request`s                     │
//! │  - Formats list/grep tables, decides what the client sees   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - The snippet store: one lock around an ordered Vec        │
//! │  - Resolves index tokens, persists after every mutation     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure operations on `Vec<Snippet>`                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is synchronous and knows nothing about
//! sockets, so the core is tested with plain unit tests and the network layer
//! with in-memory pipes.
//!
//! ## Indexes
//!
//! Snippets are addressed by position, oldest first. Negative numbers count
//! from the newest. See `index.rs` for the exact rules.
//!
//! ## Module Overview
//!
//! - `api`: snippet store facade shared by every surface
//! - `commands`: append, get, list, grep, drop
//! - `config`: `PastryConfig`, loaded from `config.json`
//! - `error`: `PastryError` and the crate `Result`
//! - `index`: index token parsing and resolution
//! - `model`: `Snippet` and the row types list/grep produce
//! - `protocol`: read-port request parsing and dispatch
//! - `render`: plain-text list/grep tables
//! - `server`: listeners, connection handlers, web router
//! - `store`: persistence backends

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod protocol;
pub mod render;
pub mod server;
pub mod store;
