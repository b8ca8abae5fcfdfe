//! # Web Templates
//!
//! The browser surface is rendered from stand-alone files next to this module,
//! included as constants so the binary carries no runtime assets. Text files
//! come in as `&str`, the icons as raw PNG bytes.
//!
//! `index.html` is a minijinja template. It expects an `entries` list, newest
//! first, where every entry has `index`, `age` and `text`. Snippet text is
//! user input, so the environment rendering it must auto-escape HTML.

pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

pub const STYLESHEET: &str = include_str!("templates/style.css");

pub const FAVICON_PNG: &[u8] = include_bytes!("templates/favicon.png");

pub const LOGO_PNG: &[u8] = include_bytes!("templates/logo.png");
