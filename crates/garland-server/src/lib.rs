//! Development server with hot reload for garland storefronts.
//!
//! Renders the storefront from the current content and price files and
//! reloads connected browsers over a WebSocket whenever those files change.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent, WatchTargets};
pub use websocket::{HmrHub, HmrMessage};
