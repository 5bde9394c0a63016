//! Storage module for crawl sessions
//!
//! This module holds the process-wide session map shared by crawl tasks
//! (writers) and status pollers (readers):
//! - The `SessionStore` trait injected into the engine and the service
//! - An in-memory, mutex-guarded implementation with optional capacity

mod memory;
mod traits;

pub use memory::MemorySessionStore;
pub use traits::SessionStore;
