#![forbid(unsafe_code)]

//! Core domain model and business logic for the Gymlog workout logger.
//!
//! This crate provides:
//! - Domain types (rows, sessions)
//! - Durable workout history over a key-value primitive
//! - The active-session lifecycle (start, append, end, daily rollover)
//! - A client for the free-text parsing backend

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod kv;
pub mod store;
pub mod session;
pub mod parser;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use store::{WorkoutStore, HISTORY_KEY};
pub use session::{ActiveSession, SessionController};
pub use parser::ParserClient;
