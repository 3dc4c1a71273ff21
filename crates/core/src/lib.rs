//! Domain logic for the CodeSphere collaboration backend.
//!
//! Everything here is free of I/O so the repository layer, HTTP handlers,
//! and the room socket hub share one definition of the rules.

pub mod error;
pub mod file_tree;
pub mod hashing;
pub mod language;
pub mod room;
pub mod room_events;
pub mod status;
pub mod types;
pub mod versioning;
