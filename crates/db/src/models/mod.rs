//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for request bodies
//!
//! JSON uses camelCase field names to match the editor client.

pub mod commit;
pub mod file;
pub mod room;
pub mod user;
