//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement operations run in
//! a single transaction.

pub mod commit_repo;
pub mod file_repo;
pub mod room_repo;
pub mod user_repo;

pub use commit_repo::{CommitOutcome, CommitRepo, RevertOutcome};
pub use file_repo::{DeleteOutcome, FileRepo};
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;
