//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories refuse to operate on connections whose schema was not
//!   bootstrapped through `db::open_db`.
//! - Unmatched ids on update/delete paths are reported as `found = false`,
//!   never as errors.

pub mod streak_repo;
pub mod task_repo;
