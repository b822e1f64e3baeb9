//! Entity capability and write payloads.
//!
//! # Responsibility
//! - Define what a record type must provide to sit behind a repository.
//! - Carry column/value maps for inserts and partial updates.
//!
//! # Invariants
//! - Every entity has exactly one primary id column.
//! - Every entity's base query comes from its own `Entity::new_query`.

pub mod attributes;
pub mod entity;
