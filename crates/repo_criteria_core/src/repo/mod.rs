//! Repository contracts and the SQLite-backed criteria repository.
//!
//! # Responsibility
//! - Declare the CRUD surface ([`CrudRepository`]) and the criteria surface
//!   ([`CriteriaRepository`]).
//! - Provide [`Repository`], which folds criteria over its scope on reads.
//!
//! # Invariants
//! - Reads (`all`, `paginate`, `find`, `find_by`) apply criteria unless skipped.
//! - Writes (`create`, `update`, `delete`) never apply criteria or the scope.
//! - `update`/`delete` on an unknown id return `RepoError::NotFound`.

mod contract;
mod error;
mod page;
mod repository;

pub use contract::{CriteriaRepository, CrudRepository};
pub use error::{RepoError, RepoResult};
pub use page::{Page, DEFAULT_PER_PAGE};
pub use repository::Repository;
