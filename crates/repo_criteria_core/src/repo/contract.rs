//! Repository traits.
//!
//! # Responsibility
//! - Declare the CRUD surface criteria can see ([`CrudRepository`]).
//! - Declare the criteria-management surface ([`CriteriaRepository`]).
//!
//! # Invariants
//! - `CrudRepository` stays object safe.

use super::{Page, RepoResult};
use crate::criteria::{Criteria, Criterion};
use crate::model::attributes::Attributes;
use crate::model::entity::Entity;
use crate::query::Query;
use rusqlite::types::Value;

/// CRUD surface shared by every repository.
///
/// Object safe, so criteria receive it as `&dyn CrudRepository<E>`.
pub trait CrudRepository<E: Entity> {
    /// Returns every record matching the active criteria.
    fn all(&self) -> RepoResult<Vec<E>>;

    /// Returns the first page of `per_page` records (`0` means the default).
    fn paginate(&self, per_page: u32) -> RepoResult<Page<E>>;

    /// Finds one record by primary id, after criteria.
    fn find(&self, id: &E::Id) -> RepoResult<Option<E>>;

    /// Finds the first record whose `field` equals `value`, after criteria.
    ///
    /// `field` is trusted as-is; it is quoted but not checked against the schema.
    fn find_by(&self, field: &str, value: Value) -> RepoResult<Option<E>>;

    /// Inserts `data` and returns the stored record. Ignores criteria.
    fn create(&self, data: &Attributes) -> RepoResult<E>;

    /// Writes `data` onto the record with `id`. Ignores criteria.
    fn update(&self, id: &E::Id, data: &Attributes) -> RepoResult<()>;

    /// Removes the record with `id`. Ignores criteria.
    fn delete(&self, id: &E::Id) -> RepoResult<()>;
}

/// Criteria surface: an ordered list of [`Criterion`] plus a skip flag.
pub trait CriteriaRepository<E: Entity> {
    /// Disables (`true`) or re-enables (`false`) the criteria list for reads.
    fn skip_criteria(&mut self, skip: bool) -> &mut Self;

    fn criteria(&self) -> &Criteria<E>;

    /// Narrows the stored scope by `criterion` right away.
    ///
    /// Independent of the criteria list and of the skip flag.
    fn get_by_criteria(&mut self, criterion: &dyn Criterion<E>) -> &mut Self;

    /// Appends `criterion`; it runs after every criterion pushed before it.
    fn push_criteria<C>(&mut self, criterion: C) -> &mut Self
    where
        C: Criterion<E> + 'static;

    /// Returns the scope narrowed by the criteria list, or the bare scope
    /// when criteria are skipped.
    fn apply_criteria(&self) -> Query;
}
