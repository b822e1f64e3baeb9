//! Query-narrowing criteria and the ordered list a repository folds over.
//!
//! # Responsibility
//! - Define the single-operation [`Criterion`] contract.
//! - Keep pushed criteria in an immutable, insertion-ordered [`Criteria`] list.
//! - Ship common filters so callers rarely need a custom type.
//!
//! # Invariants
//! - Folding applies criteria strictly left to right (push order).
//! - A criterion only sees the query and the read-only repository contract;
//!   it cannot mutate repository state.

mod filters;

pub use filters::{
    criterion_fn, FnCriterion, Limit, Offset, OrderBy, WhereCompare, WhereEq, WhereIn, WhereLike,
    WhereNotEq, WhereNotNull, WhereNull,
};

use crate::model::entity::Entity;
use crate::query::Query;
use crate::repo::CrudRepository;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// One composable transform over an entity query.
///
/// Implementations must be pure: the result may depend only on `query`,
/// `repository` and the criterion's own fields.
pub trait Criterion<E: Entity> {
    fn apply(&self, query: Query, repository: &dyn CrudRepository<E>) -> Query;

    /// Label used in trace logging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Immutable ordered list of criteria.
///
/// [`Criteria::with`] returns a new list; cloning only bumps reference counts.
pub struct Criteria<E: Entity> {
    items: Vec<Arc<dyn Criterion<E>>>,
}

impl<E: Entity> Criteria<E> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns a list with `criterion` appended after every existing item.
    #[must_use]
    pub fn with(&self, criterion: Arc<dyn Criterion<E>>) -> Self {
        let mut items = self.items.clone();
        items.push(criterion);
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Criterion<E> + 'static)> {
        self.items.iter().map(|criterion| criterion.as_ref())
    }

    /// Folds every criterion over `query` in push order.
    pub fn fold(&self, query: Query, repository: &dyn CrudRepository<E>) -> Query {
        self.iter()
            .fold(query, |narrowed, criterion| criterion.apply(narrowed, repository))
    }
}

impl<E: Entity> Default for Criteria<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for Criteria<E> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<E: Entity> Debug for Criteria<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|criterion| criterion.name()))
            .finish()
    }
}

impl<E: Entity> FromIterator<Arc<dyn Criterion<E>>> for Criteria<E> {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Criterion<E>>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
