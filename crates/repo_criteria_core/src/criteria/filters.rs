//! Built-in criteria covering common filters, ordering and windowing.

use super::Criterion;
use crate::model::entity::Entity;
use crate::query::{Comparison, Query, SortDirection};
use crate::repo::CrudRepository;
use rusqlite::types::Value;

/// `field = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereEq {
    pub field: String,
    pub value: Value,
}

impl WhereEq {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl<E: Entity> Criterion<E> for WhereEq {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.where_eq(&self.field, self.value.clone())
    }
}

/// `field != value`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereNotEq {
    pub field: String,
    pub value: Value,
}

impl WhereNotEq {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl<E: Entity> Criterion<E> for WhereNotEq {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.where_not_eq(&self.field, self.value.clone())
    }
}

/// `field <op> value` for any [`Comparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCompare {
    pub field: String,
    pub op: Comparison,
    pub value: Value,
}

impl WhereCompare {
    pub fn new(field: impl Into<String>, op: Comparison, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

impl<E: Entity> Criterion<E> for WhereCompare {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.filter(&self.field, self.op, self.value.clone())
    }
}

/// `field LIKE pattern` (SQLite `LIKE` is case-insensitive for ASCII).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereLike {
    pub field: String,
    pub pattern: String,
}

impl WhereLike {
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pattern: pattern.into(),
        }
    }
}

impl<E: Entity> Criterion<E> for WhereLike {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.where_like(&self.field, self.pattern.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereIn {
    pub field: String,
    pub values: Vec<Value>,
}

impl WhereIn {
    pub fn new<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl<E: Entity> Criterion<E> for WhereIn {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.where_in(&self.field, self.values.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereNull(pub String);

impl<E: Entity> Criterion<E> for WhereNull {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.where_null(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereNotNull(pub String);

impl<E: Entity> Criterion<E> for WhereNotNull {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.where_not_null(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl<E: Entity> Criterion<E> for OrderBy {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.order_by(&self.field, self.direction)
    }
}

/// Caps the row count. A later `Limit` replaces an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(pub u32);

impl<E: Entity> Criterion<E> for Limit {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.limit(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset(pub u32);

impl<E: Entity> Criterion<E> for Offset {
    fn apply(&self, query: Query, _repository: &dyn CrudRepository<E>) -> Query {
        query.offset(self.0)
    }
}

/// Adapts a plain function or closure into a [`Criterion`].
pub struct FnCriterion<F> {
    name: &'static str,
    apply: F,
}

/// Wraps `apply` as a criterion labelled `name` in logs.
pub fn criterion_fn<E, F>(name: &'static str, apply: F) -> FnCriterion<F>
where
    E: Entity,
    F: Fn(Query, &dyn CrudRepository<E>) -> Query,
{
    FnCriterion { name, apply }
}

impl<E, F> Criterion<E> for FnCriterion<F>
where
    E: Entity,
    F: Fn(Query, &dyn CrudRepository<E>) -> Query,
{
    fn apply(&self, query: Query, repository: &dyn CrudRepository<E>) -> Query {
        (self.apply)(query, repository)
    }

    fn name(&self) -> &str {
        self.name
    }
}
