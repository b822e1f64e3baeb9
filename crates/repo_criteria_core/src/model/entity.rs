//! Entity capability trait.
//!
//! # Responsibility
//! - Tell a repository which table, columns and id an entity maps to.
//! - Decode selected rows into the entity.

use crate::query::Query;
use crate::repo::RepoResult;
use rusqlite::types::Value;
use rusqlite::Row;
use std::fmt::Display;

/// Capability a record type needs to be served by a [`Repository`].
///
/// Implementations are usually written by hand next to the table's DDL:
///
/// ```ignore
/// impl Entity for User {
///     type Id = i64;
///     fn table_name() -> &'static str { "users" }
///     fn columns() -> &'static [&'static str] { &["id", "name", "email"] }
///     fn id(&self) -> &i64 { &self.id }
///     fn from_row(row: &Row<'_>) -> RepoResult<Self> {
///         Ok(Self { id: row.get("id")?, name: row.get("name")?, email: row.get("email")? })
///     }
/// }
/// ```
///
/// [`Repository`]: crate::repo::Repository
pub trait Entity: Sized {
    /// Primary id type; converted to a bound SQL value for lookups.
    type Id: Clone + Display + Into<Value>;

    fn table_name() -> &'static str;

    /// Primary id column. Defaults to `id`.
    fn id_column() -> &'static str {
        "id"
    }

    /// Columns selected by reads and checked at repository construction.
    fn columns() -> &'static [&'static str];

    fn id(&self) -> &Self::Id;

    /// Decodes one selected row.
    ///
    /// Return `RepoError::InvalidData` for values that do not fit the model.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    /// Builds the unnarrowed base query for this entity.
    fn new_query() -> Query {
        Query::table(Self::table_name()).select(Self::columns())
    }
}
