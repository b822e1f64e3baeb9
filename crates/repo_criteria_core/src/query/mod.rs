//! Query values narrowed by criteria and rendered to parameterised SQL.
//!
//! # Responsibility
//! - Represent a SELECT over one table as plain data (conditions, ordering,
//!   limit/offset) so criteria can transform it without touching SQL.
//! - Render that data to SQL with positional `?` binds.
//!
//! # Invariants
//! - Bound values never appear inside the SQL text.
//! - Identifiers are always double-quoted; they are not validated.

mod builder;

pub use builder::{Comparison, Query, SortDirection};
pub(crate) use builder::quote_identifier;
