//! Repository + criteria data access over SQLite.
//!
//! A [`Repository`] wraps one [`Entity`] type, exposes CRUD operations and
//! narrows its reads through an ordered list of [`Criterion`] values.

pub mod criteria;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;

pub use criteria::{Criteria, Criterion};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingConfig};
pub use model::attributes::Attributes;
pub use model::entity::Entity;
pub use query::{Comparison, Query, SortDirection};
pub use repo::{
    CriteriaRepository, CrudRepository, Page, RepoError, RepoResult, Repository,
    DEFAULT_PER_PAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
