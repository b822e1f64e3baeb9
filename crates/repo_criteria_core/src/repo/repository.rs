//! SQLite-backed repository that folds criteria over an entity scope.
//!
//! # Responsibility
//! - Implement the CRUD and criteria contracts for any [`Entity`].
//! - Keep SQL rendering and row decoding inside the repository boundary.
//!
//! # Invariants
//! - Reads never store the folded query; only `get_by_criteria` moves the scope.
//! - Writes address rows by primary id and ignore criteria and scope.
//! - Construction fails when the entity's table or columns are absent.

use super::contract::{CriteriaRepository, CrudRepository};
use super::page::{Page, DEFAULT_PER_PAGE};
use super::{RepoError, RepoResult};
use crate::criteria::{Criteria, Criterion};
use crate::db::DbError;
use crate::model::attributes::Attributes;
use crate::model::entity::Entity;
use crate::query::{quote_identifier, Query};
use log::{debug, trace, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::collections::HashSet;
use std::sync::Arc;

/// SQLite-backed repository for one entity type.
///
/// Holds the entity's scoped base query, an ordered criteria list and a skip
/// flag. Reads fold the criteria over a copy of the scope, so the stored
/// scope changes only through [`CriteriaRepository::get_by_criteria`] and
/// [`Repository::reset_scope`].
pub struct Repository<'conn, E: Entity> {
    conn: &'conn Connection,
    scope: Query,
    criteria: Criteria<E>,
    skip_criteria: bool,
}

impl<'conn, E: Entity> Repository<'conn, E> {
    /// Builds a repository with an empty criteria list.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `E::table_name()` does not exist.
    /// - `MissingRequiredColumn` when a declared column is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_criteria(conn, Criteria::new())
    }

    /// Builds a repository starting from an existing criteria list.
    pub fn with_criteria(conn: &'conn Connection, criteria: Criteria<E>) -> RepoResult<Self> {
        ensure_entity_table::<E>(conn)?;
        Ok(Self {
            conn,
            scope: E::new_query(),
            criteria,
            skip_criteria: false,
        })
    }

    /// Rebuilds the scope from `E::new_query()` and re-enables criteria.
    ///
    /// The criteria list itself is kept.
    pub fn reset_scope(&mut self) -> &mut Self {
        self.scope = E::new_query();
        self.skip_criteria = false;
        self
    }

    /// The stored scope, before any listed criteria are applied.
    pub fn scope(&self) -> &Query {
        &self.scope
    }

    pub fn is_skipping_criteria(&self) -> bool {
        self.skip_criteria
    }

    /// Returns page `page` (1-based, `0` treated as `1`) of `per_page` records.
    ///
    /// The total is counted over the narrowed query without its ordering,
    /// limit or offset; the page's own limit/offset replace any set by criteria.
    pub fn paginate_page(&self, per_page: u32, page: u32) -> RepoResult<Page<E>> {
        let per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page
        };
        let page = page.max(1);

        let narrowed = self.apply_criteria();
        let total = self.count(&narrowed)?;
        let offset = (page - 1).saturating_mul(per_page);
        let items = self.fetch("paginate", &narrowed.limit(per_page).offset(offset))?;

        Ok(Page::new(items, total, per_page, page))
    }

    fn fetch(&self, op: &'static str, query: &Query) -> RepoResult<Vec<E>> {
        let (sql, binds) = query.build_select();
        let result = self.query_rows(&sql, binds);
        match &result {
            Ok(records) => debug!(
                "event=repo_read module=repo status=ok table={} op={} criteria={} \
                 skip_criteria={} rows={}",
                E::table_name(),
                op,
                self.criteria.len(),
                self.skip_criteria,
                records.len()
            ),
            Err(err) => warn!(
                "event=repo_read module=repo status=error table={} op={} error={}",
                E::table_name(),
                op,
                err
            ),
        }
        result
    }

    fn fetch_first(&self, op: &'static str, query: Query) -> RepoResult<Option<E>> {
        Ok(self.fetch(op, &query.limit(1))?.into_iter().next())
    }

    fn query_rows(&self, sql: &str, binds: Vec<Value>) -> RepoResult<Vec<E>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(decode_row::<E>(row)?);
        }

        Ok(records)
    }

    fn count(&self, query: &Query) -> RepoResult<u64> {
        let (sql, binds) = query.build_count();
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(binds), |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn by_id(id: &E::Id) -> Query {
        E::new_query().where_eq(E::id_column(), id.clone())
    }

    fn not_found(id: &E::Id) -> RepoError {
        RepoError::NotFound {
            table: E::table_name(),
            id: id.to_string(),
        }
    }

    fn log_write(&self, op: &'static str, changed: usize) {
        debug!(
            "event=repo_write module=repo status=ok table={} op={} changed={}",
            E::table_name(),
            op,
            changed
        );
    }
}

impl<E: Entity> CrudRepository<E> for Repository<'_, E> {
    fn all(&self) -> RepoResult<Vec<E>> {
        self.fetch("all", &self.apply_criteria())
    }

    fn paginate(&self, per_page: u32) -> RepoResult<Page<E>> {
        self.paginate_page(per_page, 1)
    }

    fn find(&self, id: &E::Id) -> RepoResult<Option<E>> {
        let query = self.apply_criteria().where_eq(E::id_column(), id.clone());
        self.fetch_first("find", query)
    }

    fn find_by(&self, field: &str, value: Value) -> RepoResult<Option<E>> {
        let query = self.apply_criteria().where_eq(field, value);
        self.fetch_first("find_by", query)
    }

    fn create(&self, data: &Attributes) -> RepoResult<E> {
        let table = quote_identifier(E::table_name());
        let returning = E::columns()
            .iter()
            .map(|column| quote_identifier(column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = if data.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES RETURNING {returning};")
        } else {
            let columns = data
                .columns()
                .map(quote_identifier)
                .collect::<Vec<_>>()
                .join(", ");
            let placeholders = vec!["?"; data.len()].join(", ");
            format!(
                "INSERT INTO {table} ({columns}) VALUES ({placeholders}) \
                 RETURNING {returning};"
            )
        };

        // Decode the stored row straight from the INSERT.
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(data.values()))?;
        let created = match rows.next()? {
            Some(row) => decode_row::<E>(row)?,
            None => {
                return Err(RepoError::InvalidData(format!(
                    "insert into `{}` returned no row",
                    E::table_name()
                )))
            }
        };

        self.log_write("create", 1);
        Ok(created)
    }

    fn update(&self, id: &E::Id, data: &Attributes) -> RepoResult<()> {
        if data.is_empty() {
            if self.count(&Self::by_id(id))? == 0 {
                return Err(Self::not_found(id));
            }
            return Ok(());
        }

        let assignments = data
            .columns()
            .map(|column| format!("{} = ?", quote_identifier(column)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?;",
            quote_identifier(E::table_name()),
            quote_identifier(E::id_column())
        );
        let binds = data
            .values()
            .cloned()
            .chain(std::iter::once::<Value>(id.clone().into()))
            .collect::<Vec<Value>>();

        let changed = self.conn.execute(&sql, params_from_iter(binds))?;
        if changed == 0 {
            return Err(Self::not_found(id));
        }

        self.log_write("update", changed);
        Ok(())
    }

    fn delete(&self, id: &E::Id) -> RepoResult<()> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1;",
            quote_identifier(E::table_name()),
            quote_identifier(E::id_column())
        );
        let id_value: Value = id.clone().into();

        let changed = self.conn.execute(&sql, [id_value])?;
        if changed == 0 {
            return Err(Self::not_found(id));
        }

        self.log_write("delete", changed);
        Ok(())
    }
}

impl<E: Entity> CriteriaRepository<E> for Repository<'_, E> {
    fn skip_criteria(&mut self, skip: bool) -> &mut Self {
        self.skip_criteria = skip;
        self
    }

    fn criteria(&self) -> &Criteria<E> {
        &self.criteria
    }

    fn get_by_criteria(&mut self, criterion: &dyn Criterion<E>) -> &mut Self {
        let narrowed = criterion.apply(self.scope.clone(), &*self);
        trace!(
            "event=scope_narrow module=repo table={} criterion={}",
            E::table_name(),
            criterion.name()
        );
        self.scope = narrowed;
        self
    }

    fn push_criteria<C>(&mut self, criterion: C) -> &mut Self
    where
        C: Criterion<E> + 'static,
    {
        self.criteria = self.criteria.with(Arc::new(criterion));
        self
    }

    fn apply_criteria(&self) -> Query {
        if self.skip_criteria {
            return self.scope.clone();
        }
        self.criteria.fold(self.scope.clone(), self)
    }
}

/// Decodes one row, reporting type mismatches as `InvalidData`.
fn decode_row<E: Entity>(row: &Row<'_>) -> RepoResult<E> {
    E::from_row(row).map_err(|err| match err {
        RepoError::Db(DbError::Sqlite(
            source @ (rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)),
        )) => RepoError::InvalidData(format!(
            "row in `{}` does not decode: {source}",
            E::table_name()
        )),
        other => other,
    })
}

fn ensure_entity_table<E: Entity>(conn: &Connection) -> RepoResult<()> {
    let table = E::table_name();
    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .map(|name| name.map(|name| name.to_ascii_lowercase()))
        .collect::<Result<HashSet<_>, _>>()?;

    let required = E::columns()
        .iter()
        .copied()
        .chain(std::iter::once(E::id_column()));
    for column in required {
        if !present.contains(&column.to_ascii_lowercase()) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}
