use rusqlite::types::Value;

/// Comparison operator for a single-value condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

impl Comparison {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Compare {
        column: String,
        op: Comparison,
        value: Value,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    IsNull(String),
    IsNotNull(String),
}

/// A SELECT over one table, built fluently and consumed by value.
///
/// # Example
///
/// ```
/// use repo_criteria_core::query::{Query, SortDirection};
///
/// let (sql, binds) = Query::table("users")
///     .select(&["id", "name"])
///     .where_eq("active", 1)
///     .order_by("name", SortDirection::Asc)
///     .limit(10)
///     .build_select();
/// assert_eq!(
///     sql,
///     r#"SELECT "id", "name" FROM "users" WHERE "active" = ? ORDER BY "name" ASC LIMIT ?"#
/// );
/// assert_eq!(binds.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    columns: Vec<String>,
    conditions: Vec<Condition>,
    order: Vec<(String, SortDirection)>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl Query {
    /// Starts a `SELECT *` over `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            conditions: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Replaces the selected column list. An empty list selects `*`.
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|column| column.to_string()).collect();
        self
    }

    pub fn filter(mut self, column: &str, op: Comparison, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Compare {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn where_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(column, Comparison::Eq, value)
    }

    pub fn where_not_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(column, Comparison::NotEq, value)
    }

    pub fn where_like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.filter(column, Comparison::Like, pattern)
    }

    /// Restricts `column` to `values`. An empty list matches nothing.
    pub fn where_in(mut self, column: &str, values: Vec<Value>) -> Self {
        self.conditions.push(Condition::In {
            column: column.to_string(),
            values,
        });
        self
    }

    pub fn where_null(mut self, column: &str) -> Self {
        self.conditions.push(Condition::IsNull(column.to_string()));
        self
    }

    pub fn where_not_null(mut self, column: &str) -> Self {
        self.conditions.push(Condition::IsNotNull(column.to_string()));
        self
    }

    /// Appends an ordering term; earlier terms take precedence.
    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.order.push((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<u32> {
        self.offset
    }

    /// Renders `SELECT <columns> FROM <table> [WHERE] [ORDER BY] [LIMIT/OFFSET]`.
    pub fn build_select(&self) -> (String, Vec<Value>) {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|column| quote_identifier(column))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {columns} FROM {}", quote_identifier(&self.table));
        let mut binds = Vec::new();
        self.append_where(&mut sql, &mut binds);
        self.append_order(&mut sql);
        self.append_limit_offset(&mut sql, &mut binds);
        (sql, binds)
    }

    /// Renders a row count over the same conditions.
    ///
    /// Ordering, limit and offset are dropped so the count covers every
    /// matching row.
    pub fn build_count(&self) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(&self.table));
        let mut binds = Vec::new();
        self.append_where(&mut sql, &mut binds);
        (sql, binds)
    }

    fn append_where(&self, sql: &mut String, binds: &mut Vec<Value>) {
        if self.conditions.is_empty() {
            return;
        }

        let clauses: Vec<String> = self
            .conditions
            .iter()
            .map(|condition| match condition {
                Condition::Compare { column, op, value } => {
                    binds.push(value.clone());
                    format!("{} {} ?", quote_identifier(column), op.as_sql())
                }
                Condition::In { values, .. } if values.is_empty() => "1 = 0".to_string(),
                Condition::In { column, values } => {
                    binds.extend(values.iter().cloned());
                    let placeholders = vec!["?"; values.len()].join(", ");
                    format!("{} IN ({placeholders})", quote_identifier(column))
                }
                Condition::IsNull(column) => format!("{} IS NULL", quote_identifier(column)),
                Condition::IsNotNull(column) => {
                    format!("{} IS NOT NULL", quote_identifier(column))
                }
            })
            .collect();

        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    fn append_order(&self, sql: &mut String) {
        if self.order.is_empty() {
            return;
        }
        let terms: Vec<String> = self
            .order
            .iter()
            .map(|(column, direction)| {
                let direction = match direction {
                    SortDirection::Asc => "ASC",
                    SortDirection::Desc => "DESC",
                };
                format!("{} {direction}", quote_identifier(column))
            })
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&terms.join(", "));
    }

    fn append_limit_offset(&self, sql: &mut String, binds: &mut Vec<Value>) {
        match (self.limit, self.offset) {
            (Some(limit), offset) => {
                sql.push_str(" LIMIT ?");
                binds.push(Value::Integer(i64::from(limit)));
                if let Some(offset) = offset.filter(|offset| *offset > 0) {
                    sql.push_str(" OFFSET ?");
                    binds.push(Value::Integer(i64::from(offset)));
                }
            }
            (None, Some(offset)) if offset > 0 => {
                // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
                sql.push_str(" LIMIT -1 OFFSET ?");
                binds.push(Value::Integer(i64::from(offset)));
            }
            (None, _) => {}
        }
    }
}

pub(crate) fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::{Comparison, Query, SortDirection};
    use rusqlite::types::Value;

    #[test]
    fn plain_table_selects_star() {
        let (sql, binds) = Query::table("users").build_select();
        assert_eq!(sql, r#"SELECT * FROM "users""#);
        assert!(binds.is_empty());
    }

    #[test]
    fn conditions_join_with_and_in_insertion_order() {
        let (sql, binds) = Query::table("users")
            .where_eq("status", "active".to_string())
            .filter("score", Comparison::Gte, 10)
            .where_like("name", "%al%".to_string())
            .where_not_null("email")
            .build_select();

        assert_eq!(
            sql,
            concat!(
                r#"SELECT * FROM "users" WHERE "status" = ? AND "score" >= ? "#,
                r#"AND "name" LIKE ? AND "email" IS NOT NULL"#
            )
        );
        assert_eq!(
            binds,
            vec![
                Value::Text("active".to_string()),
                Value::Integer(10),
                Value::Text("%al%".to_string()),
            ]
        );
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let (sql, binds) = Query::table("users").where_in("id", Vec::new()).build_select();
        assert_eq!(sql, r#"SELECT * FROM "users" WHERE 1 = 0"#);
        assert!(binds.is_empty());
    }

    #[test]
    fn in_list_expands_placeholders() {
        let (sql, binds) = Query::table("users")
            .where_in("id", vec![Value::Integer(1), Value::Integer(2)])
            .build_select();
        assert_eq!(sql, r#"SELECT * FROM "users" WHERE "id" IN (?, ?)"#);
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn offset_without_limit_uses_unbounded_limit() {
        let (sql, binds) = Query::table("users").offset(5).build_select();
        assert_eq!(sql, r#"SELECT * FROM "users" LIMIT -1 OFFSET ?"#);
        assert_eq!(binds, vec![Value::Integer(5)]);
    }

    #[test]
    fn count_drops_order_and_paging() {
        let query = Query::table("users")
            .where_null("deleted_at")
            .order_by("id", SortDirection::Desc)
            .limit(3)
            .offset(6);

        let (sql, binds) = query.build_count();
        assert_eq!(
            sql,
            r#"SELECT COUNT(*) FROM "users" WHERE "deleted_at" IS NULL"#
        );
        assert!(binds.is_empty());
    }

    #[test]
    fn identifiers_escape_embedded_quotes() {
        let (sql, _) = Query::table("odd\"table").select(&["a\"b"]).build_select();
        assert_eq!(sql, r#"SELECT "a""b" FROM "odd""table""#);
    }
}
