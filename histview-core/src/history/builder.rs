//! Parameterized SQL construction for history queries
//!
//! Every predicate is stored together with its bound value, so clause order
//! and argument order cannot drift apart. No filter value is ever
//! interpolated into SQL text.

use rusqlite::types::{ToSql, ToSqlOutput};

use super::filter::HistoryFilter;

/// Columns selected for a [`super::History`] row, in mapping order
pub const HISTORY_COLUMNS: &str =
    "id, timestamp, duration, exit, command, cwd, session, hostname, deleted_at";

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Integer(i64),
    Text(String),
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl ToSql for SqlArg {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Integer(v) => v.to_sql(),
            Self::Text(s) => s.to_sql(),
        }
    }
}

/// SQL text plus its arguments in placeholder order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

impl BuiltQuery {
    fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Append a fragment holding exactly one placeholder along with its value
    fn bind(&mut self, fragment: &str, arg: impl Into<SqlArg>) {
        debug_assert_eq!(fragment.matches('?').count(), 1);
        self.sql.push_str(fragment);
        self.args.push(arg.into());
    }

    /// Arguments in a form rusqlite can bind
    pub fn params(&self) -> rusqlite::ParamsFromIter<std::slice::Iter<'_, SqlArg>> {
        rusqlite::params_from_iter(self.args.iter())
    }
}

/// Ordered AND-predicates, each paired with its single bound value
#[derive(Debug, Default)]
struct Predicates {
    clauses: Vec<(&'static str, SqlArg)>,
}

impl Predicates {
    fn push(&mut self, clause: &'static str, arg: impl Into<SqlArg>) {
        self.clauses.push((clause, arg.into()));
    }

    fn push_opt<T: Into<SqlArg>>(&mut self, clause: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(clause, value);
        }
    }

    /// Append every predicate to `query` as an `AND` clause
    fn write_into(self, query: &mut BuiltQuery) {
        for (clause, arg) in self.clauses {
            query.sql.push_str(" AND ");
            query.bind(clause, arg);
        }
    }
}

fn contains_pattern(value: &str) -> String {
    format!("%{value}%")
}

/// Build the `SELECT` for a filter.
///
/// Predicates are appended in a fixed order: id, command, cwd, hostname,
/// start time, end time, exit. Results are always newest first. `OFFSET` is
/// only emitted together with a positive `LIMIT`.
pub fn build_select(filter: &HistoryFilter) -> BuiltQuery {
    let mut predicates = Predicates::default();
    predicates.push_opt("id = ?", filter.id.as_deref());
    predicates.push_opt("command LIKE ?", filter.command.as_deref().map(contains_pattern));
    predicates.push_opt("cwd LIKE ?", filter.cwd.as_deref().map(contains_pattern));
    predicates.push_opt("hostname = ?", filter.hostname.as_deref());
    predicates.push_opt("timestamp >= ?", filter.start_time);
    predicates.push_opt("timestamp <= ?", filter.end_time);
    predicates.push_opt("exit = ?", filter.exit);

    let mut query = BuiltQuery::new(format!(
        "SELECT {HISTORY_COLUMNS} FROM history WHERE deleted_at IS NULL"
    ));
    predicates.write_into(&mut query);
    query.sql.push_str(" ORDER BY timestamp DESC");

    if filter.limit > 0 {
        query.bind(" LIMIT ?", filter.limit);
        if filter.offset > 0 {
            query.bind(" OFFSET ?", filter.offset);
        }
    }

    query
}

/// Build the soft-delete `UPDATE` for a batch of ids.
///
/// Returns `None` for an empty batch; callers must skip the database then.
/// Every id in the batch receives the same `deleted_at` value.
pub fn build_batch_soft_delete<S: AsRef<str>>(ids: &[S], deleted_at: i64) -> Option<BuiltQuery> {
    if ids.is_empty() {
        return None;
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut query = BuiltQuery::new("");
    query.bind("UPDATE history SET deleted_at = ?", deleted_at);
    query.sql.push_str(&format!(" WHERE id IN ({placeholders})"));
    query
        .args
        .extend(ids.iter().map(|id| SqlArg::from(id.as_ref())));

    Some(query)
}
