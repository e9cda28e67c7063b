//! Thin ActiveRecord-style model base.
//!
//! Models are plain `Deserialize` structs bound to a table. Queries are
//! described by [`Query`] values and executed by a [`QueryExecutor`], the
//! database collaborator. Convention finders such as
//! `find_one_by_email_and_status` are parsed by [`FinderCall::parse`] into
//! a query instead of being resolved dynamically.

use crate::error::{FuelError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// One database row, column name to value.
pub type Row = serde_json::Map<String, Value>;

/// How a condition joins the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

/// Equality condition on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub connective: Connective,
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Structured select description handed to the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub wheres: Vec<Where>,
    pub order_by: Vec<(String, Direction)>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            wheres: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: 0,
        }
    }

    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.wheres.push(Where {
            connective: Connective::And,
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn or_where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.wheres.push(Where {
            connective: Connective::Or,
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Evaluates the conditions against `row` with SQL precedence: `AND`
    /// binds tighter than `OR`.
    pub fn matches(&self, row: &Row) -> bool {
        if self.wheres.is_empty() {
            return true;
        }
        let mut groups: Vec<Vec<&Where>> = vec![Vec::new()];
        for condition in &self.wheres {
            if condition.connective == Connective::Or
                && groups.last().is_some_and(|g| !g.is_empty())
            {
                groups.push(Vec::new());
            }
            if let Some(group) = groups.last_mut() {
                group.push(condition);
            }
        }
        groups.iter().any(|group| {
            group
                .iter()
                .all(|c| row.get(&c.column).is_some_and(|v| *v == c.value))
        })
    }
}

/// Database collaborator executing [`Query`] descriptions.
pub trait QueryExecutor {
    /// Rows matching `query`, ordered and limited as requested.
    fn select(&self, query: &Query) -> Result<Vec<Row>>;

    /// Number of rows matching the conditions of `query`.
    fn count(&self, query: &Query) -> Result<usize>;
}

/// A table-backed model.
pub trait Model: DeserializeOwned {
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str = "id";
}

/// Which convention finder was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderKind {
    /// `find_by_*` and `find_all_by_*`: every match.
    All,
    /// `find_one_by_*`: exactly one match.
    One,
    /// `count_by_*`: number of matches.
    Count,
}

/// A parsed convention finder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderCall {
    pub kind: FinderKind,
    pub columns: Vec<(Connective, String)>,
}

/// Recognised finder prefixes, checked in order.
const FINDER_PREFIXES: [(&str, FinderKind); 4] = [
    ("find_all_by_", FinderKind::All),
    ("find_one_by_", FinderKind::One),
    ("find_by_", FinderKind::All),
    ("count_by_", FinderKind::Count),
];

impl FinderCall {
    /// Parses `find_by_<col>`, `find_one_by_<col>`, `find_all_by_<col>` and
    /// `count_by_<col>`, where `<col>` may chain further columns with
    /// `_and_` or `_or_`.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::BadMethodCall` for any other name or an empty
    /// column.
    pub fn parse(method: &str) -> Result<Self> {
        let bad = || FuelError::BadMethodCall(method.to_string());
        let (kind, rest) = FINDER_PREFIXES
            .iter()
            .find_map(|(prefix, kind)| method.strip_prefix(prefix).map(|rest| (*kind, rest)))
            .ok_or_else(bad)?;

        let mut columns = Vec::new();
        let mut connective = Connective::And;
        let mut remaining = rest;
        loop {
            let next_and = remaining.find("_and_").map(|i| (i, Connective::And, 5));
            let next_or = remaining.find("_or_").map(|i| (i, Connective::Or, 4));
            let next = match (next_and, next_or) {
                (Some(a), Some(o)) => Some(if a.0 < o.0 { a } else { o }),
                (a, o) => a.or(o),
            };

            let (column, tail) = match next {
                Some((index, next_connective, width)) => {
                    let column = &remaining[..index];
                    let tail = &remaining[index + width..];
                    columns.push((connective, column.to_string()));
                    connective = next_connective;
                    (column, Some(tail))
                }
                None => {
                    columns.push((connective, remaining.to_string()));
                    (remaining, None)
                }
            };
            if column.is_empty() {
                return Err(bad());
            }
            match tail {
                Some(tail) => remaining = tail,
                None => break,
            }
        }
        Ok(Self { kind, columns })
    }

    /// Builds the query for `table`, pairing each column with one argument.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::BadMethodCall` if the argument count differs from
    /// the column count.
    pub fn into_query(self, table: &str, args: Vec<Value>) -> Result<Query> {
        if args.len() != self.columns.len() {
            return Err(FuelError::BadMethodCall(format!(
                "finder on {table} expects {} argument(s), got {}",
                self.columns.len(),
                args.len()
            )));
        }
        let mut query = Query::table(table);
        for ((connective, column), value) in self.columns.into_iter().zip(args) {
            query.wheres.push(Where {
                connective,
                column,
                value,
            });
        }
        if self.kind == FinderKind::One {
            query = query.limit(1);
        }
        Ok(query)
    }
}

/// Result of a convention finder call.
#[derive(Debug, PartialEq)]
pub enum Found<M> {
    One(M),
    Many(Vec<M>),
    Count(usize),
}

/// CRUD helpers for model `M` over an executor.
pub struct Crud<'a, M> {
    executor: &'a dyn QueryExecutor,
    _model: PhantomData<M>,
}

impl<'a, M: Model> Crud<'a, M> {
    pub fn new(executor: &'a dyn QueryExecutor) -> Self {
        Self {
            executor,
            _model: PhantomData,
        }
    }

    /// A query on the model table.
    pub fn query(&self) -> Query {
        Query::table(M::TABLE)
    }

    /// Row with primary key `id`, if any.
    pub fn find_by_pk(&self, id: impl Into<Value>) -> Result<Option<M>> {
        let query = self.query().where_eq(M::PRIMARY_KEY, id).limit(1);
        self.executor
            .select(&query)?
            .into_iter()
            .next()
            .map(from_row)
            .transpose()
    }

    /// The first row of `query`.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::OutOfRange` when the query matches nothing.
    pub fn find_one(&self, query: Query) -> Result<M> {
        let query = query.limit(1);
        let row = self
            .executor
            .select(&query)?
            .into_iter()
            .next()
            .ok_or_else(|| FuelError::OutOfRange(format!("no row in {} matches", M::TABLE)))?;
        from_row(row)
    }

    pub fn find_all(&self, query: Query) -> Result<Vec<M>> {
        self.executor
            .select(&query)?
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn count(&self, query: Query) -> Result<usize> {
        self.executor.count(&query)
    }

    /// Runs a convention finder such as `find_one_by_email`.
    pub fn call(&self, method: &str, args: Vec<Value>) -> Result<Found<M>> {
        let finder = FinderCall::parse(method)?;
        let kind = finder.kind;
        let query = finder.into_query(M::TABLE, args)?;
        match kind {
            FinderKind::One => self.find_one(query).map(Found::One),
            FinderKind::All => self.find_all(query).map(Found::Many),
            FinderKind::Count => self.count(query).map(Found::Count),
        }
    }
}

fn from_row<M: DeserializeOwned>(row: Row) -> Result<M> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// In-memory executor, tables keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    tables: BTreeMap<String, Vec<Row>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `row` to `table`. Non-object values are ignored.
    pub fn insert(&mut self, table: &str, row: Value) {
        if let Value::Object(row) = row {
            self.tables.entry(table.to_string()).or_default().push(row);
        }
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

impl QueryExecutor for MemoryTable {
    fn select(&self, query: &Query) -> Result<Vec<Row>> {
        let mut rows: Vec<Row> = self
            .tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();

        if !query.order_by.is_empty() {
            rows.sort_by(|a, b| {
                query
                    .order_by
                    .iter()
                    .map(|(column, direction)| {
                        let ordering = compare(a.get(column), b.get(column));
                        match direction {
                            Direction::Asc => ordering,
                            Direction::Desc => ordering.reverse(),
                        }
                    })
                    .find(|o| o.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(query.offset).take(limit).collect())
    }

    fn count(&self, query: &Query) -> Result<usize> {
        Ok(self
            .tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).count())
            .unwrap_or(0))
    }
}
