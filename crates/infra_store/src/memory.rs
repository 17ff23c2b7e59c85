//! In-process table store
//!
//! Behaves like the hosted store for the subset of features the repositories
//! use: server-assigned `id` and `created_at`, equality filters, ordering
//! with nulls last on ascending columns, column projection, one level of
//! foreign-key embedding, and upsert on a conflict column.
//!
//! Assigned `created_at` values are strictly increasing, so ordering by
//! creation time is deterministic even for rows inserted in the same
//! microsecond.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};

use crate::error::StoreError;
use crate::query::{Direction, Filter, OrderBy, Row, Select};
use crate::store::{StoreBackend, TableStore};

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<String, Vec<Row>>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    fn next_created_at(&mut self) -> String {
        let now = Utc::now();
        let stamp = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(stamp);
        stamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn table(&mut self, name: &str) -> &mut Vec<Row> {
        self.rows.entry(name.to_string()).or_default()
    }

    /// Fills `id` and `created_at` when the caller left them out
    fn with_defaults(&mut self, mut row: Map<String, Value>) -> Map<String, Value> {
        if row.get("id").map_or(true, Value::is_null) {
            row.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        if row.get("created_at").map_or(true, Value::is_null) {
            let created_at = self.next_created_at();
            row.insert("created_at".to_string(), Value::String(created_at));
        }
        row
    }
}

/// Table store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row of a table in insertion order
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .await
            .rows
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of rows in a table
    pub async fn count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .rows
            .get(table)
            .map_or(0, Vec::len)
    }
}

impl DomainPort for MemoryStore {}

#[async_trait]
impl HealthCheckable for MemoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("memory-store", AdapterHealth::Healthy, 0)
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().await;
        let Some(rows) = tables.rows.get(&query.table) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Row> = rows.iter().filter(|row| query.matches(row)).collect();
        matched.sort_by(|a, b| compare_rows(a, b, &query.order));

        Ok(matched
            .into_iter()
            .map(|row| project(row, query, &tables.rows))
            .collect())
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError> {
        let fields = into_object(row)?;
        let mut tables = self.tables.write().await;
        let stored = Value::Object(tables.with_defaults(fields));
        tables.table(table).push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> Result<Row, StoreError> {
        if filters.is_empty() {
            return Err(StoreError::QueryFailed(format!(
                "refusing to update {} without a filter",
                table
            )));
        }
        let patch = into_object(patch)?;
        let mut tables = self.tables.write().await;
        let rows = tables.table(table);

        let positions: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| filters.iter().all(|f| f.matches(row)))
            .map(|(i, _)| i)
            .collect();

        match positions.as_slice() {
            [] => Err(StoreError::NotFound(format!(
                "no row in {} matched the query",
                table
            ))),
            [index] => {
                let row = &mut rows[*index];
                merge(row, patch);
                Ok(row.clone())
            }
            many => Err(StoreError::MultipleRows(many.len())),
        }
    }

    async fn upsert(&self, table: &str, row: Row, on_conflict: &str) -> Result<Row, StoreError> {
        let fields = into_object(row)?;
        let key = match fields.get(on_conflict) {
            Some(value) if !value.is_null() => value.clone(),
            _ => {
                return Err(StoreError::ConstraintViolation(format!(
                    "upsert into {} requires a value for '{}'",
                    table, on_conflict
                )))
            }
        };

        let mut tables = self.tables.write().await;
        let conflict = Filter::eq(on_conflict, key);
        if let Some(existing) = tables.table(table).iter_mut().find(|r| conflict.matches(r)) {
            merge(existing, fields);
            return Ok(existing.clone());
        }

        let stored = Value::Object(tables.with_defaults(fields));
        tables.table(table).push(stored.clone());
        Ok(stored)
    }
}

fn into_object(row: Row) -> Result<Map<String, Value>, StoreError> {
    match row {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::SerializationError(format!(
            "expected a JSON object row, got {}",
            other
        ))),
    }
}

fn merge(row: &mut Row, patch: Map<String, Value>) {
    if let Value::Object(fields) = row {
        fields.extend(patch);
    }
}

fn compare_rows(a: &Row, b: &Row, order: &[OrderBy]) -> Ordering {
    order
        .iter()
        .map(|term| {
            let left = a.get(&term.column).unwrap_or(&Value::Null);
            let right = b.get(&term.column).unwrap_or(&Value::Null);
            match term.direction {
                Direction::Ascending => compare_values(left, right),
                Direction::Descending => compare_values(left, right).reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Nulls sort after every value, as Postgres does by default
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn project(row: &Row, query: &Select, tables: &HashMap<String, Vec<Row>>) -> Row {
    let mut out = match (&query.columns[..], row) {
        ([], Value::Object(fields)) => fields.clone(),
        (columns, Value::Object(fields)) => columns
            .iter()
            .filter_map(|c| fields.get(c).map(|v| (c.clone(), v.clone())))
            .collect(),
        _ => Map::new(),
    };

    for embed in &query.embeds {
        let related = row
            .get(&embed.foreign_key)
            .filter(|key| !key.is_null())
            .and_then(|key| {
                tables
                    .get(&embed.table)?
                    .iter()
                    .find(|candidate| candidate.get("id") == Some(key))
            })
            .map(|found| pick(found, &embed.columns))
            .unwrap_or(Value::Null);
        out.insert(embed.alias.clone(), related);
    }

    Value::Object(out)
}

fn pick(row: &Row, columns: &[String]) -> Row {
    if columns.is_empty() {
        return row.clone();
    }
    let fields = columns
        .iter()
        .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
        .collect();
    Value::Object(fields)
}
