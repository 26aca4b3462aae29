//! In-process remote store backend.
//!
//! Evaluates the same `Query` model as the PostgREST backend against tables
//! held in memory: filters, `or` groups, ordering, paging, column projection
//! and `alias:table!fk(...)` embedding. Rows get an `id` and `created_at`
//! when inserted without them. Used for local development and the test
//! suites; failures can be injected per table and operation.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Filter, Query, RemoteStore, StoreError, StoreResponse, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Select,
    Insert,
    Update,
    Delete,
}

impl StoreOperation {
    fn as_str(&self) -> &'static str {
        match self {
            StoreOperation::Select => "select",
            StoreOperation::Insert => "insert",
            StoreOperation::Update => "update",
            StoreOperation::Delete => "delete",
        }
    }
}

#[derive(Default)]
struct Tables {
    rows: HashMap<String, Vec<Value>>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing creation timestamps so newest-first ordering is stable.
    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_created_at {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_created_at = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failures: RwLock<HashSet<(String, StoreOperation)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert rows directly, bypassing injected failures.
    pub async fn seed(&self, table: &str, rows: Vec<Value>) -> StoreResult<Vec<Value>> {
        let mut tables = self.tables.write().await;
        insert_rows(&mut tables, table, rows)
    }

    /// Snapshot of a table's rows in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let tables = self.tables.read().await;
        tables.rows.get(table).cloned().unwrap_or_default()
    }

    /// Make every subsequent `op` on `table` fail with a remote error.
    pub async fn fail_on(&self, table: &str, op: StoreOperation) {
        self.failures.write().await.insert((table.to_string(), op));
    }

    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    async fn check_failure(&self, table: &str, op: StoreOperation) -> StoreResult<()> {
        if self
            .failures
            .read()
            .await
            .contains(&(table.to_string(), op))
        {
            return Err(StoreError::Remote {
                status: 400,
                message: format!("simulated {} failure on {}", op.as_str(), table),
                code: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> StoreResult<StoreResponse> {
        self.check_failure(table, StoreOperation::Select).await?;
        let tables = self.tables.read().await;

        let mut rows: Vec<&Value> = tables
            .rows
            .get(table)
            .map(|rows| rows.iter().filter(|row| row_matches(row, query)).collect())
            .unwrap_or_default();

        sort_rows(&mut rows, query);

        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        let items = match &query.select {
            Some(select) => Some(parse_select(select)?),
            None => None,
        };

        let rows = rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| match &items {
                Some(items) => project(row, table, items, &tables.rows),
                None => row.clone(),
            })
            .collect();

        Ok(StoreResponse { status: 200, rows })
    }

    async fn insert(&self, table: &str, rows: Value) -> StoreResult<StoreResponse> {
        self.check_failure(table, StoreOperation::Insert).await?;
        let rows = match rows {
            Value::Array(rows) => rows,
            row => vec![row],
        };

        let mut tables = self.tables.write().await;
        let inserted = insert_rows(&mut tables, table, rows)?;
        Ok(StoreResponse {
            status: 201,
            rows: inserted,
        })
    }

    async fn update(
        &self,
        table: &str,
        query: &Query,
        changes: Value,
    ) -> StoreResult<StoreResponse> {
        self.check_failure(table, StoreOperation::Update).await?;
        let Value::Object(changes) = changes else {
            return Err(StoreError::Decode("update body must be a JSON object".to_string()));
        };

        let mut tables = self.tables.write().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.rows.get_mut(table) {
            for row in rows.iter_mut().filter(|row| row_matches(row, query)) {
                if let Value::Object(fields) = row {
                    for (key, value) in &changes {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }

        Ok(StoreResponse {
            status: 200,
            rows: updated,
        })
    }

    async fn delete(&self, table: &str, query: &Query) -> StoreResult<StoreResponse> {
        self.check_failure(table, StoreOperation::Delete).await?;
        let mut tables = self.tables.write().await;
        let mut deleted = Vec::new();
        if let Some(rows) = tables.rows.get_mut(table) {
            let (removed, kept): (Vec<Value>, Vec<Value>) =
                rows.drain(..).partition(|row| row_matches(row, query));
            *rows = kept;
            deleted = removed;
        }

        Ok(StoreResponse {
            status: 200,
            rows: deleted,
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

fn insert_rows(tables: &mut Tables, table: &str, rows: Vec<Value>) -> StoreResult<Vec<Value>> {
    let mut prepared = Vec::with_capacity(rows.len());
    for row in rows {
        let Value::Object(mut fields) = row else {
            return Err(StoreError::Decode("inserted rows must be JSON objects".to_string()));
        };
        if !fields.contains_key("id") {
            fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        if !fields.contains_key("created_at") {
            fields.insert("created_at".to_string(), Value::String(tables.next_timestamp()));
        }
        prepared.push(Value::Object(fields));
    }

    let existing = tables.rows.entry(table.to_string()).or_default();
    for row in &prepared {
        if existing.iter().any(|other| other.get("id") == row.get("id")) {
            return Err(StoreError::Remote {
                status: 409,
                message: format!(
                    "duplicate key value violates unique constraint \"{}_pkey\"",
                    table
                ),
                code: Some("23505".to_string()),
            });
        }
    }
    existing.extend(prepared.iter().cloned());
    Ok(prepared)
}

fn row_matches(row: &Value, query: &Query) -> bool {
    query.filters.iter().all(|filter| filter_matches(row, filter))
        && query
            .any_of
            .iter()
            .all(|group| group.iter().any(|filter| filter_matches(row, filter)))
}

fn filter_matches(row: &Value, filter: &Filter) -> bool {
    let cell = row.get(&filter.column).unwrap_or(&Value::Null);
    compare_cell(cell, &filter.value) == Some(Ordering::Equal)
}

/// SQL comparison of a cell against a textual operand. `None` when either
/// side is null or the operand does not parse as the cell's type.
fn compare_cell(cell: &Value, operand: &str) -> Option<Ordering> {
    match cell {
        Value::Null => None,
        Value::Bool(b) => operand.parse::<bool>().ok().map(|o| b.cmp(&o)),
        Value::Number(n) => {
            let left = n.as_f64()?;
            let right = operand.parse::<f64>().ok()?;
            left.partial_cmp(&right)
        }
        Value::String(s) => Some(s.as_str().cmp(operand)),
        other => Some(other.to_string().as_str().cmp(operand)),
    }
}

fn sort_rows(rows: &mut [&Value], query: &Query) {
    if query.order.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for order in &query.order {
            let left = a.get(&order.column).unwrap_or(&Value::Null);
            let right = b.get(&order.column).unwrap_or(&Value::Null);
            let ordering = compare_values(left, right);
            let ordering = if order.ascending {
                ordering
            } else {
                ordering.reverse()
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Total order used for sorting; nulls sort after every other value.
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (a, b) => a.to_string().cmp(&b.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SelectItem {
    All,
    Column {
        alias: Option<String>,
        name: String,
    },
    Embed {
        alias: Option<String>,
        table: String,
        hint: Option<String>,
        items: Vec<SelectItem>,
    },
}

fn parse_select(select: &str) -> StoreResult<Vec<SelectItem>> {
    let compact: String = select.chars().filter(|c| !c.is_whitespace()).collect();
    split_top_level(&compact)?
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(parse_select_item)
        .collect()
}

fn split_top_level(select: &str) -> StoreResult<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in select.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    StoreError::Decode(format!("unbalanced parentheses in select: {}", select))
                })?
            }
            ',' if depth == 0 => {
                parts.push(&select[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(StoreError::Decode(format!(
            "unbalanced parentheses in select: {}",
            select
        )));
    }
    parts.push(&select[start..]);
    Ok(parts)
}

fn parse_select_item(item: &str) -> StoreResult<SelectItem> {
    if item == "*" {
        return Ok(SelectItem::All);
    }

    let (alias, rest) = match item.split_once(':') {
        Some((alias, rest)) if !alias.contains('(') => (Some(alias.to_string()), rest),
        _ => (None, item),
    };

    match rest.find('(') {
        Some(open) if rest.ends_with(')') => {
            let head = &rest[..open];
            let inner = &rest[open + 1..rest.len() - 1];
            let (table, hint) = match head.split_once('!') {
                Some((table, hint)) => (table.to_string(), Some(hint.to_string())),
                None => (head.to_string(), None),
            };
            Ok(SelectItem::Embed {
                alias,
                table,
                hint,
                items: parse_select(inner)?,
            })
        }
        Some(_) => Err(StoreError::Decode(format!("invalid select item: {}", item))),
        None => Ok(SelectItem::Column {
            alias,
            name: rest.to_string(),
        }),
    }
}

fn project(
    row: &Value,
    table: &str,
    items: &[SelectItem],
    tables: &HashMap<String, Vec<Value>>,
) -> Value {
    let Value::Object(fields) = row else {
        return row.clone();
    };

    let mut out = Map::new();
    for item in items {
        match item {
            SelectItem::All => {
                for (key, value) in fields {
                    out.insert(key.clone(), value.clone());
                }
            }
            SelectItem::Column { alias, name } => {
                let value = fields.get(name).cloned().unwrap_or(Value::Null);
                out.insert(alias.clone().unwrap_or_else(|| name.clone()), value);
            }
            SelectItem::Embed {
                alias,
                table: target,
                hint,
                items,
            } => {
                let key = alias.clone().unwrap_or_else(|| target.clone());
                let embedded = embed(fields, table, &key, target, hint.as_deref(), items, tables);
                out.insert(key, embedded);
            }
        }
    }
    Value::Object(out)
}

/// Resolve one embedded relation.
///
/// When the row itself carries the foreign key column (the hint, or
/// `{alias}_id`), the relation is many-to-one and embeds a single object or
/// null. Otherwise the target rows referencing this row's id are embedded
/// as an array.
fn embed(
    fields: &Map<String, Value>,
    table: &str,
    key: &str,
    target: &str,
    hint: Option<&str>,
    items: &[SelectItem],
    tables: &HashMap<String, Vec<Value>>,
) -> Value {
    let empty = Vec::new();
    let target_rows = tables.get(target).unwrap_or(&empty);

    let local_fk = hint
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_id", key));
    if let Some(reference) = fields.get(&local_fk) {
        return target_rows
            .iter()
            .find(|candidate| !reference.is_null() && candidate.get("id") == Some(reference))
            .map(|candidate| project(candidate, target, items, tables))
            .unwrap_or(Value::Null);
    }

    let remote_fk = hint
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_id", table.trim_end_matches('s')));
    let id = fields.get("id");
    Value::Array(
        target_rows
            .iter()
            .filter(|candidate| id.is_some() && candidate.get(&remote_fk) == id)
            .map(|candidate| project(candidate, target, items, tables))
            .collect(),
    )
}
