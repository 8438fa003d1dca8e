//! In-process evaluation of filters and pipeline stages over JSON documents.
//! Shared by the in-memory engine and by the Postgres engine for the stages it
//! does not push down into SQL.

use crate::domain::documents::{
    Comparison, Condition, Document, Filter, ID_FIELD, SortKey, SortOrder, Stage,
};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Resolves a dotted path such as `name.firstName`.
pub fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

pub fn matches(document: &Value, filter: &Filter) -> bool {
    filter
        .conditions()
        .iter()
        .all(|condition| satisfies(document, condition))
}

fn satisfies(document: &Value, condition: &Condition) -> bool {
    let actual = lookup(document, &condition.path);
    match &condition.comparison {
        Comparison::Eq(expected) => actual == Some(expected),
        // a missing field is "not equal", so documents without the flag pass
        Comparison::Ne(expected) => actual != Some(expected),
        Comparison::In(candidates) => actual.is_some_and(|value| candidates.contains(value)),
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

/// Total order used by `Sort`: missing/null < numbers < strings < objects <
/// arrays < booleans; values of the same type compare naturally.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Array(x)), Some(Value::Array(y))) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(Some(l), Some(r)))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Some(Value::Object(x)), Some(Value::Object(y))) => x.len().cmp(&y.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn sort(documents: &mut [Document], keys: &[SortKey]) {
    // stable, so ties keep the incoming order
    documents.sort_by(|a, b| {
        keys.iter()
            .map(|key| {
                let ordering = compare_values(lookup(a, &key.path), lookup(b, &key.path));
                match key.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            })
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

fn project(document: &Value, paths: &[String]) -> Document {
    let mut projected = Value::Object(Map::new());
    if let Some(id) = document.get(ID_FIELD) {
        insert_path(&mut projected, ID_FIELD, id.clone());
    }
    for path in paths {
        if let Some(value) = lookup(document, path) {
            insert_path(&mut projected, path, value.clone());
        }
    }
    projected
}

fn insert_path(target: &mut Value, path: &str, value: Value) {
    let Value::Object(map) = target else {
        return;
    };
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            insert_path(child, rest, value);
        }
    }
}

/// Runs `stages` in order over `documents`.
pub fn run_pipeline(mut documents: Vec<Document>, stages: &[Stage]) -> Vec<Document> {
    for stage in stages {
        documents = match stage {
            Stage::Match(filter) => documents
                .into_iter()
                .filter(|d| matches(d, filter))
                .collect(),
            Stage::Sort(keys) => {
                sort(&mut documents, keys);
                documents
            }
            Stage::Skip(n) => documents.into_iter().skip(*n).collect(),
            Stage::Limit(n) => documents.into_iter().take(*n).collect(),
            Stage::Project(paths) => documents.iter().map(|d| project(d, paths)).collect(),
            Stage::Count(field) => {
                let mut counted = Map::new();
                counted.insert(field.clone(), Value::from(documents.len()));
                vec![Value::Object(counted)]
            }
        };
    }
    documents
}

/// Recursively merges `patch` into `target`. Objects merge key by key; any
/// other patch value replaces the target value.
pub fn merge(target: &mut Value, patch: Value) {
    match patch {
        Value::Object(changes) if target.is_object() => {
            if let Value::Object(existing) = target {
                for (key, value) in changes {
                    match existing.get_mut(&key) {
                        Some(slot) => merge(slot, value),
                        None => {
                            existing.insert(key, value);
                        }
                    }
                }
            }
        }
        other => *target = other,
    }
}
