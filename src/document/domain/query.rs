//! Filtered and ordered query model.
//!
//! Queries are evaluated by the store, never by its callers: repositories
//! describe the filter and ordering they need and take the result as-is.

use super::Fields;
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Predicate over a single top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The field equals the value.
    Eq {
        /// Field name.
        field: String,
        /// Expected value.
        value: Value,
    },
    /// The field is an array containing an element equal to the value.
    ArrayContains {
        /// Field name.
        field: String,
        /// Element that must be present.
        value: Value,
    },
    /// The field is an array containing at least one of the values.
    ArrayContainsAny {
        /// Field name.
        field: String,
        /// Candidate elements.
        values: Vec<Value>,
    },
}

impl Filter {
    /// Builds an equality filter.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds an array-membership filter.
    #[must_use]
    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds an any-of array-membership filter.
    #[must_use]
    pub fn array_contains_any(
        field: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self::ArrayContainsAny {
            field: field.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Returns the field the filter inspects.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Eq { field, .. }
            | Self::ArrayContains { field, .. }
            | Self::ArrayContainsAny { field, .. } => field,
        }
    }

    /// Returns `true` when the document fields satisfy the filter.
    ///
    /// Documents lacking the field never match.
    #[must_use]
    pub fn matches(&self, fields: &Fields) -> bool {
        let Some(actual) = fields.get(self.field()) else {
            return false;
        };
        match self {
            Self::Eq { value, .. } => actual == value,
            Self::ArrayContains { value, .. } => actual
                .as_array()
                .is_some_and(|items| items.contains(value)),
            Self::ArrayContainsAny { values, .. } => actual
                .as_array()
                .is_some_and(|items| items.iter().any(|item| values.contains(item))),
        }
    }
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

/// Ordering on a single top-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field name.
    pub field: String,
    /// Sort direction.
    pub direction: Direction,
}

impl OrderBy {
    /// Orders by the field, smallest first.
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    /// Orders by the field, largest first.
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }

    /// Compares two documents by the ordered field.
    ///
    /// Missing fields sort before present ones in ascending order.
    #[must_use]
    pub fn compare(&self, left: &Fields, right: &Fields) -> Ordering {
        let ordering = compare_values(left.get(&self.field), right.get(&self.field));
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// A collection query: optional filter plus optional ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    /// Restricts the result to matching documents.
    pub filter: Option<Filter>,
    /// Sorts the result.
    pub order_by: Option<OrderBy>,
}

impl DocumentQuery {
    /// Creates an unfiltered, unordered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn ordered_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left_value), Some(right_value)) => compare_present(left_value, right_value),
    }
}

fn compare_present(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

fn compare_numbers(left: &Number, right: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return a.cmp(&b);
    }
    let a = left.as_f64().unwrap_or_default();
    let b = right.as_f64().unwrap_or_default();
    a.total_cmp(&b)
}

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
