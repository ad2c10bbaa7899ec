//! Exact-match filters built from query parameters.

use std::fmt;

use serde_json::Value;

use crate::document::Document;

/// Normalize a raw query-string value.
///
/// Text that parses as a signed 64-bit integer literal becomes a JSON
/// integer so numeric fields can be queried through the URL. Anything else
/// is kept as a string.
#[must_use]
pub fn coerce_query_value(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(number) => Value::from(number),
        Err(_) => Value::from(raw),
    }
}

/// A conjunction of `field == value` conditions over top-level document fields.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, FilterValue)>,
}

/// The right-hand side of a single filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl FilterValue {
    fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Integer(expected), Value::Number(actual)) => number_eq(*expected, actual),
            (Self::Text(expected), Value::String(actual)) => expected == actual,
            _ => false,
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
fn number_eq(expected: i64, actual: &serde_json::Number) -> bool {
    if let Some(actual) = actual.as_i64() {
        return actual == expected;
    }
    actual.as_f64() == Some(expected as f64)
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) if n.is_i64() => Self::Integer(n.as_i64().unwrap_or_default()),
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}

impl Filter {
    /// Build a filter from decoded query parameters, coercing integer-looking
    /// values with [`coerce_query_value`].
    ///
    /// A repeated key keeps its first value; later occurrences are ignored.
    pub fn from_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in params {
            let key = key.into();
            if filter.conditions.iter().any(|(name, _)| *name == key) {
                continue;
            }
            let value = coerce_query_value(value.as_ref()).into();
            filter.conditions.push((key, value));
        }
        filter
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Iterate over `(field, value)` conditions in insertion order.
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.conditions
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    /// Check whether `document` satisfies every condition.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            document
                .get(field)
                .is_some_and(|actual| expected.matches(&actual))
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, value)) in self.conditions.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match value {
                FilterValue::Integer(n) => write!(f, "{field}={n}")?,
                FilterValue::Text(s) => write!(f, "{field}={s:?}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Fields;
    use crate::id::DocumentId;
    use serde_json::json;

    fn car(id: i64, value: Value) -> Document {
        let Value::Object(fields) = value else {
            panic!("expected object");
        };
        Document::new(DocumentId::new(id), fields)
    }

    #[test]
    fn should_coerce_integer_literals() {
        assert_eq!(coerce_query_value("2020"), json!(2020));
        assert_eq!(coerce_query_value("-3"), json!(-3));
        assert_eq!(coerce_query_value("+7"), json!(7));
    }

    #[test]
    fn should_keep_non_integer_text_as_string() {
        assert_eq!(coerce_query_value("blue"), json!("blue"));
        assert_eq!(coerce_query_value("18000.5"), json!("18000.5"));
        assert_eq!(coerce_query_value(""), json!(""));
        assert_eq!(coerce_query_value(" 12"), json!(" 12"));
    }

    #[test]
    fn should_match_everything_when_empty() {
        let filter = Filter::from_query(Vec::<(String, String)>::new());
        assert!(filter.is_empty());
        assert!(filter.matches(&car(1, json!({}))));
    }

    #[test]
    fn should_match_integer_field_only_against_numbers() {
        let filter = Filter::from_query([("year", "2020")]);
        assert!(filter.matches(&car(1, json!({"year": 2020}))));
        assert!(!filter.matches(&car(2, json!({"year": "2020"}))));
        assert!(!filter.matches(&car(3, json!({"year": 2019}))));
    }

    #[test]
    fn should_match_integer_filter_against_whole_float() {
        let filter = Filter::from_query([("price", "18000")]);
        assert!(filter.matches(&car(1, json!({"price": 18000.0}))));
        assert!(!filter.matches(&car(2, json!({"price": 18000.5}))));
    }

    #[test]
    fn should_require_every_condition() {
        let filter = Filter::from_query([("brand", "Toyota"), ("color", "blue")]);
        assert!(filter.matches(&car(1, json!({"brand": "Toyota", "color": "blue"}))));
        assert!(!filter.matches(&car(2, json!({"brand": "Toyota", "color": "red"}))));
        assert!(!filter.matches(&car(3, json!({"brand": "Toyota"}))));
    }

    #[test]
    fn should_match_on_identifier() {
        let filter = Filter::from_query([("_id", "2")]);
        assert!(filter.matches(&car(2, json!({}))));
        assert!(!filter.matches(&car(1, json!({}))));
    }

    #[test]
    fn should_keep_first_value_for_repeated_key() {
        let filter = Filter::from_query([("color", "red"), ("year", "2020"), ("color", "blue")]);
        let conditions: Vec<_> = filter.conditions().collect();
        assert_eq!(
            conditions,
            vec![
                ("color", &FilterValue::Text("red".to_string())),
                ("year", &FilterValue::Integer(2020)),
            ]
        );
    }

    #[test]
    fn should_display_conditions() {
        let filter = Filter::from_query([("year", "2020"), ("color", "blue")]);
        assert_eq!(filter.to_string(), "year=2020, color=\"blue\"");
    }

    #[test]
    fn should_not_match_nested_values() {
        let mut fields = Fields::new();
        fields.insert("address".to_string(), json!({"city": "Berlin"}));
        let doc = Document::new(DocumentId::new(1), fields);
        let filter = Filter::from_query([("address", "Berlin")]);
        assert!(!filter.matches(&doc));
    }
}
