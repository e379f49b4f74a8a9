//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value that can hold any table field type.
///
/// Records handed to the table engine are flattened from domain objects, so a
/// field is either a scalar, a list of values (tool stacks, investors) or one
/// level of nested object (a location, an org-size breakdown).
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer | `Long` |
/// | fractional number | `Float` |
/// | RFC 3339 string | `DateTime` |
/// | any other string | `String` |
/// | array | `List` |
/// | object | `Object` |
///
/// # Example
///
/// ```
/// use chapter_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let headcount = Value::from(250i64);
/// let tools = Value::from(vec!["Rust", "Docker"]);
/// assert_eq!(tools.facet_keys(), vec!["Rust".to_string(), "Docker".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// String value.
    String(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Shallow nested object.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Long(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key of a nested object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// The key a scalar contributes to a facet filter.
    ///
    /// Null, lists and objects have no single key.
    pub fn facet_key(&self) -> Option<String> {
        match self {
            Value::Null | Value::List(_) | Value::Object(_) => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Long(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::DateTime(dt) => Some(dt.to_rfc3339()),
            Value::String(s) => Some(s.clone()),
        }
    }

    /// All facet keys of the value: one for a scalar, one per scalar element
    /// of a list, none for null.
    pub fn facet_keys(&self) -> Vec<String> {
        match self {
            Value::List(items) => items.iter().filter_map(Value::facet_key).collect(),
            other => other.facet_key().into_iter().collect(),
        }
    }

    /// Total order used for sorting table rows.
    ///
    /// Nulls sort after everything else, numbers compare numerically across
    /// `Long` and `Float`, strings compare case-insensitively. Values of
    /// unrelated types fall back to a fixed type rank.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.len().cmp(&b.len()),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.type_rank().cmp(&b.type_rank()),
            },
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Long(_) | Value::Float(_) => 1,
            Value::DateTime(_) => 2,
            Value::String(_) => 3,
            Value::List(_) => 4,
            Value::Object(_) => 5,
            Value::Null => 6,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d")),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(map) => {
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Long(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_variants() {
        let json = r#"[null, true, 42, 1.5, "2024-03-01T10:00:00Z", "Seed", ["a"], {"country": "UK"}]"#;
        let values: Vec<Value> = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = values.iter().map(Value::type_name).collect();
        assert_eq!(
            names,
            vec!["null", "bool", "long", "float", "datetime", "string", "list", "object"]
        );
    }

    #[test]
    fn test_facet_keys() {
        assert!(Value::Null.facet_keys().is_empty());
        assert_eq!(Value::from(5i64).facet_keys(), vec!["5".to_string()]);
        let list = Value::from(vec![Value::from("a"), Value::Null, Value::from("b")]);
        assert_eq!(list.facet_keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_sort_cmp_nulls_last_and_numeric() {
        assert_eq!(Value::Null.sort_cmp(&Value::from(1i64)), Ordering::Greater);
        assert_eq!(Value::from(2i64).sort_cmp(&Value::from(10.5)), Ordering::Less);
        assert_eq!(Value::from("apple").sort_cmp(&Value::from("Banana")), Ordering::Less);
    }

    #[test]
    fn test_display_list_and_object() {
        let list = Value::from(vec!["Accel", "a16z"]);
        assert_eq!(list.to_string(), "Accel, a16z");

        let mut map = BTreeMap::new();
        map.insert("country".to_string(), Value::from("France"));
        assert_eq!(Value::from(map).to_string(), "country: France");
    }
}
