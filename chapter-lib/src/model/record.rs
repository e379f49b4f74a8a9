//! Dynamic table record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;

use super::Value;
use crate::error::FieldError;

/// Field holding the row identifier.
pub const ID_FIELD: &str = "id";

/// One table row: a mapping from field name to value.
///
/// Records are what the table engine filters, sorts and renders. The row id is
/// kept in the `id` field so that it can be shown and accessed like any other
/// column. Hosts build records from their domain objects and re-supply a new
/// record whenever the underlying object changes.
///
/// # Example
///
/// ```
/// use chapter_lib::model::Record;
///
/// let record = Record::new("opp-1")
///     .set("companyName", "Contoso")
///     .set("companySize", 120i64);
///
/// assert_eq!(record.id(), "opp-1");
/// assert_eq!(record.get_string("companyName").unwrap(), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The row identifier, mirrored in `fields["id"]`.
    pub(crate) id: String,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new record with the given row id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let mut fields = HashMap::new();
        fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        Self { id, fields }
    }

    /// Builds a record from a field map, taking the id from its `id` field.
    ///
    /// Numeric ids are accepted and rendered as their decimal string.
    pub fn from_fields(fields: HashMap<String, Value>) -> Result<Self, FieldError> {
        let id = fields
            .get(ID_FIELD)
            .and_then(Value::facet_key)
            .ok_or(FieldError::MissingId)?;
        Ok(Self { id, fields })
    }

    /// Returns the row identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Resolves an accessor path.
    ///
    /// A plain field name is looked up directly; `parent.child` reads one
    /// level into a nested object. A key containing a dot that exists verbatim
    /// wins over the nested lookup.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }
        let (parent, child) = path.split_once('.')?;
        self.fields.get(parent).and_then(|value| value.get(child))
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value. Writing `id` is ignored; the row id is fixed.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        if field == ID_FIELD {
            return;
        }
        self.fields.insert(field, value.into());
    }

    /// Removes a field and returns its value. The `id` field cannot be removed.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        if field == ID_FIELD {
            return None;
        }
        self.fields.remove(field)
    }

    /// Returns a copy of this record with every field of `update` laid over
    /// it. Records with different ids are not merged.
    pub fn merged(&self, update: &Record) -> Record {
        let mut merged = self.clone();
        if update.id != self.id {
            return merged;
        }
        for (field, value) in &update.fields {
            merged.fields.insert(field.clone(), value.clone());
        }
        merged
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an i64 field value.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Long(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Long(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a DateTime field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(field, "datetime", other.type_name())),
        }
    }

    /// Gets a list field value.
    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::List(items)) => Ok(Some(items)),
            Some(other) => Err(FieldError::type_mismatch(field, "list", other.type_name())),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_id_is_a_field() {
        let record = Record::new("r1");
        assert_eq!(record.get("id"), Some(&Value::from("r1")));
    }

    #[test]
    fn test_insert_cannot_overwrite_id() {
        let mut record = Record::new("r1");
        record.insert("id", "r2");
        assert_eq!(record.id(), "r1");
        assert!(record.remove("id").is_none());
    }

    #[test]
    fn test_lookup_nested() {
        let mut location = BTreeMap::new();
        location.insert("country".to_string(), Value::from("Germany"));
        let record = Record::new("r1").set("companyLocation", location);

        assert_eq!(
            record.lookup("companyLocation.country"),
            Some(&Value::from("Germany"))
        );
        assert!(record.lookup("companyLocation.city").is_none());
        assert!(record.lookup("missing.country").is_none());
    }

    #[test]
    fn test_typed_getters() {
        let record = Record::new("r1")
            .set("headcount", 12i64)
            .set("notes", Value::Null);

        assert_eq!(record.get_long("headcount").unwrap(), Some(12));
        assert_eq!(record.get_float("headcount").unwrap(), Some(12.0));
        assert_eq!(record.get_string("notes").unwrap(), None);
        assert_eq!(
            record.get_string("headcount").unwrap_err(),
            FieldError::type_mismatch("headcount", "string", "long")
        );
        assert_eq!(
            record.get_bool("absent").unwrap_err(),
            FieldError::missing("absent")
        );
    }

    #[test]
    fn test_merged_overlays_fields() {
        let base = Record::new("r1").set("stage", "Identified").set("industry", "Fintech");
        let update = Record::new("r1").set("stage", "Qualified");
        let merged = base.merged(&update);

        assert_eq!(merged.get_string("stage").unwrap(), Some("Qualified"));
        assert_eq!(merged.get_string("industry").unwrap(), Some("Fintech"));

        let other = Record::new("r2").set("stage", "Customer");
        assert_eq!(base.merged(&other), base);
    }

    #[test]
    fn test_from_fields_numeric_id() {
        let mut fields = HashMap::new();
        fields.insert("id".to_string(), Value::from(7i64));
        let record = Record::from_fields(fields).unwrap();
        assert_eq!(record.id(), "7");

        assert_eq!(
            Record::from_fields(HashMap::new()).unwrap_err(),
            FieldError::MissingId
        );
    }
}
