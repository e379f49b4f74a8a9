//! Facet options and the lookup tables built from them.

use chapter_lib::model::Value;

/// Opaque glyph name shown next to a label. How it is drawn is up to the
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon(String);

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// One selectable value of a column's filter picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Facet key matched against row values.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
    pub icon: Option<Icon>,
}

impl FilterOption {
    /// An option whose label is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            icon: None,
        }
    }

    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(Icon::new(icon));
        self
    }
}

/// Value to label/icon mapping shared by a cell renderer and the filter
/// picker of the same column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: Vec<FilterOption>,
}

impl LookupTable {
    pub fn new(entries: Vec<FilterOption>) -> Self {
        Self { entries }
    }

    /// Entry whose value equals the value's facet key.
    pub fn get(&self, value: &Value) -> Option<&FilterOption> {
        let key = value.facet_key()?;
        self.get_key(&key)
    }

    pub fn get_key(&self, key: &str) -> Option<&FilterOption> {
        self.entries.iter().find(|entry| entry.value == key)
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<FilterOption>> for LookupTable {
    fn from(entries: Vec<FilterOption>) -> Self {
        Self::new(entries)
    }
}

/// Filter catalog entry: the picker the toolbar shows for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarFilter {
    pub column_id: String,
    pub label: String,
    pub options: Vec<FilterOption>,
}

impl ToolbarFilter {
    pub fn new(
        column_id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            label: label.into(),
            options,
        }
    }

    /// Picker listing every entry of a lookup table.
    pub fn from_lookup(
        column_id: impl Into<String>,
        label: impl Into<String>,
        table: &LookupTable,
    ) -> Self {
        Self::new(column_id, label, table.options().to_vec())
    }

    pub fn option(&self, value: &str) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_facet_key() {
        let table = LookupTable::new(vec![
            FilterOption::labeled("Nectar", "Survey"),
            FilterOption::new("Gong").with_icon("gong"),
        ]);

        assert_eq!(table.get(&Value::from("Nectar")).map(|o| o.label.as_str()), Some("Survey"));
        assert_eq!(
            table.get(&Value::from("Gong")).and_then(|o| o.icon.as_ref()).map(Icon::name),
            Some("gong")
        );
        assert!(table.get(&Value::Null).is_none());
        assert!(table.get(&Value::from("Zendesk")).is_none());
    }

    #[test]
    fn test_numeric_keys() {
        let table = LookupTable::new(vec![FilterOption::labeled("4", "Good")]);
        assert_eq!(table.get(&Value::from(4i64)).map(|o| o.label.as_str()), Some("Good"));
    }

    #[test]
    fn test_picker_from_lookup_shares_entries() {
        let table = LookupTable::new(vec![FilterOption::new("a"), FilterOption::new("b")]);
        let picker = ToolbarFilter::from_lookup("type", "Type", &table);
        assert_eq!(picker.options, table.options());
        assert!(picker.option("b").is_some());
    }
}
