//! Column definitions.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chapter_lib::model::Record;
use chapter_lib::model::Value;
use unicode_width::UnicodeWidthChar;

use crate::facet::Icon;
use crate::facet::LookupTable;

/// Normalizes a raw value into the facet key it is filtered under.
pub type BucketFn = fn(&Value) -> Option<String>;

/// Decides whether a raw value matches the selected facet keys.
pub type MatchFn = fn(&Value, &BTreeSet<String>) -> bool;

/// Formats a raw value for display.
pub type FormatFn = fn(&Value) -> String;

/// Orders two raw values of one column.
pub type CompareFn = fn(&Value, &Value) -> Ordering;

/// Default date format of [`CellRenderer::Date`].
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// How a column decides whether a row passes its filter.
///
/// Columns without a predicate use plain membership: a scalar matches when its
/// facet key is selected, a list when any element is.
#[derive(Clone, Copy)]
pub enum FilterPredicate {
    /// Normalize the value first, then test membership of the result.
    Bucket(BucketFn),
    /// Fully custom decision.
    Custom(MatchFn),
}

impl FilterPredicate {
    pub fn bucket(f: BucketFn) -> Self {
        Self::Bucket(f)
    }

    pub fn custom(f: MatchFn) -> Self {
        Self::Custom(f)
    }

    /// Evaluates the predicate for a present, non-null value.
    pub fn matches(&self, value: &Value, selected: &BTreeSet<String>) -> bool {
        match self {
            FilterPredicate::Bucket(bucket) => {
                bucket(value).is_some_and(|key| selected.contains(&key))
            }
            FilterPredicate::Custom(f) => f(value, selected),
        }
    }
}

impl fmt::Debug for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPredicate::Bucket(_) => f.write_str("FilterPredicate::Bucket"),
            FilterPredicate::Custom(_) => f.write_str("FilterPredicate::Custom"),
        }
    }
}

/// Default membership rule.
pub fn membership(value: &Value, selected: &BTreeSet<String>) -> bool {
    value.facet_keys().iter().any(|key| selected.contains(key))
}

/// Text and optional icon of one rendered cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellContent {
    pub text: String,
    pub icon: Option<Icon>,
}

impl CellContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.icon.is_none()
    }
}

/// Cell rendering rule of a column. Missing and null values render as an
/// empty cell for every variant.
#[derive(Clone)]
pub enum CellRenderer {
    /// The value's display text.
    Text,
    /// A timestamp in the given `chrono` format.
    Date { format: String },
    /// Label and icon from a lookup table; unknown values render empty.
    Lookup(LookupTable),
    /// Comma-joined list truncated to `max_chars` display columns.
    List { max_chars: usize },
    /// List elements that appear in the allow-list, joined as badges.
    Badges { allow: Vec<String> },
    /// Score label from a lookup table; unknown scores render empty.
    Rating(LookupTable),
    Custom(FormatFn),
}

impl CellRenderer {
    pub fn date() -> Self {
        Self::Date {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn render(&self, value: Option<&Value>) -> CellContent {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return CellContent::default();
        };

        match self {
            CellRenderer::Text => CellContent::text(value.to_string()),
            CellRenderer::Date { format } => match value.as_datetime() {
                Some(dt) => CellContent::text(dt.format(format).to_string()),
                None => CellContent::text(value.to_string()),
            },
            CellRenderer::Lookup(table) | CellRenderer::Rating(table) => match table.get(value) {
                Some(entry) => CellContent {
                    text: entry.label.clone(),
                    icon: entry.icon.clone(),
                },
                None => CellContent::default(),
            },
            CellRenderer::List { max_chars } => {
                CellContent::text(truncate(&value.to_string(), *max_chars))
            }
            CellRenderer::Badges { allow } => {
                let badges: Vec<String> = value
                    .facet_keys()
                    .into_iter()
                    .filter(|key| allow.contains(key))
                    .map(|key| format!("[{key}]"))
                    .collect();
                CellContent::text(badges.join(" "))
            }
            CellRenderer::Custom(format) => CellContent::text(format(value)),
        }
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRenderer::Text => f.write_str("Text"),
            CellRenderer::Date { format } => f.debug_struct("Date").field("format", format).finish(),
            CellRenderer::Lookup(table) => f.debug_tuple("Lookup").field(table).finish(),
            CellRenderer::List { max_chars } => {
                f.debug_struct("List").field("max_chars", max_chars).finish()
            }
            CellRenderer::Badges { allow } => f.debug_struct("Badges").field("allow", allow).finish(),
            CellRenderer::Rating(table) => f.debug_tuple("Rating").field(table).finish(),
            CellRenderer::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Truncates `text` to at most `max` display columns, ending in `...` when
/// anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    let width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max {
        return text.to_string();
    }

    let budget = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// One displayable column of a table.
///
/// # Example
///
/// ```
/// use chapter_table::{CellRenderer, ColumnDefinition};
///
/// let column = ColumnDefinition::new("investors", "Investors")
///     .cell(CellRenderer::List { max_chars: 30 })
///     .sortable(false);
///
/// assert_eq!(column.accessor_path(), "investors");
/// assert!(column.is_hideable());
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    id: String,
    header: String,
    accessor: String,
    cell: CellRenderer,
    filter: Option<FilterPredicate>,
    comparator: Option<CompareFn>,
    sortable: bool,
    hideable: bool,
}

impl ColumnDefinition {
    /// A text column reading the field named like its id; sortable and
    /// hideable.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: id.clone(),
            id,
            header: header.into(),
            cell: CellRenderer::Text,
            filter: None,
            comparator: None,
            sortable: true,
            hideable: true,
        }
    }

    /// Record field (or `parent.child` path) the column reads.
    pub fn accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = accessor.into();
        self
    }

    pub fn cell(mut self, cell: CellRenderer) -> Self {
        self.cell = cell;
        self
    }

    pub fn filter(mut self, predicate: FilterPredicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Comparator used instead of the default value ordering.
    pub fn sort_by(mut self, comparator: CompareFn) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn accessor_path(&self) -> &str {
        &self.accessor
    }

    pub fn renderer(&self) -> &CellRenderer {
        &self.cell
    }

    pub fn predicate(&self) -> Option<&FilterPredicate> {
        self.filter.as_ref()
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_hideable(&self) -> bool {
        self.hideable
    }

    /// Raw value of this column in a row.
    pub fn value<'r>(&self, row: &'r Record) -> Option<&'r Value> {
        row.lookup(&self.accessor)
    }

    pub fn render(&self, row: &Record) -> CellContent {
        self.cell.render(self.value(row))
    }

    /// Whether a row passes this column's filter with the given selection.
    ///
    /// An empty selection keeps every row. Once a selection exists, missing
    /// and null values never match.
    pub fn matches(&self, row: &Record, selected: &BTreeSet<String>) -> bool {
        if selected.is_empty() {
            return true;
        }
        let Some(value) = self.value(row).filter(|v| !v.is_null()) else {
            return false;
        };
        match &self.filter {
            Some(predicate) => predicate.matches(value, selected),
            None => membership(value, selected),
        }
    }

    /// Orders two rows by this column. Nulls and missing values sort last
    /// regardless of direction, so callers only reverse `compare_present`.
    pub fn compare_present(&self, a: &Value, b: &Value) -> Ordering {
        match self.comparator {
            Some(cmp) => cmp(a, b),
            None => a.sort_cmp(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::FilterOption;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn parity(value: &Value) -> Option<String> {
        value.as_i64().map(|n| if n % 2 == 0 { "even" } else { "odd" }.to_string())
    }

    #[test]
    fn test_builder_defaults() {
        let column = ColumnDefinition::new("stage", "Stage");
        assert_eq!(column.accessor_path(), "stage");
        assert!(column.is_sortable());
        assert!(column.is_hideable());
        assert!(column.predicate().is_none());
    }

    #[test]
    fn test_membership_scalar_and_list() {
        let stage = ColumnDefinition::new("stage", "Stage");
        let tools = ColumnDefinition::new("tools", "Tools");
        let row = Record::new("1")
            .set("stage", "Qualified")
            .set("tools", vec!["Rust", "Docker"]);

        assert!(stage.matches(&row, &set(&["Qualified", "Customer"])));
        assert!(!stage.matches(&row, &set(&["Customer"])));
        assert!(tools.matches(&row, &set(&["Docker"])));
        assert!(!tools.matches(&row, &set(&["Cypress"])));
    }

    #[test]
    fn test_missing_value_only_fails_active_filter() {
        let column = ColumnDefinition::new("industry", "Industry");
        let row = Record::new("1").set("industry", Value::Null);

        assert!(column.matches(&row, &BTreeSet::new()));
        assert!(!column.matches(&row, &set(&["Fintech"])));
        assert!(!column.matches(&Record::new("2"), &set(&["Fintech"])));
    }

    #[test]
    fn test_bucket_predicate() {
        let column = ColumnDefinition::new("n", "N").filter(FilterPredicate::bucket(parity));
        assert!(column.matches(&Record::new("1").set("n", 4i64), &set(&["even"])));
        assert!(!column.matches(&Record::new("2").set("n", 3i64), &set(&["even"])));
    }

    #[test]
    fn test_render_variants() {
        let row = Record::new("1")
            .set("date", "2024-03-05T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap())
            .set("type", "notes")
            .set("investors", vec!["Sequoia Capital", "Lightspeed Venture Partners"])
            .set("tools", vec!["Rust", "Docker", "Cypress"])
            .set("score", 9i64);

        let date = ColumnDefinition::new("date", "Date").cell(CellRenderer::date());
        assert_eq!(date.render(&row).text, "Mar 5, 2024");

        let lookup = LookupTable::new(vec![FilterOption::labeled("notes", "Notes").with_icon("file")]);
        let kind = ColumnDefinition::new("type", "Type").cell(CellRenderer::Lookup(lookup.clone()));
        let content = kind.render(&row);
        assert_eq!(content.text, "Notes");
        assert_eq!(content.icon, Some(Icon::new("file")));

        let investors =
            ColumnDefinition::new("investors", "Investors").cell(CellRenderer::List { max_chars: 20 });
        assert_eq!(investors.render(&row).text, "Sequoia Capital, ...");

        let tools = ColumnDefinition::new("tools", "Tools").cell(CellRenderer::Badges {
            allow: vec!["Cypress".to_string(), "Rust".to_string()],
        });
        assert_eq!(tools.render(&row).text, "[Rust] [Cypress]");

        let rating = ColumnDefinition::new("score", "Score").cell(CellRenderer::Rating(lookup));
        assert!(rating.render(&row).is_empty());

        let scale = LookupTable::new(vec![FilterOption::labeled("9", "Excellent")]);
        let rating = ColumnDefinition::new("score", "Score").cell(CellRenderer::Rating(scale));
        assert_eq!(rating.render(&row).text, "Excellent");

        let missing = ColumnDefinition::new("absent", "Absent").cell(CellRenderer::date());
        assert!(missing.render(&row).is_empty());
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate("Accel", 10), "Accel");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
