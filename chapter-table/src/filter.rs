//! Faceted filtering and text search.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chapter_lib::model::Record;
use log::trace;
use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;
use nucleo_matcher::pattern::Pattern;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::facet::FilterOption;
use crate::registry::OrderedColumns;

/// Selected facet keys of one column.
pub type FacetSet = BTreeSet<String>;

/// Active filter selections keyed by column id.
///
/// Columns with an empty set are not filtered; they are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    selected: BTreeMap<String, FacetSet>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used to seed pre-selected filters.
    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.selected
            .entry(column_id.into())
            .or_default()
            .insert(value.into());
        self
    }

    /// Returns `true` if at least one column has a selection.
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selected(&self, column_id: &str) -> Option<&FacetSet> {
        self.selected.get(column_id)
    }

    pub fn is_selected(&self, column_id: &str, value: &str) -> bool {
        self.selected
            .get(column_id)
            .is_some_and(|set| set.contains(value))
    }

    /// Columns with a non-empty selection.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &FacetSet)> {
        self.selected.iter().map(|(id, set)| (id.as_str(), set))
    }

    /// Flips one value. Returns `true` if the value is selected afterwards.
    pub(crate) fn toggle(&mut self, column_id: &str, value: &str) -> bool {
        let set = self.selected.entry(column_id.to_string()).or_default();
        let now_selected = if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        };
        if set.is_empty() {
            self.selected.remove(column_id);
        }
        now_selected
    }

    pub(crate) fn set(&mut self, column_id: &str, values: FacetSet) {
        if values.is_empty() {
            self.selected.remove(column_id);
        } else {
            self.selected.insert(column_id.to_string(), values);
        }
    }

    /// Clears every column's selection.
    pub(crate) fn reset(&mut self) {
        self.selected.clear();
    }

    /// Copy of the state without one column's selection.
    fn without(&self, column_id: &str) -> FilterState {
        let mut other = self.clone();
        other.selected.remove(column_id);
        other
    }
}

/// Evaluates filter state against rows using registered column definitions.
pub struct FilterEngine<'a> {
    columns: &'a OrderedColumns,
}

impl<'a> FilterEngine<'a> {
    pub fn new(columns: &'a OrderedColumns) -> Self {
        Self { columns }
    }

    /// Fails with `UnknownColumn` if the state names an unregistered column.
    pub fn validate(&self, state: &FilterState) -> Result<()> {
        for (column_id, _) in state.columns() {
            self.columns.require(column_id)?;
        }
        Ok(())
    }

    /// Keep/reject decision for one row.
    ///
    /// Columns combine with AND, values within a column with OR. Selections on
    /// unregistered columns reject every row; [`validate`](Self::validate)
    /// keeps them out of a view's state.
    pub fn evaluate(&self, row: &Record, state: &FilterState) -> bool {
        state.columns().all(|(column_id, selected)| {
            self.columns
                .get(column_id)
                .is_some_and(|column| column.matches(row, selected))
        })
    }

    /// Rows that pass `state`, in input order.
    pub fn apply<'r>(
        &self,
        rows: impl IntoIterator<Item = &'r Record>,
        state: &FilterState,
    ) -> Vec<&'r Record> {
        rows.into_iter()
            .filter(|row| self.evaluate(row, state))
            .collect()
    }

    /// For each option of a column, the number of rows that would remain if
    /// only that option were selected on the column, keeping every other
    /// column's selection.
    pub fn facet_counts<'r>(
        &self,
        rows: impl IntoIterator<Item = &'r Record>,
        state: &FilterState,
        column_id: &str,
        options: &[FilterOption],
    ) -> Result<Vec<usize>> {
        let column = self.columns.require(column_id)?;
        let others = state.without(column_id);
        let candidates = self.apply(rows, &others);

        let counts: Vec<usize> = options
            .iter()
            .map(|option| {
                let single = FacetSet::from([option.value.clone()]);
                candidates
                    .iter()
                    .filter(|row| column.matches(row, &single))
                    .count()
            })
            .collect();
        trace!("Facet counts for {column_id}: {counts:?}");
        Ok(counts)
    }
}

/// Free-text query bound to one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub column_id: Option<String>,
    pub query: String,
}

impl SearchState {
    pub fn new(column_id: Option<String>) -> Self {
        Self {
            column_id,
            query: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.column_id.is_some() && !self.query.trim().is_empty()
    }

    /// Matcher for the current query, or `None` when every row matches.
    pub fn matcher(&self) -> Option<TextSearch> {
        if !self.is_active() {
            return None;
        }
        Some(TextSearch::new(&self.query))
    }
}

/// Case-insensitive fuzzy matcher.
pub struct TextSearch {
    pattern: Pattern,
    matcher: Matcher,
    buf: Vec<char>,
}

impl TextSearch {
    pub fn new(query: &str) -> Self {
        Self {
            pattern: Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    pub fn matches(&mut self, text: &str) -> bool {
        let haystack = Utf32Str::new(text, &mut self.buf);
        self.pattern.score(haystack, &mut self.matcher).is_some()
    }
}
