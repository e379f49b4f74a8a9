//! Data table engine.
//!
//! Hosts register columns, supply records and a filter catalog, and drive a
//! [`TableView`] with user interactions. The view filters, sorts, paginates
//! and renders rows into a device-independent [`RenderedTable`]; the
//! [`ToolbarModel`] is a read-only view over the same state.
//!
//! ```
//! use chapter_lib::model::Record;
//! use chapter_table::{ColumnDefinition, ColumnSet, TableOptions, TableView};
//!
//! let columns = ColumnSet::new(vec![
//!     ColumnDefinition::new("companyName", "Company"),
//!     ColumnDefinition::new("stage", "Stage"),
//! ])
//! .register()
//! .unwrap();
//!
//! let mut view = TableView::new(columns, vec![], TableOptions::new()).unwrap();
//! view.set_records(vec![
//!     Record::new("1").set("companyName", "Contoso").set("stage", "Qualified"),
//!     Record::new("2").set("companyName", "Acme").set("stage", "Customer"),
//! ]);
//! view.toggle_filter("stage", "Customer").unwrap();
//!
//! assert_eq!(view.render().rows.len(), 1);
//! ```

mod column;
mod error;
mod facet;
mod filter;
mod registry;
mod selection;
mod sort;
mod toolbar;
mod view;
mod visibility;

pub use column::BucketFn;
pub use column::CellContent;
pub use column::CellRenderer;
pub use column::ColumnDefinition;
pub use column::CompareFn;
pub use column::DEFAULT_DATE_FORMAT;
pub use column::FilterPredicate;
pub use column::FormatFn;
pub use column::MatchFn;
pub use column::membership;
pub use column::truncate;
pub use error::TableError;
pub use facet::FilterOption;
pub use facet::Icon;
pub use facet::LookupTable;
pub use facet::ToolbarFilter;
pub use filter::FacetSet;
pub use filter::FilterEngine;
pub use filter::FilterState;
pub use filter::SearchState;
pub use filter::TextSearch;
pub use registry::ColumnSet;
pub use registry::OrderedColumns;
pub use registry::SELECT_COLUMN_ID;
pub use registry::register;
pub use selection::SelectionChange;
pub use selection::SelectionController;
pub use selection::SelectionMode;
pub use sort::SortDirection;
pub use sort::SortState;
pub use sort::next_sort;
pub use sort::sort_rows;
pub use toolbar::FilterPicker;
pub use toolbar::PickerOption;
pub use toolbar::SearchBox;
pub use toolbar::ToolbarAction;
pub use toolbar::ToolbarModel;
pub use toolbar::VisibilityMenuItem;
pub use view::ClickOutcome;
pub use view::HeaderCell;
pub use view::RecordNoun;
pub use view::RenderedCell;
pub use view::RenderedRow;
pub use view::RenderedTable;
pub use view::RowState;
pub use view::SelectionPolicy;
pub use view::TableOptions;
pub use view::TableView;
pub use visibility::VisibilityController;
pub use visibility::VisibilityState;
