//! Table presets of the console pages.
//!
//! A preset is everything a page hands the table engine: the column
//! definitions, the filter catalog and the table options, plus the key its
//! column visibility is stored under.

pub mod insights;
pub mod opportunities;
pub mod project;

use chapter_table::ColumnSet;
use chapter_table::TableError;
use chapter_table::TableOptions;
use chapter_table::TableView;
use chapter_table::ToolbarFilter;

#[derive(Debug, Clone)]
pub struct TablePreset {
    /// Settings key of the table.
    pub key: String,
    /// Page heading.
    pub title: String,
    pub columns: ColumnSet,
    pub catalog: Vec<ToolbarFilter>,
    pub options: TableOptions,
}

impl TablePreset {
    pub fn build(self) -> Result<TableView, TableError> {
        let columns = self.columns.register()?;
        TableView::new(columns, self.catalog, self.options)
    }
}
