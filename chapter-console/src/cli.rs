//! Command line interface

use std::path::PathBuf;

use chapter_lib::model::OpportunityStage;
use chapter_table::SortDirection;
use clap::Parser;
use clap::ValueEnum;

use crate::error::ConsoleError;
use crate::pages::Interactions;
use crate::pages::PageKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageArg {
    Opportunities,
    Project,
    Insights,
}

impl From<PageArg> for PageKind {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Opportunities => PageKind::Opportunities,
            PageArg::Project => PageKind::Project,
            PageArg::Insights => PageKind::Insights,
        }
    }
}

/// Render a console page from a dataset file.
#[derive(Debug, Parser)]
#[command(name = "chapter-console", version)]
pub struct Cli {
    /// Page to open.
    #[arg(value_enum)]
    pub page: PageArg,

    /// JSON dataset to load.
    #[arg(long)]
    pub data: PathBuf,

    /// Toggle a filter option, as column=value.
    #[arg(long = "filter", value_name = "COLUMN=VALUE")]
    pub filters: Vec<String>,

    /// Hide a column.
    #[arg(long = "hide", value_name = "COLUMN")]
    pub hide: Vec<String>,

    /// Show a column hidden by default or by an earlier run.
    #[arg(long = "show", value_name = "COLUMN")]
    pub show: Vec<String>,

    /// Text for the toolbar search box.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by a column, as column or column:desc.
    #[arg(long, value_name = "COLUMN[:desc]")]
    pub sort: Option<String>,

    /// Select a row by id.
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Select every row that passes the filters.
    #[arg(long)]
    pub select_all: bool,

    /// Move an opportunity to another stage, as id=Stage.
    #[arg(long = "stage", value_name = "ID=STAGE")]
    pub stages: Vec<String>,

    /// Click a cell, as id:column.
    #[arg(long = "click", value_name = "ID:COLUMN")]
    pub clicks: Vec<String>,

    /// Page to show, starting at 1.
    #[arg(long = "page", value_name = "N")]
    pub page_number: Option<usize>,

    /// Rows per page; 0 shows every row.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Forget the page's saved column visibility.
    #[arg(long)]
    pub reset_columns: bool,

    /// Settings database; defaults to the platform data directory.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Keep settings in memory only.
    #[arg(long)]
    pub no_persist: bool,

    /// Log verbosely.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses the interaction arguments.
    pub fn interactions(&self) -> Result<Interactions, ConsoleError> {
        let filters = self
            .filters
            .iter()
            .map(|arg| split_pair(arg, '='))
            .collect::<Result<_, _>>()?;
        let clicks = self
            .clicks
            .iter()
            .map(|arg| split_pair(arg, ':'))
            .collect::<Result<_, _>>()?;
        let stage_changes = self
            .stages
            .iter()
            .map(|arg| {
                let (id, stage) = split_pair(arg, '=')?;
                let stage: OpportunityStage = stage
                    .parse()
                    .map_err(|err| ConsoleError::InvalidArgument(format!("{err}")))?;
                Ok((id, stage))
            })
            .collect::<Result<_, ConsoleError>>()?;

        Ok(Interactions {
            hide: self.hide.clone(),
            show: self.show.clone(),
            filters,
            search: self.search.clone(),
            sort: self.sort.as_deref().map(parse_sort).transpose()?,
            select: self.select.clone(),
            select_all: self.select_all,
            stage_changes,
            clicks,
            page: self.page_number,
            page_size: self.page_size,
            reset_columns: self.reset_columns,
        })
    }
}

/// Splits `left<sep>right`, both sides non-empty.
fn split_pair(arg: &str, sep: char) -> Result<(String, String), ConsoleError> {
    match arg.split_once(sep) {
        Some((left, right)) if !left.is_empty() && !right.is_empty() => {
            Ok((left.to_string(), right.to_string()))
        }
        _ => Err(ConsoleError::InvalidArgument(format!(
            "expected two values separated by '{sep}', got '{arg}'"
        ))),
    }
}

fn parse_sort(arg: &str) -> Result<(String, SortDirection), ConsoleError> {
    let (column, direction) = match arg.split_once(':') {
        Some((column, "asc")) => (column, SortDirection::Ascending),
        Some((column, "desc")) => (column, SortDirection::Descending),
        Some((_, other)) => {
            return Err(ConsoleError::InvalidArgument(format!(
                "unknown sort direction '{other}'"
            )));
        }
        None => (arg, SortDirection::Ascending),
    };
    if column.is_empty() {
        return Err(ConsoleError::InvalidArgument("empty sort column".to_string()));
    }
    Ok((column.to_string(), direction))
}
