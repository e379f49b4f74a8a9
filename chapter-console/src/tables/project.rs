//! Project response table.
//!
//! The score columns are generated from the project's score definitions and
//! appended to a fixed base list.

use std::collections::BTreeSet;

use chapter_lib::model::Project;
use chapter_lib::model::ProjectResponse;
use chapter_lib::model::ScoreDefinition;
use chapter_table::CellRenderer;
use chapter_table::ColumnDefinition;
use chapter_table::ColumnSet;
use chapter_table::FilterOption;
use chapter_table::RecordNoun;
use chapter_table::TableOptions;
use chapter_table::ToolbarFilter;

use super::TablePreset;

pub fn table_key(project: &Project) -> String {
    format!("project/{}", project.id)
}

pub fn base_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("date", "Date").cell(CellRenderer::date()),
        ColumnDefinition::new("participant", "Participant"),
        ColumnDefinition::new("stage", "Stage"),
    ]
}

/// One column per score definition, keyed by the camel-cased score name.
pub fn score_columns(definitions: &[ScoreDefinition]) -> Vec<ColumnDefinition> {
    definitions
        .iter()
        .map(|def| ColumnDefinition::new(def.field_name(), def.name.clone()))
        .collect()
}

pub fn columns(project: &Project) -> ColumnSet {
    ColumnSet::new(base_columns()).append(score_columns(&project.score_definitions))
}

/// Stage options are the stages present in the responses; score options
/// are the points of each score's scale.
pub fn catalog(project: &Project, responses: &[ProjectResponse]) -> Vec<ToolbarFilter> {
    let stages: BTreeSet<&str> = responses.iter().map(|r| r.state.stage.as_str()).collect();
    let mut catalog = vec![ToolbarFilter::new(
        "stage",
        "Stage",
        stages.into_iter().map(FilterOption::new).collect(),
    )];
    catalog.extend(
        project
            .score_definitions
            .iter()
            .filter(|def| !def.scale.is_empty())
            .map(|def| {
                ToolbarFilter::new(
                    def.field_name(),
                    def.name.clone(),
                    def.scale.iter().map(|point| FilterOption::new(point.to_string())).collect(),
                )
            }),
    );
    catalog
}

pub fn options() -> TableOptions {
    TableOptions::new()
        .search_column("participant")
        .page_size(25)
        .record_noun(RecordNoun::new("Response", "Responses"))
}

pub fn preset(project: &Project, responses: &[ProjectResponse]) -> TablePreset {
    TablePreset {
        key: table_key(project),
        title: project.name.clone(),
        columns: columns(project),
        catalog: catalog(project, responses),
        options: options(),
    }
}
