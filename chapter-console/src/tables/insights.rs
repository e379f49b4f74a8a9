//! Insight record table

use chapter_lib::model::RecordType;
use chapter_lib::model::camel_case;
use chapter_table::CellRenderer;
use chapter_table::ColumnDefinition;
use chapter_table::ColumnSet;
use chapter_table::FilterOption;
use chapter_table::LookupTable;
use chapter_table::RecordNoun;
use chapter_table::TableOptions;
use chapter_table::ToolbarFilter;

use super::TablePreset;

pub const TABLE_KEY: &str = "insights";

/// Scores every imported record is rated on.
pub const SCORE_NAMES: [&str; 1] = ["Input Quality"];

pub fn type_lookup() -> LookupTable {
    RecordType::ALL
        .iter()
        .map(|kind| {
            let (label, icon) = match kind {
                RecordType::SurveyResponse => ("Survey Response", "stack"),
                RecordType::Notes => ("Notes", "file-text"),
                RecordType::ChatTranscript => ("Chat Transcript", "chat-bubble"),
                RecordType::CallTranscript => ("Call", "phone-call"),
                RecordType::Review => ("Review", "star-half"),
                RecordType::Post => ("Post", "sticky-note"),
            };
            FilterOption::labeled(kind.as_str(), label).with_icon(icon)
        })
        .collect::<Vec<_>>()
        .into()
}

pub fn source_lookup() -> LookupTable {
    LookupTable::new(vec![
        FilterOption::labeled("Nectar", "Survey"),
        FilterOption::new("Intercom").with_icon("intercom"),
        FilterOption::new("Gong").with_icon("gong"),
        FilterOption::new("Notion").with_icon("notion"),
        FilterOption::new("G2").with_icon("gong"),
        FilterOption::labeled("Apple App Store", "App Store").with_icon("apple"),
        FilterOption::labeled("Google Play Store", "Play Store").with_icon("google-play"),
    ])
}

/// Labels of the 1 to 5 rating scale.
pub fn rating_lookup() -> LookupTable {
    ["Poor", "Fair", "Good", "Great", "Excellent"]
        .iter()
        .enumerate()
        .map(|(i, label)| FilterOption::labeled((i + 1).to_string(), *label))
        .collect::<Vec<_>>()
        .into()
}

pub fn columns() -> ColumnSet {
    let base = vec![
        ColumnDefinition::new("date", "Date").cell(CellRenderer::date()),
        ColumnDefinition::new("dataSourceName", "Source").cell(CellRenderer::Lookup(source_lookup())),
        ColumnDefinition::new("externalName", "Name"),
        ColumnDefinition::new("type", "Type").cell(CellRenderer::Lookup(type_lookup())),
    ];
    let scores = SCORE_NAMES
        .iter()
        .map(|name| ColumnDefinition::new(camel_case(name), *name).cell(CellRenderer::Rating(rating_lookup())));
    ColumnSet::new(base).append(scores)
}

pub fn catalog() -> Vec<ToolbarFilter> {
    vec![
        ToolbarFilter::from_lookup("type", "Type", &type_lookup()),
        ToolbarFilter::from_lookup("dataSourceName", "Source", &source_lookup()),
    ]
}

pub fn options() -> TableOptions {
    TableOptions::new()
        .row_selection(true)
        .non_clickable(["select"])
        .search_column("externalName")
        .page_size(25)
        .record_noun(RecordNoun::new("Record", "Records"))
}

pub fn preset() -> TablePreset {
    TablePreset {
        key: TABLE_KEY.to_string(),
        title: "Records".to_string(),
        columns: columns(),
        catalog: catalog(),
        options: options(),
    }
}

#[cfg(test)]
mod tests {
    use chapter_lib::model::Record;

    use super::*;

    #[test]
    fn test_type_and_source_labels() {
        let columns = columns().register().unwrap();
        let row = Record::new("1")
            .set("type", "call_transcript")
            .set("dataSourceName", "Apple App Store")
            .set("inputQuality", 4i64);

        let kind = columns.get("type").unwrap().render(&row);
        assert_eq!(kind.text, "Call");
        assert_eq!(kind.icon.as_ref().map(|i| i.name()), Some("phone-call"));
        assert_eq!(columns.get("dataSourceName").unwrap().render(&row).text, "App Store");
        assert_eq!(columns.get("inputQuality").unwrap().render(&row).text, "Great");
    }

    #[test]
    fn test_unknown_rating_shows_raw_score() {
        let columns = columns().register().unwrap();
        let row = Record::new("1").set("inputQuality", 9i64);
        assert_eq!(columns.get("inputQuality").unwrap().render(&row).text, "9");
    }
}
