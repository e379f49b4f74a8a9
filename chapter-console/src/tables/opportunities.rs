//! Opportunities table

use std::cmp::Ordering;

use chapter_lib::model::FundingRound;
use chapter_lib::model::Icp;
use chapter_lib::model::OpportunityStage;
use chapter_lib::model::Value;
use chapter_table::CellRenderer;
use chapter_table::ColumnDefinition;
use chapter_table::ColumnSet;
use chapter_table::FilterOption;
use chapter_table::FilterPredicate;
use chapter_table::LookupTable;
use chapter_table::RecordNoun;
use chapter_table::TableOptions;
use chapter_table::ToolbarFilter;
use chapter_table::VisibilityState;

use super::TablePreset;

pub const TABLE_KEY: &str = "opportunities";

pub const COMPANY_SIZES: [&str; 6] = ["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

pub const REGIONS: [&str; 6] = ["Canada", "France", "Germany", "UK", "US", "Rest of the World"];

/// Tool filter options when the ICP names no tools.
pub const DEFAULT_TOOLS: [&str; 9] = [
    "Github Actions",
    "Cypress",
    "Playwright",
    "Docker",
    "Rust",
    "Kubernetes",
    "PyTorch",
    "TensorFlow",
    "HuggingFace",
];

/// Tools shown as badges when the ICP names no tools.
pub const BADGE_TOOLS: [&str; 6] = [
    "Github Actions",
    "Cypress",
    "Playwright",
    "PyTorch",
    "HuggingFace",
    "Kubernetes",
];

/// Investor filter options when the ICP names no investors.
pub const DEFAULT_INVESTORS: [&str; 7] = [
    "Y Combinator",
    "a16z",
    "Accel",
    "Sequoia Capital",
    "Redpoint",
    "Lightspeed Venture Partners",
    "Bessemer Venture Partners",
];

const INVESTOR_CHARS: usize = 40;

/// Company size bucket of a headcount.
pub fn size_bucket(value: &Value) -> Option<String> {
    let headcount = value.as_i64()?;
    let bucket = match headcount {
        ..=10 => "1-10",
        11..=50 => "11-50",
        51..=200 => "51-200",
        201..=500 => "201-500",
        501..=1000 => "501-1000",
        _ => "1000+",
    };
    Some(bucket.to_string())
}

/// Region filter value of a country name.
pub fn region(country: &str) -> &'static str {
    match country {
        "Canada" => "Canada",
        "France" => "France",
        "Germany" => "Germany",
        "UK" | "United Kingdom" => "UK",
        "US" | "United States" => "US",
        _ => "Rest of the World",
    }
}

fn location_bucket(value: &Value) -> Option<String> {
    let country = value.get("country")?.as_str()?;
    Some(region(country).to_string())
}

fn country_text(value: &Value) -> String {
    value
        .get("country")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn size_text(value: &Value) -> String {
    size_bucket(value).unwrap_or_default()
}

fn compare_country(a: &Value, b: &Value) -> Ordering {
    let country = |v: &Value| v.get("country").cloned().unwrap_or(Value::Null);
    country(a).sort_cmp(&country(b))
}

fn stage_lookup() -> LookupTable {
    OpportunityStage::ALL
        .iter()
        .map(|stage| FilterOption::new(stage.label()).with_icon("dot"))
        .collect::<Vec<_>>()
        .into()
}

fn funding_lookup() -> LookupTable {
    FundingRound::ALL
        .iter()
        .map(|round| FilterOption::new(round.label()).with_icon("dollar-sign"))
        .collect::<Vec<_>>()
        .into()
}

fn icp_or_default(icp: Option<&[String]>, fallback: &[&str]) -> Vec<String> {
    match icp {
        Some(values) if !values.is_empty() => values.to_vec(),
        _ => fallback.iter().map(|s| s.to_string()).collect(),
    }
}

/// Tools the tenant's ICP targets.
pub fn tools(icp: Option<&Icp>) -> Vec<String> {
    icp_or_default(icp.map(Icp::tools), &DEFAULT_TOOLS)
}

pub fn investors(icp: Option<&Icp>) -> Vec<String> {
    icp_or_default(icp.map(Icp::investors), &DEFAULT_INVESTORS)
}

/// Columns in display order. The tool badges follow the ICP.
pub fn columns(icp: Option<&Icp>) -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("id", "Id").sortable(false),
        ColumnDefinition::new("companyName", "Company"),
        ColumnDefinition::new("stage", "Stage").cell(CellRenderer::Lookup(stage_lookup())),
        ColumnDefinition::new("date", "Date").cell(CellRenderer::date()),
        ColumnDefinition::new("companySize", "Company Size")
            .cell(CellRenderer::Custom(size_text))
            .filter(FilterPredicate::bucket(size_bucket)),
        ColumnDefinition::new("orgSize", "Engineering Size").accessor("orgSize.engineering"),
        ColumnDefinition::new("fundingRound", "Funding").cell(CellRenderer::Lookup(funding_lookup())),
        ColumnDefinition::new("companyLocation", "Location")
            .cell(CellRenderer::Custom(country_text))
            .filter(FilterPredicate::bucket(location_bucket))
            .sort_by(compare_country),
        ColumnDefinition::new("industry", "Industry"),
        ColumnDefinition::new("tools", "Tool Stack")
            .cell(CellRenderer::Badges {
                allow: icp_or_default(icp.map(Icp::tools), &BADGE_TOOLS),
            })
            .sortable(false),
        ColumnDefinition::new("investors", "Investors")
            .cell(CellRenderer::List {
                max_chars: INVESTOR_CHARS,
            })
            .sortable(false),
    ]
}

/// Filter catalog; tool and investor options come from the ICP.
pub fn catalog(icp: Option<&Icp>) -> Vec<ToolbarFilter> {
    let plain = |values: Vec<String>| values.into_iter().map(FilterOption::new).collect();
    vec![
        ToolbarFilter::from_lookup("stage", "Stage", &stage_lookup()),
        ToolbarFilter::new(
            "companySize",
            "Company Size",
            COMPANY_SIZES
                .iter()
                .map(|size| FilterOption::new(*size).with_icon("circle-user"))
                .collect(),
        ),
        ToolbarFilter::from_lookup("fundingRound", "Funding", &funding_lookup()),
        ToolbarFilter::new(
            "companyLocation",
            "Location",
            REGIONS
                .iter()
                .map(|region| FilterOption::new(*region).with_icon("map-pin"))
                .collect(),
        ),
        ToolbarFilter::new("tools", "Tool Stack", plain(tools(icp))),
        ToolbarFilter::new("investors", "Investors", plain(investors(icp))),
    ]
}

pub fn default_visibility() -> VisibilityState {
    VisibilityState::from_iter([
        ("id", false),
        ("date", true),
        ("stage", true),
        ("companyName", true),
        ("companySize", true),
        ("fundingRound", true),
        ("companyLocation", true),
        ("industry", true),
    ])
}

pub fn options() -> TableOptions {
    TableOptions::new()
        .row_selection(true)
        .sticky_columns(1)
        .non_clickable(["select", "stage"])
        .default_visibility(default_visibility())
        .search_column("companyName")
        .page_size(25)
        .record_noun(RecordNoun::new("Opportunity", "Opportunities"))
}

pub fn preset(icp: Option<&Icp>) -> TablePreset {
    TablePreset {
        key: TABLE_KEY.to_string(),
        title: "All opportunities".to_string(),
        columns: ColumnSet::new(columns(icp)),
        catalog: catalog(icp),
        options: options(),
    }
}

#[cfg(test)]
mod tests {
    use chapter_lib::model::Record;

    use super::*;

    #[test]
    fn test_size_buckets() {
        let bucket = |n: i64| size_bucket(&Value::from(n));
        assert_eq!(bucket(1).as_deref(), Some("1-10"));
        assert_eq!(bucket(10).as_deref(), Some("1-10"));
        assert_eq!(bucket(11).as_deref(), Some("11-50"));
        assert_eq!(bucket(200).as_deref(), Some("51-200"));
        assert_eq!(bucket(1000).as_deref(), Some("501-1000"));
        assert_eq!(bucket(1001).as_deref(), Some("1000+"));
        assert_eq!(size_bucket(&Value::from("many")), None);
    }

    #[test]
    fn test_regions() {
        assert_eq!(region("United Kingdom"), "UK");
        assert_eq!(region("US"), "US");
        assert_eq!(region("Germany"), "Germany");
        assert_eq!(region("Japan"), "Rest of the World");
    }

    #[test]
    fn test_catalog_falls_back_without_icp() {
        let catalog = catalog(None);
        let tools = catalog.iter().find(|f| f.column_id == "tools").unwrap();
        assert_eq!(tools.options.len(), DEFAULT_TOOLS.len());
        let investors = catalog.iter().find(|f| f.column_id == "investors").unwrap();
        assert_eq!(investors.options[0].value, "Y Combinator");
    }

    #[test]
    fn test_location_column_renders_country_and_filters_region() {
        let columns = columns(None);
        let location = columns.iter().find(|c| c.id() == "companyLocation").unwrap();
        let mut country = std::collections::BTreeMap::new();
        country.insert("country".to_string(), Value::from("United States"));
        let row = Record::new("1").set("companyLocation", Value::Object(country));

        assert_eq!(location.render(&row).text, "United States");
        assert!(location.matches(&row, &["US".to_string()].into()));
        assert!(!location.matches(&row, &["UK".to_string()].into()));
    }

    #[test]
    fn test_preset_builds() {
        let view = preset(None).build().unwrap();
        assert_eq!(view.columns().ids()[0], "select");
        assert!(!view.is_column_shown("id"));
        assert!(view.is_column_shown("tools"));
    }
}
