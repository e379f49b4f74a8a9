use std::path::Path;

use chapter_console::data::Dataset;
use chapter_console::error::ConsoleError;
use chapter_console::pages::Interactions;
use chapter_console::pages::PageKind;
use chapter_console::pages::open_page;
use chapter_console::settings::SettingsProvider;
use chapter_lib::auth::UserProfile;
use chapter_lib::model::OpportunityStage;
use chapter_table::SortDirection;
use chapter_table::TableError;

const CONTOSO: &str = "00000000-0000-0000-0000-000000000001";
const ACME: &str = "00000000-0000-0000-0000-000000000002";
const ADA_RESPONSE: &str = "00000000-0000-0000-0000-000000000101";

async fn dataset() -> Dataset {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dataset.json");
    Dataset::load(&path).await.unwrap()
}

fn profile() -> UserProfile {
    UserProfile {
        email: "ada@example.com".to_string(),
        name: None,
        tenant: None,
    }
}

fn filter(column: &str, value: &str) -> (String, String) {
    (column.to_string(), value.to_string())
}

#[tokio::test]
async fn test_size_filter_keeps_smallest_company() {
    let interactions = Interactions {
        filters: vec![filter("companySize", "1-10")],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let output = open_page(PageKind::Opportunities, &dataset().await, &interactions, &settings, None)
        .await
        .unwrap();

    assert!(output.text.starts_with("All opportunities (1 Opportunity)"));
    assert!(output.text.contains("Contoso"));
    assert!(!output.text.contains("Acme"));
    assert!(output.text.contains("[Reset]"));
}

#[tokio::test]
async fn test_repeated_filter_stays_selected() {
    let interactions = Interactions {
        filters: vec![filter("companySize", "1-10"), filter("companySize", "1-10")],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let output = open_page(PageKind::Opportunities, &dataset().await, &interactions, &settings, None)
        .await
        .unwrap();

    assert!(output.text.starts_with("All opportunities (1 Opportunity)"));
    assert!(!output.text.contains("Acme"));
}

#[tokio::test]
async fn test_location_filter_uses_region() {
    let interactions = Interactions {
        filters: vec![filter("companyLocation", "US")],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let output = open_page(PageKind::Opportunities, &dataset().await, &interactions, &settings, None)
        .await
        .unwrap();

    assert!(output.text.contains("United States"));
    assert!(!output.text.contains("Contoso"));
    assert!(!output.text.contains("Globex"));
}

#[tokio::test]
async fn test_stage_change_goes_through_store() {
    let interactions = Interactions {
        filters: vec![filter("stage", "Customer")],
        stage_changes: vec![(CONTOSO.to_string(), OpportunityStage::Customer)],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let output = open_page(PageKind::Opportunities, &dataset().await, &interactions, &settings, None)
        .await
        .unwrap();

    assert!(output.text.contains("Contoso"));
    assert!(output.text.contains("Globex"));
    assert!(!output.text.contains("Acme"));
    assert!(output.events.opened.is_empty());
    assert_eq!(
        output.events.cell_interactions,
        vec![(CONTOSO.to_string(), "stage".to_string())]
    );
}

#[tokio::test]
async fn test_row_click_records_recently_viewed() {
    let interactions = Interactions {
        clicks: vec![(ACME.to_string(), "companyName".to_string())],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let user = profile();
    let output = open_page(
        PageKind::Opportunities,
        &dataset().await,
        &interactions,
        &settings,
        Some(&user),
    )
    .await
    .unwrap();

    assert_eq!(output.events.opened, vec![ACME.to_string()]);
    assert!(output.text.contains("Opened: Acme pilot [Identified] Acme, Retail"));
    assert!(output.text.contains("Recently viewed by ada@example.com: Acme pilot"));
    assert_eq!(settings.recently_viewed(&user.email).await.unwrap(), vec![ACME.to_string()]);
}

#[tokio::test]
async fn test_select_cell_does_not_open_row() {
    let interactions = Interactions {
        clicks: vec![(ACME.to_string(), "select".to_string())],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let output = open_page(PageKind::Opportunities, &dataset().await, &interactions, &settings, None)
        .await
        .unwrap();

    assert!(output.events.opened.is_empty());
    assert_eq!(output.events.selected, vec![ACME.to_string()]);
    assert!(output.text.contains("Selected: Acme pilot"));
}

#[tokio::test]
async fn test_hidden_column_is_remembered() {
    let data = dataset().await;
    let settings = SettingsProvider::in_memory();
    let hide = Interactions {
        hide: vec!["industry".to_string()],
        ..Interactions::default()
    };
    open_page(PageKind::Opportunities, &data, &hide, &settings, None)
        .await
        .unwrap();

    let stored = settings.visibility("opportunities").await.unwrap().unwrap();
    assert_eq!(stored.get("industry"), Some(false));

    let output = open_page(PageKind::Opportunities, &data, &Interactions::default(), &settings, None)
        .await
        .unwrap();
    assert!(output.text.contains("[ ] Industry"));
    assert!(!output.text.contains("Fintech"));
}

#[tokio::test]
async fn test_reset_columns_restores_defaults() {
    let data = dataset().await;
    let settings = SettingsProvider::in_memory();
    let hide = Interactions {
        hide: vec!["industry".to_string()],
        ..Interactions::default()
    };
    open_page(PageKind::Opportunities, &data, &hide, &settings, None)
        .await
        .unwrap();

    let reset = Interactions {
        reset_columns: true,
        ..Interactions::default()
    };
    let output = open_page(PageKind::Opportunities, &data, &reset, &settings, None)
        .await
        .unwrap();
    assert!(output.text.contains("[x] Industry"));
    assert!(output.text.contains("Fintech"));
    assert_eq!(settings.visibility("opportunities").await.unwrap(), None);
}

#[tokio::test]
async fn test_unknown_filter_column_fails() {
    let interactions = Interactions {
        filters: vec![filter("region", "US")],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let result = open_page(PageKind::Opportunities, &dataset().await, &interactions, &settings, None).await;
    assert!(matches!(
        result,
        Err(ConsoleError::Table(TableError::UnknownColumn(column))) if column == "region"
    ));
}

#[tokio::test]
async fn test_project_search_and_score_filter() {
    let data = dataset().await;
    let settings = SettingsProvider::in_memory();

    let search = Interactions {
        search: Some("ada".to_string()),
        ..Interactions::default()
    };
    let output = open_page(PageKind::Project, &data, &search, &settings, None)
        .await
        .unwrap();
    assert!(output.text.starts_with("Onboarding study (1 Response)"));

    let scores = Interactions {
        filters: vec![filter("willingnessToPay", "3")],
        ..Interactions::default()
    };
    let output = open_page(PageKind::Project, &data, &scores, &settings, None)
        .await
        .unwrap();
    assert!(output.text.starts_with("Onboarding study (2 Responses)"));
}

#[tokio::test]
async fn test_project_row_click_shows_scores() {
    let interactions = Interactions {
        clicks: vec![(ADA_RESPONSE.to_string(), "participant".to_string())],
        ..Interactions::default()
    };
    let settings = SettingsProvider::in_memory();
    let output = open_page(PageKind::Project, &dataset().await, &interactions, &settings, None)
        .await
        .unwrap();

    assert!(output.text.contains("Response from Ada (completed)"));
    assert!(output.text.contains("  Input Quality: 4"));
}

#[tokio::test]
async fn test_missing_project() {
    let settings = SettingsProvider::in_memory();
    let result = open_page(
        PageKind::Project,
        &Dataset::default(),
        &Interactions::default(),
        &settings,
        None,
    )
    .await;
    assert!(matches!(result, Err(ConsoleError::MissingProject)));
}

#[tokio::test]
async fn test_insights_type_filter_and_sort() {
    let data = dataset().await;
    let settings = SettingsProvider::in_memory();

    let reviews = Interactions {
        filters: vec![filter("type", "review")],
        ..Interactions::default()
    };
    let output = open_page(PageKind::Insights, &data, &reviews, &settings, None)
        .await
        .unwrap();
    assert!(output.text.starts_with("Records (1 Record)"));
    assert!(output.text.contains("App Store"));
    assert!(output.text.contains("Fair"));

    let sorted = Interactions {
        sort: Some(("inputQuality".to_string(), SortDirection::Descending)),
        ..Interactions::default()
    };
    let output = open_page(PageKind::Insights, &data, &sorted, &settings, None)
        .await
        .unwrap();
    let survey = output.text.find("Survey 12").unwrap();
    let call = output.text.find("Discovery call").unwrap();
    assert!(survey < call);
}
