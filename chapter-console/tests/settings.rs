use chapter_console::settings::RECENTLY_VIEWED_LIMIT;
use chapter_console::settings::SettingsProvider;
use chapter_console::settings::SqliteBackend;
use chapter_table::VisibilityState;

#[tokio::test]
async fn test_sqlite_visibility_round_trip() {
    let settings = SettingsProvider::new(SqliteBackend::in_memory().await.unwrap());
    assert_eq!(settings.visibility("opportunities").await.unwrap(), None);

    let state = VisibilityState::from_iter([("id", false), ("industry", false)]);
    settings.save_visibility("opportunities", &state).await.unwrap();
    settings
        .save_visibility("project/00000000-0000-0000-0000-000000000100", &VisibilityState::new())
        .await
        .unwrap();

    assert_eq!(settings.visibility("opportunities").await.unwrap(), Some(state));

    settings.clear_visibility("opportunities").await.unwrap();
    assert_eq!(settings.visibility("opportunities").await.unwrap(), None);
    assert_eq!(
        settings
            .visibility("project/00000000-0000-0000-0000-000000000100")
            .await
            .unwrap(),
        Some(VisibilityState::new())
    );
}

#[tokio::test]
async fn test_sqlite_delete() {
    let settings = SettingsProvider::new(SqliteBackend::in_memory().await.unwrap());
    settings.set("greeting", &"hello".to_string()).await.unwrap();
    assert_eq!(settings.get::<String>("greeting").await.unwrap().as_deref(), Some("hello"));

    settings.delete("greeting").await.unwrap();
    assert_eq!(settings.get::<String>("greeting").await.unwrap(), None);
}

#[tokio::test]
async fn test_recently_viewed_dedupes_and_caps() {
    let settings = SettingsProvider::in_memory();
    for i in 0..RECENTLY_VIEWED_LIMIT + 2 {
        settings.push_recently_viewed("ada@example.com", &i.to_string()).await.unwrap();
    }
    let ids = settings.push_recently_viewed("ada@example.com", "5").await.unwrap();

    assert_eq!(ids.len(), RECENTLY_VIEWED_LIMIT);
    assert_eq!(ids[0], "5");
    assert_eq!(ids.iter().filter(|id| *id == "5").count(), 1);
    assert_eq!(ids[1], (RECENTLY_VIEWED_LIMIT + 1).to_string());
    assert!(settings.recently_viewed("grace@example.com").await.unwrap().is_empty());
}
