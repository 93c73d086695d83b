use promptform::{
    FileStore, LibraryOptions, MemoryStore, PromptLibrary, RecordStore, StoreSnapshot,
};

#[tokio::test]
async fn library_state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompts.json");

    let mut library = PromptLibrary::new(FileStore::open(&path).await.unwrap());
    library.bootstrap().await.unwrap();
    library.select_type("Code").await.unwrap();
    library.open_create_form().await.unwrap();
    library.input("title", "Fizzbuzz").unwrap();
    library.input("content", "for i in 1..=100 {}").unwrap();
    library.change("language", "Python").unwrap();
    library.change("executable", true).unwrap();
    library.input("languageOther", "n/a").unwrap();
    let record = library.submit().await.unwrap();
    drop(library);

    let store = FileStore::open(&path).await.unwrap();
    let mut reopened = PromptLibrary::with_options(store, LibraryOptions::default());
    assert_eq!(reopened.bootstrap().await.unwrap(), ["Code", "Text"]);
    let stored = reopened.store().record_by_id(&record.id).await.unwrap().unwrap();
    assert_eq!(stored, record);
    assert_eq!(stored.data["executable"], true);
}

#[tokio::test]
async fn import_keeps_existing_keys_and_persists_new_ones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompts.json");

    let mut library = PromptLibrary::new(FileStore::open(&path).await.unwrap());
    library.bootstrap().await.unwrap();
    library.select_type("Text").await.unwrap();
    library.open_create_form().await.unwrap();
    library.input("title", "Local copy").unwrap();
    library.input("content", "Body").unwrap();
    library.input("languageOther", "n/a").unwrap();
    let local = library.submit().await.unwrap();

    let mut incoming = local.clone();
    incoming.data.insert("title".into(), serde_json::json!("Imported copy"));
    let document = serde_json::json!({
        "schemas": [
            {"promptType": "Text", "schemaVersion": "9.9", "fields": {}},
            {"promptType": "Memo", "schemaVersion": "1.0",
             "fields": {"body": {"type": "textarea", "label": "Body"}}}
        ],
        "records": [
            incoming,
            {
                "id": "memo-1",
                "promptType": "Memo",
                "data": {"title": "Kickoff", "body": "Agenda"},
                "createdAt": "2024-10-20T08:00:00Z",
                "updatedAt": "2024-10-20T09:00:00Z"
            }
        ]
    });
    let source = MemoryStore::from_snapshot(StoreSnapshot::from_document(document).unwrap());

    let report = library.import_from(&source).await.unwrap();
    assert_eq!(report.schemas_added, ["Memo"]);
    assert_eq!(report.schemas_skipped, ["Text"]);
    assert_eq!(report.records_added, ["memo-1"]);
    assert_eq!(report.records_skipped, [local.id.clone()]);
    assert!(library.status().message().starts_with("Data migration completed successfully"));
    drop(library);

    let reopened = FileStore::open(&path).await.unwrap();
    let text = reopened.schema_by_type("Text").await.unwrap().unwrap();
    assert_eq!(text.schema_version, "1.0");
    let kept = reopened.record_by_id(&local.id).await.unwrap().unwrap();
    assert_eq!(kept.title(), "Local copy");
    assert!(reopened.record_by_id("memo-1").await.unwrap().is_some());
}
