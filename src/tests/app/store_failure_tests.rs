use std::{
    error::Error as _,
    io,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde_json::json;

use crate::{
    app::{LibraryOptions, NoticeLevel, PromptError, PromptLibrary, SchemaSaveOutcome},
    domain::{Record, Schema},
    io::DocumentFormat,
    store::{MemoryStore, RecordStore, StoreError},
    tests::fixtures::today,
};

/// Memory store whose record writes or record reads can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_record_writes: AtomicBool,
    fail_record_reads: AtomicBool,
}

fn unavailable() -> StoreError {
    StoreError::Io {
        path: PathBuf::from("flaky.json"),
        source: io::Error::other("disk unplugged"),
    }
}

impl FlakyStore {
    fn check(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn all_schemas(&self) -> Result<Vec<Schema>, StoreError> {
        self.inner.all_schemas().await
    }

    async fn schema_by_type(&self, prompt_type: &str) -> Result<Option<Schema>, StoreError> {
        self.inner.schema_by_type(prompt_type).await
    }

    async fn add_schema(&self, schema: Schema) -> Result<(), StoreError> {
        self.inner.add_schema(schema).await
    }

    async fn put_schema(&self, schema: Schema) -> Result<(), StoreError> {
        self.inner.put_schema(schema).await
    }

    async fn records_by_type(&self, prompt_type: &str) -> Result<Vec<Record>, StoreError> {
        self.check(&self.fail_record_reads)?;
        self.inner.records_by_type(prompt_type).await
    }

    async fn all_records(&self) -> Result<Vec<Record>, StoreError> {
        self.check(&self.fail_record_reads)?;
        self.inner.all_records().await
    }

    async fn record_by_id(&self, id: &str) -> Result<Option<Record>, StoreError> {
        self.check(&self.fail_record_reads)?;
        self.inner.record_by_id(id).await
    }

    async fn add_record(&self, record: Record) -> Result<(), StoreError> {
        self.check(&self.fail_record_writes)?;
        self.inner.add_record(record).await
    }

    async fn put_record(&self, record: Record) -> Result<(), StoreError> {
        self.check(&self.fail_record_writes)?;
        self.inner.put_record(record).await
    }

    async fn delete_record(&self, id: &str) -> Result<bool, StoreError> {
        self.check(&self.fail_record_writes)?;
        self.inner.delete_record(id).await
    }
}

async fn library() -> PromptLibrary<FlakyStore> {
    let options = LibraryOptions::default().with_today(today());
    let mut library = PromptLibrary::with_options(FlakyStore::default(), options);
    library.bootstrap().await.unwrap();
    library.select_type("Text").await.unwrap();
    library
}

fn fill_text_form(library: &mut PromptLibrary<FlakyStore>) {
    library.input("title", "Greeting").unwrap();
    library.input("content", "Say hello").unwrap();
    library.input("languageOther", "n/a").unwrap();
}

#[tokio::test]
async fn store_failures_surface_a_generic_message() {
    let mut library = library().await;
    library.open_create_form().await.unwrap();
    fill_text_form(&mut library);
    library.store().fail_record_writes.store(true, Ordering::SeqCst);

    let err = library.submit().await.unwrap_err();
    assert!(matches!(err, PromptError::Store { .. }));
    assert_eq!(err.to_string(), "Error saving prompt.");
    assert!(err.source().unwrap().to_string().contains("disk unplugged"));

    let notice = library.status().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Error saving prompt.");
    assert!(library.form().is_some());
}

#[tokio::test]
async fn failed_check_after_schema_save_still_rebuilds_the_form() {
    let mut library = library().await;
    library.open_create_form().await.unwrap();
    fill_text_form(&mut library);

    let text = library.schema_editor_text(Some("Text")).await.unwrap();
    let mut document: serde_json::Value = serde_json::from_str(&text).unwrap();
    document["fields"]["description"]["required"] = json!(true);
    library.store().fail_record_reads.store(true, Ordering::SeqCst);

    let outcome = library
        .save_schema_text(&document.to_string(), DocumentFormat::Json)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SchemaSaveOutcome::Saved {
            prompt_type: "Text".into(),
            created: false,
            issues: Vec::new(),
            form_rebuilt: true,
        }
    );
    let stored = library.store().schema_by_type("Text").await.unwrap().unwrap();
    assert!(stored.fields["description"].required);
    let form = library.form().unwrap();
    assert!(
        form.field(&"description".into())
            .unwrap()
            .is_required()
    );

    let notice = library.status().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.starts_with("Schema saved, but existing prompts were not checked"));
}
