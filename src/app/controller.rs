use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    domain::{Record, Schema, SchemaError, parse_schema_document},
    form::{
        EditValue, FieldEvent, FieldPath, FieldUpdate, FormSession, FormState, build_form,
        collect_values,
    },
    io::{DocumentFormat, parse_document_str},
    schema::builtin_schemas,
    store::{MigrationReport, RecordStore, StoreError, migrate},
};

use super::{
    error::{LookupError, PromptError},
    options::LibraryOptions,
    reconcile::{ReconcileIssue, advisory_message, reconcile},
    status::StatusLine,
};

/// Row of the record list for the active prompt type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSaveOutcome {
    /// The submitted schema equals the stored one; nothing was written.
    Unchanged { prompt_type: String },
    Saved {
        prompt_type: String,
        /// `true` when no schema existed for the type before.
        created: bool,
        issues: Vec<ReconcileIssue>,
        /// Whether an open form of this type was re-rendered.
        form_rebuilt: bool,
    },
}

#[derive(Debug, Clone)]
struct OpenForm {
    session: FormSession,
    state: FormState,
}

/// Drives the prompt library: type selection, record forms, deletes and the
/// schema editor, over any [`RecordStore`].
///
/// Every operation re-reads what it needs from the store.
#[derive(Debug)]
pub struct PromptLibrary<S> {
    store: S,
    options: LibraryOptions,
    status: StatusLine,
    active_type: Option<String>,
    form: Option<OpenForm>,
}

impl<S: RecordStore> PromptLibrary<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, LibraryOptions::default())
    }

    pub fn with_options(store: S, options: LibraryOptions) -> Self {
        let status = StatusLine::new(options.success_dismiss);
        Self {
            store,
            options,
            status,
            active_type: None,
            form: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &LibraryOptions {
        &self.options
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    /// Seeds the built-in schemas into an empty store and selects the first
    /// prompt type. Returns the available types.
    pub async fn bootstrap(&mut self) -> Result<Vec<String>, PromptError> {
        let existing = self
            .store
            .all_schemas()
            .await
            .map_err(store_failure(&mut self.status, "Error loading schemas"))?;
        if existing.is_empty() && self.options.seed_builtin_schemas {
            for schema in builtin_schemas() {
                tracing::info!(prompt_type = %schema.prompt_type, "seeding built-in schema");
                self.store
                    .add_schema(schema)
                    .await
                    .map_err(store_failure(&mut self.status, "Error seeding schemas"))?;
            }
        }

        let types = self.prompt_types().await?;
        self.active_type = types.first().cloned();
        tracing::debug!(types = ?types, active = ?self.active_type, "bootstrapped library");
        Ok(types)
    }

    pub async fn prompt_types(&mut self) -> Result<Vec<String>, PromptError> {
        let schemas = self
            .store
            .all_schemas()
            .await
            .map_err(store_failure(&mut self.status, "Error loading schemas"))?;
        Ok(schemas
            .into_iter()
            .map(|schema| schema.prompt_type)
            .collect())
    }

    /// Makes `prompt_type` active. An open form of another type is closed.
    pub async fn select_type(&mut self, prompt_type: &str) -> Result<(), PromptError> {
        self.require_schema(prompt_type).await?;
        if self
            .form
            .as_ref()
            .is_some_and(|form| form.session.prompt_type != prompt_type)
        {
            self.form = None;
        }
        self.active_type = Some(prompt_type.to_string());
        Ok(())
    }

    pub fn active_type(&self) -> Option<&str> {
        self.active_type.as_deref()
    }

    pub async fn records_for_active_type(&mut self) -> Result<Vec<RecordRow>, PromptError> {
        let prompt_type = self.active_type.as_deref().ok_or(LookupError::NoActiveType)?;
        let records = self
            .store
            .records_by_type(prompt_type)
            .await
            .map_err(store_failure(&mut self.status, "Error loading prompts"))?;
        Ok(records
            .into_iter()
            .map(|record| RecordRow {
                title: record.title().to_string(),
                id: record.id,
            })
            .collect())
    }

    pub async fn open_create_form(&mut self) -> Result<&FormState, PromptError> {
        let prompt_type = self
            .active_type
            .clone()
            .ok_or(LookupError::NoActiveType)?;
        let schema = self.require_schema(&prompt_type).await?;
        Ok(self.open(&schema, FormSession::create(prompt_type)))
    }

    /// Opens `record_id` for editing and makes its type active.
    pub async fn open_edit_form(&mut self, record_id: &str) -> Result<&FormState, PromptError> {
        let record = self.require_record(record_id).await?;
        let schema = self.require_schema(&record.prompt_type).await?;
        self.active_type = Some(record.prompt_type.clone());
        Ok(self.open(&schema, FormSession::edit(record)))
    }

    fn open(&mut self, schema: &Schema, session: FormSession) -> &FormState {
        let (state, session) = build_form(schema, session, &self.options.render_context());
        &self.form.insert(OpenForm { session, state }).state
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref().map(|form| &form.state)
    }

    pub fn session(&self) -> Option<&FormSession> {
        self.form.as_ref().map(|form| &form.session)
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn input(
        &mut self,
        path: impl Into<FieldPath>,
        value: impl Into<EditValue>,
    ) -> Result<FieldUpdate, PromptError> {
        self.dispatch(FieldEvent::input(path, value))
    }

    pub fn change(
        &mut self,
        path: impl Into<FieldPath>,
        value: impl Into<EditValue>,
    ) -> Result<FieldUpdate, PromptError> {
        self.dispatch(FieldEvent::change(path, value))
    }

    pub fn dispatch(&mut self, event: FieldEvent) -> Result<FieldUpdate, PromptError> {
        let form = self.form.as_mut().ok_or(LookupError::NoOpenForm)?;
        Ok(form.state.dispatch(event)?)
    }

    /// Collects and checks the open form, then persists the record.
    ///
    /// The form stays open when validation fails.
    pub async fn submit(&mut self) -> Result<Record, PromptError> {
        let prompt_type = match &self.form {
            Some(form) => form.session.prompt_type.clone(),
            None => return Err(LookupError::NoOpenForm.into()),
        };
        let schema = self.require_schema(&prompt_type).await?;

        let Some(form) = self.form.as_mut() else {
            return Err(LookupError::NoOpenForm.into());
        };
        let data = match collect_values(&mut form.state, &schema) {
            Ok(data) => data,
            Err(err) => {
                self.status.error(err.to_string());
                return Err(err.into());
            }
        };
        let record = form.session.finish(data);
        let editing = form.session.is_editing();

        if editing {
            let stored = self
                .store
                .record_by_id(&record.id)
                .await
                .map_err(store_failure(&mut self.status, "Error saving prompt"))?;
            if stored.is_none() {
                self.status.error("Error: Prompt to edit not found.");
                return Err(LookupError::RecordNotFound(record.id).into());
            }
            self.store
                .put_record(record.clone())
                .await
                .map_err(store_failure(&mut self.status, "Error saving prompt"))?;
        } else {
            self.store
                .add_record(record.clone())
                .await
                .map_err(store_failure(&mut self.status, "Error saving prompt"))?;
        }

        tracing::info!(id = %record.id, prompt_type = %record.prompt_type, editing, "saved prompt");
        self.form = None;
        self.status.prompt_saved(editing);
        Ok(record)
    }

    /// Deletes a record once `confirm` approves it.
    ///
    /// Returns `false` when the deletion was declined. An open form editing
    /// the record is closed.
    pub async fn delete_record(
        &mut self,
        record_id: &str,
        confirm: impl FnOnce(&Record) -> bool,
    ) -> Result<bool, PromptError> {
        let record = self.require_record(record_id).await?;
        if self.options.confirm_deletes && !confirm(&record) {
            tracing::debug!(id = record_id, "deletion declined");
            return Ok(false);
        }

        let removed = self
            .store
            .delete_record(record_id)
            .await
            .map_err(store_failure(&mut self.status, "Error deleting prompt"))?;
        if !removed {
            return Err(LookupError::RecordNotFound(record_id.to_string()).into());
        }
        if self
            .session()
            .is_some_and(|session| session.record_id() == Some(record_id))
        {
            self.form = None;
        }
        tracing::info!(id = record_id, "deleted prompt");
        self.status.prompt_deleted();
        Ok(true)
    }

    /// Text shown in the schema editor: the stored schema of `prompt_type`,
    /// or an empty template when there is none.
    pub async fn schema_editor_text(
        &mut self,
        prompt_type: Option<&str>,
    ) -> Result<String, PromptError> {
        let stored = match prompt_type {
            Some(prompt_type) => self
                .store
                .schema_by_type(prompt_type)
                .await
                .map_err(store_failure(&mut self.status, "Error loading schema"))?,
            None => None,
        };
        let document = match stored {
            Some(schema) => serde_json::to_value(&schema).map_err(|err| SchemaError::Parse {
                format: DocumentFormat::Json.label().to_string(),
                message: err.to_string(),
            })?,
            None => empty_schema_template(prompt_type.unwrap_or_default()),
        };
        serde_json::to_string_pretty(&document).map_err(|err| {
            PromptError::Schema(SchemaError::Parse {
                format: DocumentFormat::Json.label().to_string(),
                message: err.to_string(),
            })
        })
    }

    /// Accepts edited schema text: parse, check, store, reconcile, re-render.
    pub async fn save_schema_text(
        &mut self,
        text: &str,
        format: DocumentFormat,
    ) -> Result<SchemaSaveOutcome, PromptError> {
        let schema = match parse_schema_text(text, format) {
            Ok(schema) => schema,
            Err(err) => {
                self.status.error(schema_error_notice(&err));
                return Err(err.into());
            }
        };
        let prompt_type = schema.prompt_type.clone();

        let existing = self
            .store
            .schema_by_type(&prompt_type)
            .await
            .map_err(store_failure(&mut self.status, "Error saving schema"))?;
        let created = match existing {
            Some(current) if current == schema => {
                self.status.schema_unchanged();
                return Ok(SchemaSaveOutcome::Unchanged { prompt_type });
            }
            Some(_) => {
                self.store
                    .put_schema(schema.clone())
                    .await
                    .map_err(store_failure(&mut self.status, "Error saving schema"))?;
                false
            }
            None => {
                self.store
                    .add_schema(schema.clone())
                    .await
                    .map_err(store_failure(&mut self.status, "Error saving schema"))?;
                true
            }
        };
        tracing::info!(prompt_type = %prompt_type, created, "saved schema");
        self.status.schema_saved();

        let mut form_rebuilt = false;
        if let Some(open) = self.form.take() {
            if open.session.prompt_type == prompt_type {
                self.open(&schema, open.session);
                form_rebuilt = true;
            } else {
                self.form = Some(open);
            }
        }
        if self.active_type.is_none() {
            self.active_type = Some(prompt_type.clone());
        }

        // The schema is committed; a failed check only downgrades to a warning.
        let issues = match reconcile(&self.store, &prompt_type).await {
            Ok(issues) => {
                self.post_advisory(&prompt_type, &issues);
                issues
            }
            Err(source) => {
                let err = PromptError::store("Error validating prompts")(source);
                self.status
                    .warning(format!("Schema saved, but existing prompts were not checked: {err}"));
                Vec::new()
            }
        };

        Ok(SchemaSaveOutcome::Saved {
            prompt_type,
            created,
            issues,
            form_rebuilt,
        })
    }

    /// Copies schemas and records from `source` that this library's store
    /// lacks. Existing prompt types and record ids are left untouched.
    pub async fn import_from<F: RecordStore + ?Sized>(
        &mut self,
        source: &F,
    ) -> Result<MigrationReport, PromptError> {
        let report = migrate(source, &self.store)
            .await
            .map_err(store_failure(&mut self.status, "Data migration failed"))?;
        if self.active_type.is_none() {
            self.active_type = self.prompt_types().await?.into_iter().next();
        }
        self.status.info(format!(
            "Data migration completed successfully: {} added, {} skipped.",
            report.added(),
            report.skipped()
        ));
        Ok(report)
    }

    /// Checks stored records of `prompt_type` against its schema and posts
    /// an advisory notice when any fall short.
    pub async fn reconcile(&mut self, prompt_type: &str) -> Result<Vec<ReconcileIssue>, PromptError> {
        let issues = reconcile(&self.store, prompt_type)
            .await
            .map_err(store_failure(&mut self.status, "Error validating prompts"))?;
        self.post_advisory(prompt_type, &issues);
        Ok(issues)
    }

    fn post_advisory(&mut self, prompt_type: &str, issues: &[ReconcileIssue]) {
        if !issues.is_empty() {
            self.status.warning(advisory_message(prompt_type, issues));
        }
    }

    async fn require_schema(&mut self, prompt_type: &str) -> Result<Schema, PromptError> {
        self.store
            .schema_by_type(prompt_type)
            .await
            .map_err(store_failure(&mut self.status, "Error loading schema"))?
            .ok_or_else(|| LookupError::SchemaNotFound(prompt_type.to_string()).into())
    }

    async fn require_record(&mut self, record_id: &str) -> Result<Record, PromptError> {
        self.store
            .record_by_id(record_id)
            .await
            .map_err(store_failure(&mut self.status, "Error loading prompt"))?
            .ok_or_else(|| LookupError::RecordNotFound(record_id.to_string()).into())
    }
}

/// Logs a store failure, posts its generic message and wraps it.
fn store_failure<'a>(
    status: &'a mut StatusLine,
    context: &'static str,
) -> impl FnOnce(StoreError) -> PromptError + 'a {
    move |source| {
        let err = PromptError::store(context)(source);
        status.error(err.to_string());
        err
    }
}

/// Parses and checks schema editor text without touching the store.
pub fn parse_schema_text(text: &str, format: DocumentFormat) -> Result<Schema, SchemaError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SchemaError::Empty);
    }
    let raw = parse_document_str(text, format).map_err(|err| SchemaError::Parse {
        format: format.label().to_string(),
        message: format!("{:#}", err),
    })?;
    parse_schema_document(&raw)
}

fn schema_error_notice(err: &SchemaError) -> String {
    match err {
        SchemaError::Empty | SchemaError::Parse { .. } => err.to_string(),
        other => format!("Schema validation error: {other}"),
    }
}

fn empty_schema_template(prompt_type: &str) -> Value {
    json!({
        "promptType": prompt_type,
        "schemaVersion": "1.0",
        "fields": {}
    })
}
