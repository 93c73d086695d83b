use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    domain::{FieldKind, Schema},
    form::is_truthy,
    store::{RecordStore, StoreError},
};

/// A stored record that no longer satisfies its schema's required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileIssue {
    pub record_id: String,
    pub title: String,
    /// Field names, nested ones as `parent.child`, in schema order.
    pub missing: Vec<String>,
}

/// Required fields of `schema` that `data` lacks.
///
/// Booleans always count as present. A required object is missing as a
/// whole when absent, otherwise its required children are checked one
/// level deep.
pub fn missing_required_fields(schema: &Schema, data: &Map<String, Value>) -> Vec<String> {
    let mut missing = Vec::new();
    for (name, definition) in &schema.fields {
        if !definition.required || definition.kind.is_boolean() {
            continue;
        }
        let stored = data.get(name).filter(|value| is_truthy(value));
        match (&definition.kind, stored) {
            (_, None) => missing.push(name.clone()),
            (FieldKind::Object { fields }, Some(value)) => {
                for (nested_name, nested) in fields {
                    if !nested.required {
                        continue;
                    }
                    let present = value.get(nested_name).is_some_and(is_truthy);
                    if !present {
                        missing.push(format!("{name}.{nested_name}"));
                    }
                }
            }
            _ => {}
        }
    }
    missing
}

/// Checks every stored record of `prompt_type` against its current schema.
pub async fn reconcile<S>(store: &S, prompt_type: &str) -> Result<Vec<ReconcileIssue>, StoreError>
where
    S: RecordStore + ?Sized,
{
    let Some(schema) = store.schema_by_type(prompt_type).await? else {
        tracing::warn!(prompt_type, "no schema found for prompt type during reconciliation");
        return Ok(Vec::new());
    };

    let issues: Vec<ReconcileIssue> = store
        .records_by_type(prompt_type)
        .await?
        .into_iter()
        .filter_map(|record| {
            let missing = missing_required_fields(&schema, &record.data);
            (!missing.is_empty()).then(|| ReconcileIssue {
                title: record.title().to_string(),
                record_id: record.id,
                missing,
            })
        })
        .collect();
    tracing::debug!(prompt_type, issues = issues.len(), "reconciled stored records");
    Ok(issues)
}

/// User-facing summary of reconciliation issues.
pub fn advisory_message(prompt_type: &str, issues: &[ReconcileIssue]) -> String {
    let mut message = format!(
        "The following prompts are missing required fields based on the updated schema for \"{prompt_type}\":\n\n"
    );
    for issue in issues {
        message.push_str(&format!(
            "- \"{}\" (ID: {}) is missing: {}\n",
            issue.title,
            issue.record_id,
            issue.missing.join(", ")
        ));
    }
    message.push_str("\nPlease update these prompts to comply with the new schema.");
    message
}
