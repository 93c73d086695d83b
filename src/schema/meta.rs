use std::sync::LazyLock;

use anyhow::{Context, Result};
use jsonschema::{Validator, validator_for};
use schemars::schema_for;
use serde_json::Value;

use crate::domain::{SchemaDocument, SchemaError};

/// JSON Schema describing the prompt schema document format.
pub fn document_meta_schema() -> Result<Value> {
    serde_json::to_value(schema_for!(SchemaDocument))
        .context("failed to serialize the schema document meta-schema")
}

/// Compiled once per process; a compile failure is kept and reported on use.
static META_VALIDATOR: LazyLock<Result<Validator, String>> =
    LazyLock::new(|| compile_meta_validator().map_err(|err| format!("{err:#}")));

fn compile_meta_validator() -> Result<Validator> {
    let meta = document_meta_schema()?;
    validator_for(&meta).map_err(|err| anyhow::anyhow!("failed to compile meta-schema: {err}"))
}

fn meta_validator() -> Result<&'static Validator, SchemaError> {
    META_VALIDATOR
        .as_ref()
        .map_err(|message| SchemaError::malformed("", message.clone()))
}

/// Reports the first structural violation of `raw` against the document format.
pub(crate) fn check_document_shape(raw: &Value) -> Result<(), SchemaError> {
    let validator = meta_validator()?;
    if let Some(error) = validator.iter_errors(raw).next() {
        let pointer = error.instance_path.to_string();
        return Err(SchemaError::malformed(&pointer, error.to_string()));
    }
    Ok(())
}
