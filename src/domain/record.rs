use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const UNTITLED: &str = "Untitled Prompt";

/// A persisted prompt: data that conformed to its schema when it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub prompt_type: String,
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Mints a fresh identifier and stamps both timestamps.
    pub fn new(prompt_type: impl Into<String>, data: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            prompt_type: prompt_type.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the data of an existing record, keeping its identity and creation time.
    pub fn revised(&self, data: Map<String, Value>) -> Self {
        Self {
            id: self.id.clone(),
            prompt_type: self.prompt_type.clone(),
            data,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    pub fn title(&self) -> &str {
        self.data
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn revision_preserves_identity_and_creation_time() {
        let original = Record::new("Text", data(json!({"title": "first"})));
        let revised = original.revised(data(json!({"title": "second"})));
        assert_eq!(revised.id, original.id);
        assert_eq!(revised.created_at, original.created_at);
        assert!(revised.updated_at >= original.updated_at);
        assert_eq!(revised.title(), "second");
    }

    #[test]
    fn missing_titles_fall_back() {
        let record = Record::new("Text", Map::new());
        assert_eq!(record.title(), UNTITLED);
    }

    #[test]
    fn decodes_stored_documents() {
        let record: Record = serde_json::from_value(json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "promptType": "Text",
            "data": {"title": "How to start learning Python"},
            "createdAt": "2024-10-20T08:00:00Z",
            "updatedAt": "2024-10-20T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.prompt_type, "Text");
        assert!(record.updated_at > record.created_at);
    }
}
