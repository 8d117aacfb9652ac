use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Fields of a score row whose changes are worth showing to administrators.
const TRACKED_FIELDS: [&str; 2] = ["final_score", "remarks"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoringOperation {
    Insert,
    Update,
}

impl ScoringOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
        }
    }
}

/// Audit record of one score submission, with the row before and after it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoringHistoryEntry {
    pub history_id: Uuid,
    pub record_id: Uuid,
    pub operation: String,
    #[schema(value_type = Option<Object>)]
    pub before_data: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub after_data: Option<Value>,
    pub changed_by: Uuid,
    pub jury_name: Option<String>,
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub registration_id: Uuid,
    pub participant_name: Option<String>,
    pub changed_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldChange {
    pub field: String,
    #[schema(value_type = Object)]
    pub before: Value,
    #[schema(value_type = Object)]
    pub after: Value,
}

impl ScoringHistoryEntry {
    /// Tracked fields that differ between `before_data` and `after_data`.
    ///
    /// An insert lists every tracked field that was set.
    pub fn changes(&self) -> Vec<FieldChange> {
        let field = |data: &Option<Value>, name: &str| {
            data.as_ref()
                .and_then(|d| d.get(name))
                .cloned()
                .unwrap_or(Value::Null)
        };

        TRACKED_FIELDS
            .iter()
            .filter_map(|&name| {
                let before = field(&self.before_data, name);
                let after = field(&self.after_data, name);
                (before != after).then(|| FieldChange {
                    field: name.to_string(),
                    before,
                    after,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(before: Option<Value>, after: Option<Value>) -> ScoringHistoryEntry {
        ScoringHistoryEntry {
            history_id: Uuid::from_u128(1),
            record_id: Uuid::from_u128(2),
            operation: "UPDATE".to_string(),
            before_data: before,
            after_data: after,
            changed_by: Uuid::from_u128(3),
            jury_name: Some("Jury A".to_string()),
            event_id: Uuid::from_u128(4),
            category_id: Uuid::from_u128(5),
            subcategory_id: Uuid::from_u128(6),
            registration_id: Uuid::from_u128(7),
            participant_name: Some("Ada".to_string()),
            changed_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_update_lists_only_changed_fields() {
        let history = entry(
            Some(json!({"final_score": "85.000", "remarks": "Clean", "jury_name": "Jury A"})),
            Some(json!({"final_score": "88.500", "remarks": "Clean", "jury_name": "Jury B"})),
        );

        let changes = history.changes();

        assert_eq!(
            changes,
            vec![FieldChange {
                field: "final_score".to_string(),
                before: json!("85.000"),
                after: json!("88.500"),
            }]
        );
    }

    #[test]
    fn test_insert_lists_fields_that_were_set() {
        let history = entry(None, Some(json!({"final_score": "90.000", "remarks": null})));

        let changes = history.changes();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "final_score");
        assert_eq!(changes[0].before, Value::Null);
    }

    #[test]
    fn test_operation_serializes_uppercase() {
        assert_eq!(ScoringOperation::Update.as_str(), "UPDATE");
        assert_eq!(
            serde_json::to_string(&ScoringOperation::Insert).unwrap(),
            "\"INSERT\""
        );
    }
}
