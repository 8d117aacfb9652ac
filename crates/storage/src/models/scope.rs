use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// The (event, category, subcategory) triple every score, prize tier and
/// results computation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ScoringScope {
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
}

impl ScoringScope {
    pub fn new(event_id: Uuid, category_id: Uuid, subcategory_id: Uuid) -> Self {
        Self {
            event_id,
            category_id,
            subcategory_id,
        }
    }
}

/// Human readable names of a scope, used for export file names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScopeLabel {
    pub event_title: String,
    pub category_name: String,
    pub subcategory_name: String,
}

impl ScopeLabel {
    pub fn display_category(&self) -> String {
        format!("{} - {}", self.category_name, self.subcategory_name)
    }
}
