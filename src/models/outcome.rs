use serde::{Deserialize, Serialize};

/// Resultado bruto de um `updateOne` (contagens, não o registro)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
    pub matched_count: u64,
}

impl UpdateOutcome {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
            matched_count,
        }
    }
}

/// Resultado bruto de um `deleteOne`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
