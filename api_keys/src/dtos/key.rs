use common::error::{AppError, Res};
use db::{
    dtos::key::KeyUpdateRequest,
    models::key::{ApiKey, KeyStatus, PermissionSet},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{notice::Notice, service::stats::KeyStats, view::{ListState, StatusFilter}};

/// Name, description and permissions as entered in the create/edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl KeyForm {
    pub fn validate(&self) -> Res<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("API key name is required".to_string()));
        }
        Ok(())
    }
}

impl From<KeyForm> for KeyUpdateRequest {
    fn from(form: KeyForm) -> Self {
        KeyUpdateRequest {
            name: form.name,
            description: form.description,
            permissions: form.permissions,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStep {
    Next,
    Prev,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: Option<usize>,
    pub step: Option<PageStep>,
}

/// One row of the key table; `key` is masked unless the row was revealed.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyListItem {
    pub id: Uuid,
    pub name: String,
    pub key: String,
    pub visible: bool,
    pub description: String,
    pub permissions: PermissionSet,
    pub status: KeyStatus,
    pub usage: u64,
    pub created_at: chrono::NaiveDateTime,
    pub last_used: Option<chrono::NaiveDateTime>,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub state: ListState,
    pub total_pages: usize,
    pub total_filtered: usize,
    pub keys: Vec<ApiKeyListItem>,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub key: Option<ApiKeyListItem>,
    pub notice: Notice,
}

#[derive(Debug, Serialize)]
pub struct ToggleStatusResponse {
    pub success: bool,
    pub key: ApiKeyListItem,
    pub new_status: KeyStatus,
    pub notice: Notice,
}

#[derive(Debug, Serialize)]
pub struct VisibilityResponse {
    pub id: Uuid,
    pub visible: bool,
    pub key: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub id: Uuid,
    pub text: String,
    pub notice: Notice,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub stats: KeyStats,
    pub notice: Notice,
}

pub(crate) fn list_item(record: &ApiKey, display_key: String, visible: bool) -> ApiKeyListItem {
    ApiKeyListItem {
        id: record.id,
        name: record.name.clone(),
        key: display_key,
        visible,
        description: record.description.clone(),
        permissions: record.permissions.clone(),
        status: record.status,
        usage: record.usage,
        created_at: record.created_at,
        last_used: record.last_used,
        updated_at: record.updated_at,
    }
}
